//! Envelope extraction
//!
//! The suggestion service wraps its content in one of several envelopes
//! depending on the endpoint and upstream version:
//!
//! ```text
//! 1. { "body": { "message": { "content": {...} } } }
//! 2. { "object Object": { "message": { "content": {...} } } }   (refine)
//! 3. { "body": "<JSON string>" }
//! 4. { "body": {...} }
//! 5. {...}                                                       (bare)
//! ```
//!
//! Each shape has its own extractor. They are tried in that order and the
//! first candidate holding a non-null `suggestions` field wins.

use crate::error::{NormalizationError, Result};
use serde_json::Value;
use std::borrow::Cow;
use tracing::trace;

/// Key the refine endpoint emits instead of `body`
const MANGLED_KEY: &str = "object Object";

/// One of the known envelope shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `body.message.content`
    MessageContent,
    /// `"object Object".message.content`
    MangledMessageContent,
    /// `body` holding JSON-encoded text
    EncodedBody,
    /// `body` holding the content object
    ObjectBody,
    /// The payload is the content
    Bare,
}

impl Envelope {
    /// All shapes, in priority order
    pub const PRIORITY: [Envelope; 5] = [
        Envelope::MessageContent,
        Envelope::MangledMessageContent,
        Envelope::EncodedBody,
        Envelope::ObjectBody,
        Envelope::Bare,
    ];

    /// Pull the candidate content out of `payload` if it has this shape
    ///
    /// Only [`Envelope::EncodedBody`] can fail: a `body` string that is not
    /// valid JSON is a malformed response, not a shape mismatch.
    pub fn extract<'a>(self, payload: &'a Value) -> Result<Option<Cow<'a, Value>>> {
        let candidate = match self {
            Envelope::MessageContent => message_content(payload.get("body")).map(Cow::Borrowed),
            Envelope::MangledMessageContent => {
                message_content(payload.get(MANGLED_KEY)).map(Cow::Borrowed)
            }
            Envelope::EncodedBody => match payload.get("body") {
                Some(Value::String(text)) => {
                    let decoded: Value = serde_json::from_str(text).map_err(|e| {
                        NormalizationError::invalid_format(format!(
                            "body string is not valid JSON: {e}"
                        ))
                    })?;
                    Some(Cow::Owned(decoded))
                }
                _ => None,
            },
            Envelope::ObjectBody => payload
                .get("body")
                .filter(|body| body.is_object())
                .map(Cow::Borrowed),
            Envelope::Bare => Some(Cow::Borrowed(payload)),
        };
        Ok(candidate)
    }
}

/// `<root>.message.content`, when it is an object
fn message_content(root: Option<&Value>) -> Option<&Value> {
    root?
        .get("message")?
        .get("content")
        .filter(|content| content.is_object())
}

/// Whether a candidate carries suggestions
fn has_suggestions(candidate: &Value) -> bool {
    candidate
        .as_object()
        .and_then(|obj| obj.get("suggestions"))
        .is_some_and(|s| !s.is_null())
}

/// Find the content object inside `payload`
///
/// Returns the winning shape along with the content.
pub fn locate_content(payload: &Value) -> Result<(Envelope, Cow<'_, Value>)> {
    for envelope in Envelope::PRIORITY {
        if let Some(candidate) = envelope.extract(payload)? {
            if has_suggestions(&candidate) {
                trace!(?envelope, "Matched response envelope");
                return Ok((envelope, candidate));
            }
        }
    }

    Err(NormalizationError::invalid_format(
        "no envelope contains a suggestions field",
    ))
}
