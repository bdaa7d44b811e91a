//! The suggestion service contract.

use crate::error::Result;
use crate::types::{CreatePlaylistRequest, CreatePlaylistResponse};
use async_trait::async_trait;
use mixtape_core::Song;
use serde_json::Value;

/// Operations offered by the suggestion service.
///
/// Generate and refine return the raw payload; turning it into songs is the
/// normalizer's job because the service's envelope varies between calls.
/// Implementations never retry.
#[async_trait]
pub trait SuggestionApi: Send + Sync {
    /// Suggest an initial playlist for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<Value>;

    /// Revise `current_playlist` according to `feedback`.
    async fn refine(&self, feedback: &str, current_playlist: &[Song]) -> Result<Value>;

    /// Materialize a playlist on the music platform.
    async fn create_playlist(&self, request: &CreatePlaylistRequest)
        -> Result<CreatePlaylistResponse>;
}
