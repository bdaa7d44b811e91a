//! Mixtape - build playlists by chatting with an AI suggestion service
//!
//! The binary is a thin shell over this library: [`assistant`] drives the
//! session, [`repl`] reads commands and [`render`] prints state.

pub mod assistant;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod repl;

pub use assistant::{CreateOverrides, Outcome, PlaylistAssistant, FALLBACK_PLAYLIST_NAME};
pub use config::AppConfig;
pub use error::{AppError, Result};
