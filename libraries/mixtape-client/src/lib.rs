//! Mixtape Suggestion Service Client
//!
//! HTTP client for the service that suggests, refines and creates playlists.
//!
//! # Features
//!
//! - **Generate**: initial suggestions from a natural-language prompt
//! - **Refine**: revised suggestions from feedback on the current playlist
//! - **Create**: materialize the playlist on the music platform
//!
//! Generate and refine hand back the raw JSON payload; pass it through
//! `mixtape-normalizer` to get songs. Failures are reported as [`ApiError`]
//! with a user-facing message and are never retried.
//!
//! # Example
//!
//! ```ignore
//! use mixtape_client::{AssistantClient, ClientConfig, SuggestionApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AssistantClient::new(ClientConfig::default())?;
//!     let raw = client.generate("upbeat workout songs").await?;
//!     println!("{raw}");
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod types;

pub use api::SuggestionApi;
pub use client::AssistantClient;
pub use error::{ApiError, Result};
pub use types::{
    ClientConfig, CreatePlaylistRequest, CreatePlaylistResponse, CurrentPlaylist,
    GenerateSuggestionsRequest, RefineSuggestionsRequest, DEFAULT_BASE_URL,
};
