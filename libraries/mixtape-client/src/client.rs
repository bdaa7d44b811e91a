//! HTTP implementation of the suggestion service client.

use crate::api::SuggestionApi;
use crate::error::{ApiError, Result};
use crate::types::{
    ClientConfig, CreatePlaylistBody, CreatePlaylistRequest, CreatePlaylistResponse,
    CurrentPlaylist, GenerateSuggestionsRequest, RefineSuggestionsRequest,
};
use async_trait::async_trait;
use mixtape_core::Song;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

const GENERATE_PATH: &str = "/generate-suggestions";
const REFINE_PATH: &str = "/refine-suggestions";
const CREATE_PATH: &str = "/create-playlist";

/// Client for the suggestion service's JSON-over-HTTP webhooks.
///
/// # Example
///
/// ```ignore
/// use mixtape_client::{AssistantClient, ClientConfig, SuggestionApi};
///
/// let client = AssistantClient::new(ClientConfig::default())?;
/// let raw = client.generate("songs for a rainy sunday").await?;
/// ```
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    base_url: String,
}

impl AssistantClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ApiError::invalid_url("URL cannot be empty"));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(ApiError::invalid_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::invalid_url(
                "URL must start with http:// or https://",
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Mixtape/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::from_transport(&e))?;

        Ok(Self { http, base_url })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and decode the JSON answer.
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling suggestion service");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Request did not complete");
                ApiError::from_transport(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = format!(
                "API request failed: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            );
            warn!(url = %url, status = status.as_u16(), "Service returned an error status");
            return Err(ApiError::with_status(message.trim_end(), status.as_u16()));
        }

        response.json().await.map_err(|e| ApiError::from_transport(&e))
    }
}

#[async_trait]
impl SuggestionApi for AssistantClient {
    async fn generate(&self, prompt: &str) -> Result<Value> {
        let request = GenerateSuggestionsRequest {
            prompt: prompt.to_string(),
        };
        self.post(GENERATE_PATH, &request).await
    }

    async fn refine(&self, feedback: &str, current_playlist: &[Song]) -> Result<Value> {
        let request = RefineSuggestionsRequest {
            feedback: feedback.to_string(),
            current_playlist: CurrentPlaylist::new(current_playlist),
        };
        self.post(REFINE_PATH, &request).await
    }

    async fn create_playlist(
        &self,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        let body = CreatePlaylistBody::from(request);
        let response: CreatePlaylistResponse = self.post(CREATE_PATH, &body).await?;

        info!(
            playlist_id = %response.playlist_id,
            tracks_added = response.tracks_added,
            "Playlist created"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(AssistantClient::new(ClientConfig::new("https://example.com/webhook")).is_ok());
        assert!(AssistantClient::new(ClientConfig::new("http://127.0.0.1:5678")).is_ok());

        // Invalid URLs
        assert!(AssistantClient::new(ClientConfig::new("")).is_err());
        assert!(AssistantClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(AssistantClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = AssistantClient::new(ClientConfig::new("https://example.com/webhook//"))
            .expect("valid url");
        assert_eq!(client.base_url(), "https://example.com/webhook");
    }
}
