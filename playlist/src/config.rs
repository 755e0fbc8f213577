//! Client configuration.

use eyre::Context;

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";

/// Settings for [`crate::youtube_api::YouTubeClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent in the `X-Goog-Api-Key` header.
    pub api_key: String,
    /// Base URL that endpoint names (`playlistItems`, `videos`, ...) are appended to.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads the configuration from `YOUTUBE_API_KEY` and, if set, `YOUTUBE_API_BASE_URL`.
    pub fn from_env() -> eyre::Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .with_context(|| format!("read YouTube API key from ${API_KEY_VAR}"))?;
        let config = Self::new(api_key);
        Ok(match std::env::var(BASE_URL_VAR) {
            Ok(base_url) => config.with_base_url(base_url),
            Err(_) => config,
        })
    }

    /// Full URL for the named API endpoint.
    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

// keep the key out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
