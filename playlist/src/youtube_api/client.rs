//! Core YouTube API client functionality.

use crate::config::ClientConfig;
use crate::id::PlaylistId;
use crate::playlist::PlaylistInfo;
use crate::source::{MembershipPage, PlaylistSource};
use crate::youtube_api::{
    playlist_items::PlaylistItemListResponse,
    playlists::PlaylistListResponse,
    videos::{Video, VideoListResponse},
};
use eyre::Context;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

/// Header that carries the API key.
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Client for the read-only parts of the YouTube Data API v3 that playlists need.
///
/// Requests are authenticated with an API key. The client is cheap to clone; clones share
/// the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    config: Arc<ClientConfig>,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a new YouTube API client.
    ///
    /// Timeouts, proxies and the like are configured on `client`.
    pub fn new(config: ClientConfig, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Makes a GET request to the named YouTube API endpoint and decodes the JSON response.
    ///
    /// This method consolidates the shared logic across all requests:
    /// - API key header (kept out of the URL, which `reqwest` errors repeat)
    /// - Status code validation and error handling
    /// - JSON decoding
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<T> {
        let url = self.config.endpoint(endpoint);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .query(query_params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send GET request to YouTube API: {}", url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                endpoint,
                status_code,
                error_text
            ));
        }

        response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("parse YouTube {} API response as JSON", endpoint))
    }

    /// Lists one page of the items in a playlist.
    ///
    /// Only the `snippet` part is requested, which carries the id of each video.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - The playlist to list
    /// * `max_results` - Maximum number of items to return (1-50)
    /// * `page_token` - Optional page token for pagination
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("maxResults", max_results_string.as_str()),
            ("playlistId", playlist_id),
        ];

        // Add pageToken if provided
        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }

        let page: PlaylistItemListResponse = self
            .get_json("playlistItems", &query_params)
            .await
            .with_context(|| format!("list items of playlist {}", playlist_id))?;

        tracing::debug!(
            playlist_id,
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            has_next_page = page.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(page)
    }

    /// Gets details, content details and statistics for up to 50 videos in a single call.
    ///
    /// Videos that do not exist (anymore) are left out of the response, so the result may be
    /// shorter than `video_ids`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, video_ids), fields(count = video_ids.len()))]
    pub async fn list_videos(&self, video_ids: &[String]) -> eyre::Result<Vec<Video>> {
        let ids = video_ids.join(",");
        let max_results_string = video_ids.len().max(1).to_string();
        let query_params = [
            ("part", "contentDetails,snippet,statistics"),
            ("maxResults", max_results_string.as_str()),
            ("id", ids.as_str()),
        ];

        let videos: VideoListResponse = self.get_json("videos", &query_params).await?;

        tracing::debug!(
            requested = video_ids.len(),
            returned_items = videos.items.len(),
            "fetched video details"
        );

        Ok(videos.items)
    }

    /// Gets the title, owner, description and item count of a playlist.
    ///
    /// Returns `Ok(None)` if no such playlist exists.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlists/list>
    #[instrument(skip(self))]
    pub async fn get_playlist(&self, playlist_id: &str) -> eyre::Result<Option<PlaylistInfo>> {
        let query_params = [("part", "snippet,contentDetails"), ("id", playlist_id)];

        let response: PlaylistListResponse = self
            .get_json("playlists", &query_params)
            .await
            .with_context(|| format!("fetch metadata of playlist {}", playlist_id))?;

        tracing::debug!(
            playlist_id,
            total_results = response.page_info.total_results,
            "fetched playlist metadata"
        );

        Ok(response.items.into_iter().next().map(PlaylistInfo::from))
    }
}

impl PlaylistSource for YouTubeClient {
    async fn playlist_items(
        &self,
        playlist_id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<MembershipPage> {
        let page = self
            .list_playlist_items(playlist_id.as_str(), max_results, page_token)
            .await?;
        Ok(MembershipPage {
            video_ids: page.video_ids(),
            next_page_token: page.next_page_token,
        })
    }

    async fn videos(&self, video_ids: &[String]) -> eyre::Result<Vec<Video>> {
        self.list_videos(video_ids).await
    }

    async fn playlist_info(&self, playlist_id: &PlaylistId) -> eyre::Result<Option<PlaylistInfo>> {
        self.get_playlist(playlist_id.as_str()).await
    }
}
