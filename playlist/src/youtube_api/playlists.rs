//! YouTube Playlists API types.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};

/// Response structure for the `playlists.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistListResponse {
    /// The value will be `youtube#playlistListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: Vec<PlaylistResource>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlist` resource represents a YouTube playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistResource {
    pub id: String,
    pub snippet: PlaylistSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistContentDetails,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlists#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    pub title: String,
    /// Title of the channel that owns the playlist.
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistContentDetails {
    /// The number of videos in the playlist, including unavailable ones.
    #[serde(rename = "itemCount")]
    pub item_count: usize,
}
