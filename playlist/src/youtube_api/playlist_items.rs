//! YouTube PlaylistItems API types.

use crate::youtube_api::types::{PageInfo, Thumbnails};
use serde::{Deserialize, Serialize};

/// Response structure for the `playlistItems.list` API call.
///
/// This is the "membership" page of a playlist: it tells us which videos belong to the
/// playlist, but not much about them.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#playlistItemListResponse`.
    pub kind: String,
    /// A list of playlist items that match the request criteria.
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

impl PlaylistItemListResponse {
    /// The ids of the videos on this page, in playlist order.
    pub fn video_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.snippet.resource_id.video_id.clone())
            .collect()
    }
}

/// A `playlistItem` resource identifies another resource, such as a video, that is included
/// in a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub snippet: PlaylistItemSnippet,
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    /// The item's title.
    ///
    /// Removed and private videos keep their entry, titled "Deleted video" or "Private video".
    pub title: String,
    /// The order in which the item appears in the playlist, starting at zero.
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

/// Identifies the resource that was added to the playlist.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceId {
    /// The kind, or type, of the referred resource, typically `youtube#video`.
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
}
