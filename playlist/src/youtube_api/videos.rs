//! YouTube Videos API types.

use crate::youtube_api::types::{PageInfo, Thumbnails};
use serde::{Deserialize, Serialize};

/// Response structure for the `videos.list` API call.
///
/// Contains a list of [`Video`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#videoListResponse`.
    pub kind: String,
    /// A list of videos that match the request criteria.
    ///
    /// Videos that no longer exist are silently left out.
    #[serde(default)]
    pub items: Vec<Video>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A `video` resource represents a YouTube video.
///
/// Which parts are present depends on the `part` parameter of the request.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    #[serde(
        rename = "contentDetails",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_details: Option<VideoContentDetails>,
    /// Contains statistics about the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
}

impl Video {
    /// The video's title, or an empty string if the snippet was not requested.
    pub fn title(&self) -> &str {
        self.snippet.as_ref().map_or("", |s| s.title.as_str())
    }
}

/// Basic details about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, e.g. `PT4M13S`.
    #[serde(default)]
    pub duration: Option<String>,
}

/// Statistics about the video.
///
/// The API encodes all counts as strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of users who have indicated that they disliked the video.
    /// Note: This is only visible to the video owner.
    #[serde(rename = "dislikeCount")]
    pub dislike_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}
