//! Normalized per-video metadata built from `videos.list` records.

use crate::youtube_api::Video;
use jiff::Span;
use serde::{Deserialize, Serialize};

/// The metadata a playlist knows about each of its videos.
///
/// Every field has a fixed type; whatever the API left out is `None` (or zero for counts).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    /// Title of the channel that uploaded the video.
    pub author: String,
    /// URL of the default-size thumbnail.
    pub thumbnail: Option<String>,
    pub description: String,
    /// Length of the video in whole seconds.
    ///
    /// `None` if the API did not report a duration or it could not be parsed.
    pub duration_secs: Option<u64>,
    pub category_id: Option<String>,
    /// Human-readable name of `category_id`, if it is one of YouTube's standard categories.
    pub category: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: u64,
}

impl VideoMetadata {
    /// Builds normalized metadata from one raw `videos.list` record.
    pub fn from_video(video: &Video) -> Self {
        let snippet = video.snippet.clone().unwrap_or_default();
        let stats = video.statistics.clone().unwrap_or_default();
        let duration_secs = video
            .content_details
            .as_ref()
            .and_then(|d| d.duration.as_deref())
            .and_then(parse_duration);
        let category = snippet
            .category_id
            .as_deref()
            .and_then(category_name)
            .map(str::to_string);

        Self {
            title: snippet.title,
            author: snippet.channel_title,
            thumbnail: snippet.thumbnails.default.map(|t| t.url),
            description: snippet.description,
            duration_secs,
            category_id: snippet.category_id,
            category,
            views: parse_count(stats.view_count.as_deref()),
            likes: parse_count(stats.like_count.as_deref()),
            dislikes: parse_count(stats.dislike_count.as_deref()),
            comments: parse_count(stats.comment_count.as_deref()),
        }
    }
}

impl From<&Video> for VideoMetadata {
    fn from(video: &Video) -> Self {
        Self::from_video(video)
    }
}

/// Parses an ISO 8601 duration such as `PT1H2M3S` or `P1DT2H` into seconds.
///
/// Days count as 24 hours. Calendar units (years, months) are rejected since a video length
/// never uses them.
pub fn parse_duration(iso: &str) -> Option<u64> {
    let span: Span = iso.trim().parse().ok()?;
    if span.get_years() != 0 || span.get_months() != 0 || span.is_negative() {
        return None;
    }
    let secs = i64::from(span.get_weeks()) * 7 * 86_400
        + i64::from(span.get_days()) * 86_400
        + i64::from(span.get_hours()) * 3_600
        + span.get_minutes() * 60
        + span.get_seconds();
    u64::try_from(secs).ok()
}

fn parse_count(count: Option<&str>) -> u64 {
    count.and_then(|c| c.parse().ok()).unwrap_or(0)
}

/// Name of one of YouTube's standard video categories.
///
/// See: <https://developers.google.com/youtube/v3/docs/videoCategories/list>
pub fn category_name(category_id: &str) -> Option<&'static str> {
    Some(match category_id {
        "1" => "Film & Animation",
        "2" => "Autos & Vehicles",
        "10" => "Music",
        "15" => "Pets & Animals",
        "17" => "Sports",
        "18" => "Short Movies",
        "19" => "Travel & Events",
        "20" => "Gaming",
        "21" => "Videoblogging",
        "22" => "People & Blogs",
        "23" | "34" => "Comedy",
        "24" => "Entertainment",
        "25" => "News & Politics",
        "26" => "Howto & Style",
        "27" => "Education",
        "28" => "Science & Technology",
        "29" => "Nonprofits & Activism",
        "30" => "Movies",
        "31" => "Anime/Animation",
        "32" => "Action/Adventure",
        "33" => "Classics",
        "35" => "Documentary",
        "36" => "Drama",
        "37" => "Family",
        "38" => "Foreign",
        "39" => "Horror",
        "40" => "Sci-Fi/Fantasy",
        "41" => "Thriller",
        "42" => "Shorts",
        "43" => "Shows",
        "44" => "Trailers",
        _ => return None,
    })
}
