//! YouTube Data API v3 client library.
//!
//! Only the read-only endpoints that playlists need are covered:
//!
//! - `playlistItems.list` — which videos are in a playlist, one page at a time
//! - `videos.list` — details and statistics for up to 50 videos at once
//! - `playlists.list` — title, owner, description and size of a playlist
//!
//! The `playlistItems` endpoint only carries a thin snippet per entry, so listing a playlist
//! with full metadata takes two round trips per page: one for the membership page and one
//! for the details of the videos on it.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_playlist::config::ClientConfig;
//! use youtube_playlist::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(ClientConfig::from_env()?, reqwest::Client::new());
//!
//! let page = client.list_playlist_items("PLxyz123", 50, None).await?;
//! for video in client.list_videos(&page.video_ids()).await? {
//!     println!("{} ({})", video.title(), video.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod playlist_items;
pub mod playlists;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::YouTubeClient;
pub use types::{PageInfo, Thumbnail, Thumbnails};

pub use playlist_items::{PlaylistItem, PlaylistItemListResponse, PlaylistItemSnippet, ResourceId};
pub use playlists::{PlaylistListResponse, PlaylistResource, PlaylistSnippet};
pub use videos::{Video, VideoContentDetails, VideoListResponse, VideoSnippet, VideoStatistics};
