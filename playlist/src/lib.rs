//! Lazily fetched, cached access to YouTube playlists.
//!
//! A [`Playlist`] behaves like a collection of videos that is filled in on demand from the
//! YouTube Data API: indexing, iterating or assigning only fetches as many pages as the
//! operation needs, and no page is ever fetched twice.
//!
//! ```rust,no_run
//! use tokio_stream::StreamExt;
//! use youtube_playlist::{ClientConfig, PlaylistOptions, open_playlist};
//!
//! # async fn example() -> eyre::Result<()> {
//! let options = PlaylistOptions::default().callback(|msg: &str| eprintln!("{msg}"));
//! let mut playlist = open_playlist(
//!     "https://www.youtube.com/playlist?list=PLxyz123",
//!     ClientConfig::from_env()?,
//!     options,
//! )
//! .await?;
//!
//! println!("{}", playlist.title().await?);
//! let videos = playlist.iter();
//! let mut videos = std::pin::pin!(videos);
//! while let Some(video) = videos.next().await {
//!     println!("{}", video?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod id;
pub mod item;
pub mod metadata;
pub mod playlist;
pub mod source;
pub mod youtube_api;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use cursor::{PAGE_SIZE, PageToken, PlaylistCursor};
pub use error::{ItemUnavailable, PlaylistError, Result};
pub use id::{PlaylistId, extract_playlist_id};
pub use item::{PlaylistOptions, PlaylistVideo, PlaylistVideos, ProgressCallback, VideoFactory};
pub use metadata::VideoMetadata;
pub use playlist::{Playlist, PlaylistInfo};
pub use source::{MembershipPage, PlaylistSource};
pub use youtube_api::YouTubeClient;

/// Opens a playlist through the YouTube Data API and fetches its metadata.
///
/// Videos are built as [`PlaylistVideo`]s. Use [`Playlist::new`] to plug in another
/// [`VideoFactory`] or [`PlaylistSource`].
pub async fn open_playlist(
    input: &str,
    config: ClientConfig,
    options: PlaylistOptions,
) -> Result<Playlist<YouTubeClient, PlaylistVideos>> {
    let client = YouTubeClient::new(config, reqwest::Client::new());
    Playlist::from_url(client, PlaylistVideos, input, options).await
}
