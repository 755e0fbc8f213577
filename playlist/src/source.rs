//! The remote, paginated source that playlists are read from.

use crate::id::PlaylistId;
use crate::playlist::PlaylistInfo;
use crate::youtube_api::Video;
use std::future::Future;

/// One page of playlist membership: which videos are on it, and where the next page starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipPage {
    /// Video ids in playlist order.
    pub video_ids: Vec<String>,
    /// Token for the next page, `None` on the last page.
    pub next_page_token: Option<String>,
}

/// A paginated playlist API.
///
/// [`crate::youtube_api::YouTubeClient`] is the real implementation. Errors are transport or
/// decoding failures and are passed on to the caller as-is; implementations are expected to
/// handle their own timeouts.
pub trait PlaylistSource {
    /// Fetches one membership page, starting at `page_token` (or the beginning).
    fn playlist_items(
        &self,
        playlist_id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> impl Future<Output = eyre::Result<MembershipPage>> + Send;

    /// Fetches detail records for the given videos, in the order the API returns them.
    fn videos(&self, video_ids: &[String]) -> impl Future<Output = eyre::Result<Vec<Video>>> + Send;

    /// Fetches playlist-level metadata, or `None` if the playlist does not exist.
    fn playlist_info(
        &self,
        playlist_id: &PlaylistId,
    ) -> impl Future<Output = eyre::Result<Option<PlaylistInfo>>> + Send;
}
