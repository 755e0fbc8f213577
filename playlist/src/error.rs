//! Error types surfaced to callers of the playlist API.

/// Errors returned by [`crate::Playlist`] and [`crate::PlaylistCursor`].
///
/// A single unavailable video never shows up here: the cursor recovers from
/// [`ItemUnavailable`] locally, reports it through the progress callback, and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    /// The input is neither a playlist id nor a YouTube URL carrying one.
    #[error("unrecognized playlist url: {0}")]
    InvalidPlaylistId(String),

    /// The requested index lies beyond the fully drained playlist.
    #[error("index {index} out of range for playlist of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// `playlists.list` returned no playlist for this id.
    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Transport or decoding failure talking to the remote API.
    #[error(transparent)]
    Remote(#[from] eyre::Report),
}

pub type Result<T, E = PlaylistError> = std::result::Result<T, E>;

/// A single video could not be constructed (removed, private, region-blocked, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ItemUnavailable {
    pub video_id: String,
    pub reason: String,
}

impl ItemUnavailable {
    pub fn new(video_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            reason: reason.into(),
        }
    }
}
