//! Construction of the video objects a playlist hands out.

use crate::error::ItemUnavailable;
use crate::metadata::VideoMetadata;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Receives human-readable progress notices, one per video added or skipped.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Flags forwarded to every [`VideoFactory::construct`] call.
///
/// `basic`, `gdata` and `size` are only interpreted by the factory. The default
/// [`PlaylistVideos`] makes no request of its own and ignores them; a factory that fetches
/// more per video (streams, extended metadata) decides what they mean.
#[derive(Clone, Default)]
pub struct PlaylistOptions {
    /// Only fetch basic data for each video.
    pub basic: bool,
    /// Fetch extended metadata for each video.
    pub gdata: bool,
    /// Look up the size of each stream.
    pub size: bool,
    pub callback: Option<ProgressCallback>,
}

impl PlaylistOptions {
    pub fn basic(mut self, basic: bool) -> Self {
        self.basic = basic;
        self
    }

    pub fn gdata(mut self, gdata: bool) -> Self {
        self.gdata = gdata;
        self
    }

    pub fn size(mut self, size: bool) -> Self {
        self.size = size;
        self
    }

    pub fn callback(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub(crate) fn notify(&self, message: &str) {
        if let Some(callback) = &self.callback {
            callback(message);
        }
    }
}

impl fmt::Debug for PlaylistOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistOptions")
            .field("basic", &self.basic)
            .field("gdata", &self.gdata)
            .field("size", &self.size)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Turns a playlist entry into whatever video type the caller works with.
///
/// Failing with [`ItemUnavailable`] is not fatal: the playlist skips the entry and moves on.
pub trait VideoFactory {
    type Video: Clone;

    fn construct(
        &self,
        video_id: &str,
        metadata: VideoMetadata,
        options: &PlaylistOptions,
    ) -> impl Future<Output = Result<Self::Video, ItemUnavailable>> + Send;
}

/// A playlist entry with the metadata the playlist fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistVideo {
    pub video_id: String,
    pub metadata: VideoMetadata,
}

impl PlaylistVideo {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl fmt::Display for PlaylistVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metadata.title)?;
        if let Some(secs) = self.metadata.duration_secs {
            write!(f, " ({:02}:{:02})", secs / 60, secs % 60)?;
        }
        Ok(())
    }
}

/// The default [`VideoFactory`], which builds a [`PlaylistVideo`] from the fetched metadata
/// without further requests. The [`PlaylistOptions`] flags do not apply to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaylistVideos;

impl VideoFactory for PlaylistVideos {
    type Video = PlaylistVideo;

    async fn construct(
        &self,
        video_id: &str,
        metadata: VideoMetadata,
        _options: &PlaylistOptions,
    ) -> Result<PlaylistVideo, ItemUnavailable> {
        if video_id.is_empty() {
            return Err(ItemUnavailable::new(video_id, "record carries no video id"));
        }
        Ok(PlaylistVideo {
            video_id: video_id.to_string(),
            metadata,
        })
    }
}
