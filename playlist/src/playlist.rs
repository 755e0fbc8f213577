//! A YouTube playlist with lazily fetched metadata and videos.

use crate::cursor::PlaylistCursor;
use crate::error::{PlaylistError, Result};
use crate::id::PlaylistId;
use crate::item::{PlaylistOptions, VideoFactory};
use crate::source::PlaylistSource;
use crate::youtube_api::PlaylistResource;
use std::fmt;
use tokio_stream::Stream;

/// Playlist-level metadata, as reported by `playlists.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    pub id: String,
    pub title: String,
    /// Title of the channel that owns the playlist.
    pub author: String,
    pub description: String,
    /// Number of entries, including ones that turn out to be unavailable.
    pub item_count: usize,
}

impl From<PlaylistResource> for PlaylistInfo {
    fn from(playlist: PlaylistResource) -> Self {
        Self {
            id: playlist.id,
            title: playlist.snippet.title,
            author: playlist.snippet.channel_title,
            description: playlist.snippet.description,
            item_count: playlist.content_details.item_count,
        }
    }
}

impl fmt::Display for PlaylistInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: Playlist")?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Length: {}", self.item_count)
    }
}

/// A YouTube playlist.
///
/// Title, author, description and length are fetched together, once, the first time any of
/// them is needed. Videos are fetched page by page as they are accessed; see
/// [`PlaylistCursor`].
#[derive(Debug)]
pub struct Playlist<S, F: VideoFactory> {
    cursor: PlaylistCursor<S, F>,
    info: Option<PlaylistInfo>,
}

impl<S, F> Playlist<S, F>
where
    S: PlaylistSource,
    F: VideoFactory,
{
    /// Creates a playlist from an id or URL without making any request.
    ///
    /// Fails with [`PlaylistError::InvalidPlaylistId`] if `input` holds no playlist id.
    pub fn new(source: S, factory: F, input: &str, options: PlaylistOptions) -> Result<Self> {
        let id = PlaylistId::parse(input)?;
        Ok(Self {
            cursor: PlaylistCursor::new(id, source, factory, options),
            info: None,
        })
    }

    /// Like [`Playlist::new`], but fetches the playlist metadata right away.
    pub async fn from_url(
        source: S,
        factory: F,
        input: &str,
        options: PlaylistOptions,
    ) -> Result<Self> {
        let mut playlist = Self::new(source, factory, input, options)?;
        playlist.info().await?;
        Ok(playlist)
    }

    /// Creates a playlist whose metadata is already known, e.g. from an earlier listing.
    pub fn from_info(
        source: S,
        factory: F,
        info: PlaylistInfo,
        options: PlaylistOptions,
    ) -> Result<Self> {
        let mut playlist = Self::new(source, factory, &info.id, options)?;
        playlist.info = Some(info);
        Ok(playlist)
    }

    pub fn id(&self) -> &PlaylistId {
        self.cursor.id()
    }

    /// The underlying cursor, for inspecting what has been fetched so far.
    pub fn cursor(&self) -> &PlaylistCursor<S, F> {
        &self.cursor
    }

    async fn fetch_info(&mut self) -> Result<&PlaylistInfo> {
        match &mut self.info {
            Some(info) => Ok(&*info),
            slot @ None => {
                let id = self.cursor.id();
                tracing::debug!(playlist_id = %id, "fetching playlist metadata");
                let info = self
                    .cursor
                    .source()
                    .playlist_info(id)
                    .await?
                    .ok_or_else(|| PlaylistError::PlaylistNotFound(id.to_string()))?;
                Ok(&*slot.insert(info))
            }
        }
    }

    pub async fn title(&mut self) -> Result<&str> {
        Ok(&self.fetch_info().await?.title)
    }

    pub async fn author(&mut self) -> Result<&str> {
        Ok(&self.fetch_info().await?.author)
    }

    pub async fn description(&mut self) -> Result<&str> {
        Ok(&self.fetch_info().await?.description)
    }

    /// Number of videos in the playlist.
    ///
    /// Once the playlist has been fully fetched this is the number of available videos.
    /// Before that, it is the entry count reported by the API, which also counts videos that
    /// may turn out to be unavailable.
    pub async fn len(&mut self) -> Result<usize> {
        if let Some(len) = self.cursor.declared_len() {
            return Ok(len);
        }
        Ok(self.fetch_info().await?.item_count)
    }

    pub async fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// All playlist metadata, with the length as reported by [`Playlist::len`].
    pub async fn info(&mut self) -> Result<PlaylistInfo> {
        let mut info = self.fetch_info().await?.clone();
        if let Some(len) = self.cursor.declared_len() {
            info.item_count = len;
        }
        Ok(info)
    }

    /// See [`PlaylistCursor::get`].
    pub async fn get(&mut self, index: usize) -> Result<&F::Video> {
        self.cursor.get(index).await
    }

    /// See [`PlaylistCursor::set`].
    pub async fn set(&mut self, index: usize, video: F::Video) -> Result<()> {
        self.cursor.set(index, video).await
    }

    /// See [`PlaylistCursor::iter`].
    pub fn iter(&mut self) -> impl Stream<Item = Result<F::Video>> + '_ {
        self.cursor.iter()
    }

    /// See [`PlaylistCursor::drain`].
    pub async fn drain(&mut self) -> Result<usize> {
        self.cursor.drain().await
    }
}
