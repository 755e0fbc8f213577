//! Lazy, resumable paging over a playlist with a local cache.
//!
//! A [`PlaylistCursor`] never fetches a page twice. Every access pattern (iteration, random
//! access, assignment, draining) goes through the same paging routine, which fetches one
//! membership page, then one detail page for the videos on it, constructs those videos and
//! appends the ones that could be constructed to the cache. Pages are only fetched until the
//! request at hand can be answered.
//!
//! Indices always refer to positions in the cache, i.e. they count successfully constructed
//! videos only. A playlist whose third entry is unavailable therefore has its fourth entry at
//! index 2, both when iterating and when indexing.

use crate::error::{PlaylistError, Result};
use crate::id::PlaylistId;
use crate::item::{PlaylistOptions, VideoFactory};
use crate::metadata::VideoMetadata;
use crate::source::PlaylistSource;
use crate::youtube_api::Video;
use tokio_stream::Stream;
use tracing::instrument;

/// Number of playlist entries requested per membership page, the API maximum.
pub const PAGE_SIZE: u32 = 50;

/// Where the cursor is in the remote listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageToken {
    /// No page has been requested yet.
    #[default]
    NotStarted,
    /// More pages remain, starting at this continuation token.
    Next(String),
    /// The last page has been fetched. Never left once reached.
    Exhausted,
}

/// A playlist's videos, fetched on demand and cached.
///
/// All operations take `&mut self`, so iteration, indexing and assignment are serialized, and
/// pages are always requested one after the other in listing order.
pub struct PlaylistCursor<S, F: VideoFactory> {
    id: PlaylistId,
    source: S,
    factory: F,
    options: PlaylistOptions,
    /// Constructed videos in playlist order. Only ever appended to or overwritten in place.
    cache: Vec<F::Video>,
    /// Detail records processed so far, including the ones that were skipped.
    processed: usize,
    token: PageToken,
    /// Number of videos in the playlist, known once the last page has been fetched.
    declared_len: Option<usize>,
}

impl<S, F> std::fmt::Debug for PlaylistCursor<S, F>
where
    F: VideoFactory,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistCursor")
            .field("id", &self.id)
            .field("cached", &self.cache.len())
            .field("processed", &self.processed)
            .field("token", &self.token)
            .field("declared_len", &self.declared_len)
            .finish_non_exhaustive()
    }
}

impl<S, F> PlaylistCursor<S, F>
where
    S: PlaylistSource,
    F: VideoFactory,
{
    pub fn new(id: PlaylistId, source: S, factory: F, options: PlaylistOptions) -> Self {
        Self {
            id,
            source,
            factory,
            options,
            cache: Vec::new(),
            processed: 0,
            token: PageToken::NotStarted,
            declared_len: None,
        }
    }

    pub fn id(&self) -> &PlaylistId {
        &self.id
    }

    pub fn options(&self) -> &PlaylistOptions {
        &self.options
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// The videos fetched so far.
    pub fn cached(&self) -> &[F::Video] {
        &self.cache
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of remote entries processed so far, including unavailable ones.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn page_token(&self) -> &PageToken {
        &self.token
    }

    pub fn is_exhausted(&self) -> bool {
        self.token == PageToken::Exhausted
    }

    /// Number of available videos in the playlist, once it has been fully fetched.
    pub fn declared_len(&self) -> Option<usize> {
        self.declared_len
    }

    /// Returns the video at `index`, fetching pages until it is available.
    ///
    /// Fails with [`PlaylistError::IndexOutOfRange`] if the playlist ends before `index`.
    #[instrument(skip(self), fields(playlist_id = %self.id))]
    pub async fn get(&mut self, index: usize) -> Result<&F::Video> {
        if index >= self.cache.len() {
            if self.is_exhausted() {
                return Err(self.out_of_range(index));
            }
            self.fetch_while(|cursor| cursor.cache.len() <= index).await?;
        }
        if index < self.cache.len() {
            Ok(&self.cache[index])
        } else {
            Err(self.out_of_range(index))
        }
    }

    /// Replaces the video at `index`.
    ///
    /// A cached index is overwritten without any request. Otherwise the whole playlist is
    /// fetched first.
    #[instrument(skip(self, video), fields(playlist_id = %self.id))]
    pub async fn set(&mut self, index: usize, video: F::Video) -> Result<()> {
        if index >= self.cache.len() {
            self.drain().await?;
        }
        let len = self.cache.len();
        match self.cache.get_mut(index) {
            Some(slot) => {
                *slot = video;
                Ok(())
            }
            None => Err(PlaylistError::IndexOutOfRange { index, len }),
        }
    }

    /// Fetches every remaining page and returns the number of cached videos.
    #[instrument(skip(self), fields(playlist_id = %self.id))]
    pub async fn drain(&mut self) -> Result<usize> {
        self.fetch_while(|_| true).await?;
        Ok(self.cache.len())
    }

    /// Iterates over the whole playlist.
    ///
    /// Cached videos are yielded first, without any request. Only then, and only if the
    /// playlist has not been fully fetched yet, are further pages requested; their videos are
    /// cached as they arrive, so the next iteration starts from a longer prefix.
    ///
    /// An error ends the stream. Videos fetched before the error stay cached, and the next
    /// iteration resumes at the page that failed.
    pub fn iter(&mut self) -> impl Stream<Item = Result<F::Video>> + '_ {
        async_stream::try_stream! {
            let mut next = 0;
            loop {
                while next < self.cache.len() {
                    yield self.cache[next].clone();
                    next += 1;
                }
                if self.is_exhausted() {
                    break;
                }
                self.fetch_page().await?;
            }
        }
    }

    /// Fetches pages while `more` holds and the playlist is not exhausted.
    async fn fetch_while(&mut self, mut more: impl FnMut(&Self) -> bool) -> Result<()> {
        while !self.is_exhausted() && more(&*self) {
            self.fetch_page().await?;
        }
        Ok(())
    }

    /// Fetches the next membership page and the details of its videos, and caches every video
    /// that can be constructed. Returns how many videos were added.
    async fn fetch_page(&mut self) -> Result<usize> {
        let page_token = match &self.token {
            PageToken::Exhausted => return Ok(0),
            PageToken::NotStarted => None,
            PageToken::Next(token) => Some(token.as_str()),
        };

        let page = self
            .source
            .playlist_items(&self.id, PAGE_SIZE, page_token)
            .await?;

        // the details endpoint rejects an empty id list
        let videos = if page.video_ids.is_empty() {
            Vec::new()
        } else {
            self.source.videos(&page.video_ids).await?
        };

        // Nothing is committed until the whole page has been constructed. If this future is
        // dropped partway, the cursor is left as it was before the page was requested.
        let mut fresh = Vec::with_capacity(videos.len());
        let seen = videos.len();
        for video in videos {
            if let Some(constructed) = self.build_video(video).await {
                fresh.push(constructed);
            }
        }
        let added = fresh.len();

        self.processed += seen;
        self.cache.extend(fresh);
        match page.next_page_token {
            Some(token) => self.token = PageToken::Next(token),
            None => {
                self.token = PageToken::Exhausted;
                self.declared_len = Some(self.cache.len());
            }
        }

        tracing::debug!(
            playlist_id = %self.id,
            entries = page.video_ids.len(),
            added,
            cached = self.cache.len(),
            exhausted = self.is_exhausted(),
            "fetched playlist page"
        );

        Ok(added)
    }

    /// Constructs one video. Unavailable videos are reported and yield `None`.
    async fn build_video(&self, video: Video) -> Option<F::Video> {
        let metadata = VideoMetadata::from_video(&video);
        let title = metadata.title.clone();

        match self
            .factory
            .construct(&video.id, metadata, &self.options)
            .await
        {
            Ok(constructed) => {
                self.options.notify(&format!("Added video: {title}"));
                Some(constructed)
            }
            Err(e) => {
                tracing::warn!(video_id = %video.id, reason = %e, "skipping unavailable video");
                self.options.notify(&format!("{title}: {e}"));
                None
            }
        }
    }

    fn out_of_range(&self, index: usize) -> PlaylistError {
        PlaylistError::IndexOutOfRange {
            index,
            len: self.cache.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeFactory, FakeSource, recorder};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio_stream::StreamExt;

    fn cursor(
        source: FakeSource,
        factory: FakeFactory,
        options: PlaylistOptions,
    ) -> PlaylistCursor<FakeSource, FakeFactory> {
        PlaylistCursor::new(
            PlaylistId::parse("PLtest").unwrap(),
            source,
            factory,
            options,
        )
    }

    async fn collect(cursor: &mut PlaylistCursor<FakeSource, FakeFactory>) -> Vec<String> {
        let stream = cursor.iter();
        let mut stream = std::pin::pin!(stream);
        let mut out = Vec::new();
        while let Some(video) = stream.next().await {
            out.push(video.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn single_page_with_unavailable_video() {
        let (messages, callback) = recorder();
        let source = FakeSource::new(vec![vec!["a", "b", "c"]]);
        let mut cursor = cursor(
            source,
            FakeFactory::unavailable(&["b"]),
            PlaylistOptions::default().callback(callback),
        );

        assert_eq!(collect(&mut cursor).await, vec!["a", "c"]);
        assert_eq!(cursor.cached_len(), 2);
        assert_eq!(cursor.processed(), 3);
        assert_eq!(cursor.page_token(), &PageToken::Exhausted);
        assert_eq!(cursor.declared_len(), Some(2));
        assert_eq!(
            *messages.lock().unwrap(),
            vec![
                "Added video: Video a".to_string(),
                "Video b: removed by uploader".to_string(),
                "Added video: Video c".to_string(),
            ]
        );
        assert_eq!(cursor.source().item_calls(), 1);
        assert_eq!(cursor.source().video_calls(), 1);
    }

    #[tokio::test]
    async fn second_iteration_uses_cache() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        let first = collect(&mut cursor).await;
        assert_eq!(first, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(cursor.source().item_calls(), 3);
        assert_eq!(cursor.source().video_calls(), 3);

        let second = collect(&mut cursor).await;
        assert_eq!(second, first);
        assert_eq!(cursor.source().item_calls(), 3);
        assert_eq!(cursor.source().video_calls(), 3);
    }

    #[tokio::test]
    async fn pages_are_requested_in_order() {
        let source = FakeSource::new(vec![vec!["a"], vec!["b"], vec!["c"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());
        cursor.drain().await.unwrap();
        assert_eq!(
            cursor.source().tokens_seen(),
            vec![None, Some("page-1".to_string()), Some("page-2".to_string())]
        );
    }

    #[tokio::test]
    async fn partial_iteration_resumes_where_it_left_off() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        {
            let stream = cursor.iter();
            let mut stream = std::pin::pin!(stream);
            let taken: Vec<_> = (&mut stream).take(3).collect::<Result<_>>().await.unwrap();
            assert_eq!(taken, vec!["a", "b", "c"]);
        }
        assert_eq!(cursor.cached_len(), 4);
        assert_eq!(cursor.source().item_calls(), 2);
        assert!(!cursor.is_exhausted());

        assert_eq!(collect(&mut cursor).await, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(cursor.source().item_calls(), 3);
    }

    #[tokio::test]
    async fn get_fetches_only_needed_pages() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        assert_eq!(cursor.get(2).await.unwrap(), "c");
        assert_eq!(cursor.source().item_calls(), 2);

        // already cached: no request
        assert_eq!(cursor.get(0).await.unwrap(), "a");
        assert_eq!(cursor.get(3).await.unwrap(), "d");
        assert_eq!(cursor.source().item_calls(), 2);
        assert_eq!(cursor.source().video_calls(), 2);
    }

    #[tokio::test]
    async fn get_past_end_is_out_of_range() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        let err = cursor.get(3).await.unwrap_err();
        assert!(matches!(
            err,
            PlaylistError::IndexOutOfRange { index: 3, len: 3 }
        ));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.source().item_calls(), 2);

        // exhausted: fails without asking again
        assert!(cursor.get(10).await.is_err());
        assert_eq!(cursor.source().item_calls(), 2);
    }

    #[tokio::test]
    async fn skipped_videos_shift_indices_for_get_and_iter_alike() {
        let source = FakeSource::new(vec![vec!["a", "b", "c"], vec!["d", "e"]]);
        let mut cursor = cursor(
            source,
            FakeFactory::unavailable(&["b", "d"]),
            PlaylistOptions::default(),
        );

        assert_eq!(cursor.get(1).await.unwrap(), "c");
        assert_eq!(cursor.get(2).await.unwrap(), "e");
        assert_eq!(cursor.processed(), 5);

        let iterated = collect(&mut cursor).await;
        assert_eq!(iterated, vec!["a", "c", "e"]);
        for (index, video) in iterated.iter().enumerate() {
            assert_eq!(cursor.get(index).await.unwrap(), video);
        }
    }

    #[tokio::test]
    async fn drain_counts_only_available_videos() {
        let pages = vec![vec!["a", "b", "c", "d"], vec!["e", "f", "g"], vec!["h"]];
        let source = FakeSource::new(pages);
        let mut cursor = cursor(
            source,
            FakeFactory::unavailable(&["b", "f", "h"]),
            PlaylistOptions::default(),
        );

        assert_eq!(cursor.drain().await.unwrap(), 5);
        assert_eq!(cursor.processed(), 8);
        assert_eq!(cursor.declared_len(), Some(5));
        assert!(cursor.processed() >= cursor.cached_len());
    }

    #[tokio::test]
    async fn exhausted_cursor_never_fetches_again() {
        let source = FakeSource::new(vec![vec!["a"], vec!["b"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());
        cursor.drain().await.unwrap();
        let calls = (cursor.source().item_calls(), cursor.source().video_calls());

        for _ in 0..3 {
            collect(&mut cursor).await;
            let _ = cursor.get(1).await;
            let _ = cursor.get(5).await;
            cursor.drain().await.unwrap();
        }
        assert_eq!(
            (cursor.source().item_calls(), cursor.source().video_calls()),
            calls
        );
    }

    #[tokio::test]
    async fn set_cached_index_does_not_fetch() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());
        cursor.get(1).await.unwrap();
        assert_eq!(cursor.source().item_calls(), 1);

        cursor.set(1, "z".to_string()).await.unwrap();
        assert_eq!(cursor.get(1).await.unwrap(), "z");
        assert_eq!(cursor.source().item_calls(), 1);
        assert!(!cursor.is_exhausted());
    }

    #[tokio::test]
    async fn set_uncached_index_drains_first() {
        let source = FakeSource::new(vec![vec!["a"], vec!["b"], vec!["c"]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        cursor.set(1, "z".to_string()).await.unwrap();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.source().item_calls(), 3);
        assert_eq!(cursor.cached(), ["a", "z", "c"]);

        let err = cursor.set(3, "y".to_string()).await.unwrap_err();
        assert!(matches!(
            err,
            PlaylistError::IndexOutOfRange { index: 3, len: 3 }
        ));
        assert_eq!(cursor.source().item_calls(), 3);
    }

    #[tokio::test]
    async fn empty_playlist_skips_detail_request() {
        let source = FakeSource::new(vec![vec![]]);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        assert!(collect(&mut cursor).await.is_empty());
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.declared_len(), Some(0));
        assert_eq!(cursor.source().item_calls(), 1);
        assert_eq!(cursor.source().video_calls(), 0);
    }

    #[tokio::test]
    async fn transport_error_ends_iteration_and_is_retried_later() {
        let source = FakeSource::new(vec![vec!["a", "b"], vec!["c"]]).failing_once_at(1);
        let mut cursor = cursor(source, FakeFactory::default(), PlaylistOptions::default());

        {
            let stream = cursor.iter();
            let mut stream = std::pin::pin!(stream);
            assert_eq!(stream.next().await.unwrap().unwrap(), "a");
            assert_eq!(stream.next().await.unwrap().unwrap(), "b");
            let err = stream.next().await.unwrap().unwrap_err();
            assert!(matches!(err, PlaylistError::Remote(_)));
            assert!(stream.next().await.is_none());
        }
        assert_eq!(cursor.cached_len(), 2);
        assert_eq!(cursor.page_token(), &PageToken::Next("page-1".to_string()));

        assert_eq!(collect(&mut cursor).await, vec!["a", "b", "c"]);
        assert_eq!(
            cursor.source().tokens_seen(),
            vec![
                None,
                Some("page-1".to_string()),
                Some("page-1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn construction_options_are_forwarded() {
        let source = FakeSource::new(vec![vec!["a"]]);
        let factory = FakeFactory::default();
        let options = PlaylistOptions::default().basic(true).size(true);
        let mut cursor = cursor(source, factory, options);
        cursor.drain().await.unwrap();
        assert_eq!(cursor.factory.seen_options(), vec![(true, false, true)]);
    }

    #[tokio::test]
    async fn cancelled_page_leaves_cursor_untouched() {
        let source = FakeSource::new(vec![vec!["a", "b", "c"], vec!["d"]]);
        let factory = FakeFactory::default().stalling_once_on("b");
        let mut cursor = cursor(source, factory, PlaylistOptions::default());

        let timed_out = tokio::time::timeout(Duration::from_millis(50), cursor.get(2)).await;
        assert!(timed_out.is_err());
        assert!(cursor.cached().is_empty());
        assert_eq!(cursor.processed(), 0);
        assert_eq!(cursor.page_token(), &PageToken::NotStarted);

        assert_eq!(cursor.drain().await.unwrap(), 4);
        assert_eq!(cursor.cached(), ["a", "b", "c", "d"]);
        assert_eq!(cursor.processed(), 4);
        // the cancelled page is requested again, the completed one is not
        assert_eq!(cursor.source().item_calls(), 3);
        assert_eq!(
            cursor.source().tokens_seen(),
            vec![None, None, Some("page-1".to_string())]
        );
    }
}
