//! In-memory stand-ins for the remote API and the video factory.

use crate::error::ItemUnavailable;
use crate::id::PlaylistId;
use crate::item::{PlaylistOptions, VideoFactory};
use crate::metadata::VideoMetadata;
use crate::playlist::PlaylistInfo;
use crate::source::{MembershipPage, PlaylistSource};
use crate::youtube_api::{Video, VideoSnippet};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A playlist split into fixed pages, with page `n > 0` reachable through token `page-n`.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pages: Vec<Vec<&'static str>>,
    info: Option<PlaylistInfo>,
    fail_once_at: Mutex<Option<usize>>,
    tokens_seen: Mutex<Vec<Option<String>>>,
    item_calls: AtomicUsize,
    video_calls: AtomicUsize,
    info_calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(pages: Vec<Vec<&'static str>>) -> Self {
        let item_count = pages.iter().map(Vec::len).sum();
        Self {
            pages,
            info: Some(PlaylistInfo {
                id: "PLtest".to_string(),
                title: "Test playlist".to_string(),
                author: "Test channel".to_string(),
                description: "A playlist for tests".to_string(),
                item_count,
            }),
            ..Default::default()
        }
    }

    /// Makes the first request for page `page` fail with a transport error.
    pub(crate) fn failing_once_at(self, page: usize) -> Self {
        *self.fail_once_at.lock().unwrap() = Some(page);
        self
    }

    pub(crate) fn without_info(mut self) -> Self {
        self.info = None;
        self
    }

    pub(crate) fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn video_calls(&self) -> usize {
        self.video_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn tokens_seen(&self) -> Vec<Option<String>> {
        self.tokens_seen.lock().unwrap().clone()
    }
}

impl PlaylistSource for FakeSource {
    async fn playlist_items(
        &self,
        _playlist_id: &PlaylistId,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<MembershipPage> {
        assert_eq!(max_results, 50);
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));

        let page = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| eyre::eyre!("bad page token {token}"))?,
        };

        {
            let mut fail = self.fail_once_at.lock().unwrap();
            if *fail == Some(page) {
                *fail = None;
                eyre::bail!("connection reset while fetching page {page}");
            }
        }

        let ids = self
            .pages
            .get(page)
            .ok_or_else(|| eyre::eyre!("no page {page}"))?;
        Ok(MembershipPage {
            video_ids: ids.iter().map(|id| id.to_string()).collect(),
            next_page_token: (page + 1 < self.pages.len()).then(|| format!("page-{}", page + 1)),
        })
    }

    async fn videos(&self, video_ids: &[String]) -> eyre::Result<Vec<Video>> {
        assert!(!video_ids.is_empty() && video_ids.len() <= 50);
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        Ok(video_ids
            .iter()
            .map(|id| Video {
                id: id.clone(),
                snippet: Some(VideoSnippet {
                    title: format!("Video {id}"),
                    ..Default::default()
                }),
                content_details: None,
                statistics: None,
            })
            .collect())
    }

    async fn playlist_info(&self, _playlist_id: &PlaylistId) -> eyre::Result<Option<PlaylistInfo>> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.info.clone())
    }
}

/// Builds each video as its id, failing for the ids marked unavailable.
#[derive(Debug, Default)]
pub(crate) struct FakeFactory {
    unavailable: HashSet<String>,
    stall_once_on: Mutex<Option<String>>,
    seen_options: Mutex<Vec<(bool, bool, bool)>>,
}

impl FakeFactory {
    pub(crate) fn unavailable(ids: &[&str]) -> Self {
        Self {
            unavailable: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Makes the first construction of `id` hang for a few seconds.
    pub(crate) fn stalling_once_on(self, id: &str) -> Self {
        *self.stall_once_on.lock().unwrap() = Some(id.to_string());
        self
    }

    pub(crate) fn seen_options(&self) -> Vec<(bool, bool, bool)> {
        self.seen_options.lock().unwrap().clone()
    }
}

impl VideoFactory for FakeFactory {
    type Video = String;

    async fn construct(
        &self,
        video_id: &str,
        _metadata: VideoMetadata,
        options: &PlaylistOptions,
    ) -> Result<String, ItemUnavailable> {
        self.seen_options
            .lock()
            .unwrap()
            .push((options.basic, options.gdata, options.size));
        let stall = {
            let mut stall_on = self.stall_once_on.lock().unwrap();
            if stall_on.as_deref() == Some(video_id) {
                *stall_on = None;
                true
            } else {
                false
            }
        };
        if stall {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if self.unavailable.contains(video_id) {
            Err(ItemUnavailable::new(video_id, "removed by uploader"))
        } else {
            Ok(video_id.to_string())
        }
    }
}

/// A progress callback that records every message it receives.
pub(crate) fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    (messages, move |msg: &str| {
        sink.lock().unwrap().push(msg.to_string())
    })
}
