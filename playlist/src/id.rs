//! Playlist identifier extraction.

use crate::error::PlaylistError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Regular playlists start with `PL`, mixes with `RD` followed by the seed video id, liked
/// videos with `LL`, uploads with `UU` and favorites with `FL`.
static PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:RD|PL|LL|UU|FL)[-_0-9a-zA-Z]+$").expect("valid regex"));

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com"];

/// A validated YouTube playlist id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Parses either a bare playlist id or a YouTube URL whose `list` parameter holds one.
    pub fn parse(input: &str) -> Result<Self, PlaylistError> {
        extract_playlist_id(input)
            .map(Self)
            .ok_or_else(|| PlaylistError::InvalidPlaylistId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaylistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts a playlist id from `input`.
///
/// Accepts a bare id (`PLxyz123`) or a `youtube.com` URL, with or without scheme, such as
/// `https://www.youtube.com/playlist?list=PLxyz123`. Returns `None` for anything else.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();
    if PLAYLIST_ID.is_match(input) {
        return Some(input.to_string());
    }

    let url = if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("https://{input}"))
    }
    .ok()?;

    if !YOUTUBE_HOSTS.contains(&url.host_str()?) {
        return None;
    }

    let (_, list) = url.query_pairs().find(|(key, _)| key == "list")?;
    PLAYLIST_ID.is_match(&list).then(|| list.into_owned())
}
