//! Turns whatever the caller pasted (watch URL, short link or bare id) into a
//! video id.
//!
//! Whether the input parses as an absolute URL decides the strategy: URLs are
//! matched by host, everything else must already look like an 11 character id.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";
const MAIN_SITE_DOMAIN: &str = "youtube.com";

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("a YouTube URL or video ID is required")]
    Missing,

    #[error("invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("invalid video ID: {0}")]
    InvalidVideoId(String),

    #[error("could not extract a video ID from: {0}")]
    Unresolved(String),
}

/// A video id as accepted by the subtitle backend.
///
/// Ids taken from the path of a `youtu.be` link are not re-validated, so the
/// value is only guaranteed to match `^[a-zA-Z0-9_-]{11}$` for raw ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn resolve(input: &str) -> Result<Self, ResolveError> {
        if input.is_empty() {
            return Err(ResolveError::Missing);
        }

        match Url::parse(input) {
            Ok(url) => Self::from_url(&url, input),
            Err(_) => Self::from_raw(input),
        }
    }

    fn from_url(url: &Url, input: &str) -> Result<Self, ResolveError> {
        match url.host_str() {
            Some(SHORT_LINK_HOST) => url
                .path_segments()
                .and_then(|mut segments| segments.next())
                .filter(|segment| !segment.is_empty())
                .map(|segment| VideoId(segment.to_string()))
                .ok_or_else(|| ResolveError::InvalidUrl(input.to_string())),
            Some(host) if host.contains(MAIN_SITE_DOMAIN) => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
                .filter(|value| !value.is_empty())
                .map(VideoId)
                .ok_or_else(|| ResolveError::InvalidUrl(input.to_string())),
            _ => Err(ResolveError::Unresolved(input.to_string())),
        }
    }

    fn from_raw(input: &str) -> Result<Self, ResolveError> {
        if VIDEO_ID_RE.is_match(input) {
            Ok(VideoId(input.to_string()))
        } else {
            Err(ResolveError::InvalidVideoId(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(input: &str) -> Result<String, ResolveError> {
        VideoId::resolve(input).map(|id| id.as_str().to_string())
    }

    #[test]
    fn raw_ids_pass_through_unchanged() {
        for id in ["dQw4w9WgXcQ", "___________", "a-b_c-D_E-9", "00000000000", "ZZZZZZZZZZZ"] {
            assert_eq!(resolve(id).unwrap(), id);
        }
    }

    #[test]
    fn short_links_use_the_first_path_segment() {
        assert_eq!(resolve("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(
            resolve("https://youtu.be/dQw4w9WgXcQ?t=42").unwrap(),
            "dQw4w9WgXcQ"
        );
        // No format check on this branch.
        assert_eq!(resolve("https://youtu.be/abc").unwrap(), "abc");
    }

    #[test]
    fn short_link_without_a_path_is_an_invalid_url() {
        assert_eq!(
            resolve("https://youtu.be/"),
            Err(ResolveError::InvalidUrl("https://youtu.be/".into()))
        );
    }

    #[test]
    fn watch_urls_use_the_v_parameter() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=1").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("http://youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn watch_url_without_v_is_an_invalid_url() {
        assert!(matches!(
            resolve("https://www.youtube.com/watch"),
            Err(ResolveError::InvalidUrl(_))
        ));
        assert!(matches!(
            resolve("https://www.youtube.com/watch?v="),
            Err(ResolveError::InvalidUrl(_))
        ));
    }

    #[test]
    fn other_hosts_are_unresolved() {
        assert_eq!(
            resolve("https://vimeo.com/123456"),
            Err(ResolveError::Unresolved("https://vimeo.com/123456".into()))
        );
        assert!(matches!(
            resolve("mailto:someone@example.com"),
            Err(ResolveError::Unresolved(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(resolve(""), Err(ResolveError::Missing));
    }

    #[test]
    fn malformed_raw_ids_are_rejected() {
        for input in ["short", "dQw4w9WgXcQX", "dQw4w9WgXc!", " dQw4w9WgXcQ", "www.youtube.com/watch?v=dQw4w9WgXcQ"] {
            assert_eq!(
                resolve(input),
                Err(ResolveError::InvalidVideoId(input.to_string())),
                "input: {input}"
            );
        }
    }
}
