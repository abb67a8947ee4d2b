use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

use super::video_id::VideoId;

/// One timed caption line as returned by a subtitle backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TranscriptLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            duration: None,
        }
    }
}

/// Failure reported by a subtitle backend, carried as its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SourceError(pub String);

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to fetch transcript: {0}")]
    Retrieval(String),
}

/// Anything that can hand back the caption lines of a video in a language.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_lines(
        &self,
        video_id: &VideoId,
        lang: &str,
    ) -> Result<Vec<TranscriptLine>, SourceError>;
}

/// Fetches caption lines and flattens them into a single line of text.
#[derive(Clone)]
pub struct TranscriptService {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptService {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, video_id: &VideoId, lang: &str) -> Result<String, TranscriptError> {
        // Guard against panics inside the backend
        let lines = AssertUnwindSafe(self.source.fetch_lines(video_id, lang))
            .catch_unwind()
            .await
            .map_err(|_| TranscriptError::Retrieval("transcript source panicked".to_string()))?
            .map_err(|e| {
                error!(error = %e, video_id = %video_id, lang, "Failed to fetch transcript");
                TranscriptError::Retrieval(e.to_string())
            })?;

        debug!(video_id = %video_id, lines = lines.len(), "Fetched transcript lines");
        Ok(format_transcript(&lines))
    }
}

/// Trims every line, drops the blank ones and joins the rest with a space.
pub fn format_transcript(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(feature = "youtube")]
pub use self::youtube_source::YouTubeTranscriptSource;

#[cfg(feature = "youtube")]
mod youtube_source {
    use super::*;
    use yt_transcript_rs::YouTubeTranscriptApi;

    /// Scrapes captions from youtube.com through `yt-transcript-rs`.
    pub struct YouTubeTranscriptSource {
        api: YouTubeTranscriptApi,
    }

    impl YouTubeTranscriptSource {
        pub fn new() -> Result<Self, SourceError> {
            let api = YouTubeTranscriptApi::new(None, None, None)
                .map_err(|e| SourceError::new(e.to_string()))?;
            Ok(Self { api })
        }
    }

    #[async_trait]
    impl TranscriptSource for YouTubeTranscriptSource {
        async fn fetch_lines(
            &self,
            video_id: &VideoId,
            lang: &str,
        ) -> Result<Vec<TranscriptLine>, SourceError> {
            let fetched = self
                .api
                .fetch_transcript(video_id.as_str(), &[lang], false)
                .await
                .map_err(|e| SourceError::new(e.to_string()))?;

            Ok(fetched
                .parts()
                .iter()
                .map(|part| TranscriptLine {
                    text: part.text.clone(),
                    start: Some(part.start),
                    duration: Some(part.duration),
                })
                .collect())
        }
    }
}
