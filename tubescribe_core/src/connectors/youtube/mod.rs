// src/connectors/youtube/mod.rs

pub mod transcript;
pub mod video_id;

use crate::error::ConnectorError;
use crate::tools::{ToolOutput, TranscriptMetadata};
use crate::Connector;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rmcp::model::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{info, warn};

use self::transcript::{TranscriptService, TranscriptSource};
use self::video_id::VideoId;

pub const GET_TRANSCRIPT: &str = "get_transcript";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTranscriptInput {
    /// YouTube video URL or bare 11 character video ID
    pub url: String,
    /// Subtitle language code (e.g. 'en', 'ja')
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Clone)]
pub struct YouTubeTranscriptConnector {
    transcripts: TranscriptService,
    default_language: String,
}

impl YouTubeTranscriptConnector {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self {
            transcripts: TranscriptService::new(source),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Connector backed by the live youtube.com caption scraper.
    #[cfg(feature = "youtube")]
    pub fn from_youtube() -> Result<Self, ConnectorError> {
        let source = transcript::YouTubeTranscriptSource::new()
            .map_err(|e| ConnectorError::InternalError(e.to_string()))?;
        Ok(Self::new(Arc::new(source)))
    }

    /// Language used when a call does not pass `lang`.
    pub fn with_default_language(mut self, lang: impl Into<String>) -> Self {
        self.default_language = lang.into();
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    fn transcript_tool(&self) -> Tool {
        let schema = json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "YouTube video URL or video ID"
                },
                "lang": {
                    "type": "string",
                    "description": "Subtitle language code (e.g. 'en', 'ja')",
                    "default": self.default_language
                }
            },
            "required": ["url"]
        });

        Tool {
            name: Cow::Borrowed(GET_TRANSCRIPT),
            title: None,
            description: Some(Cow::Borrowed(
                "Fetch the subtitles of a YouTube video as plain text, given its URL or video ID.",
            )),
            input_schema: Arc::new(match schema {
                Value::Object(map) => map,
                _ => JsonObject::new(),
            }),
            output_schema: None,
            annotations: None,
            icons: None,
        }
    }

    async fn get_transcript(&self, input: GetTranscriptInput) -> Result<ToolOutput, ConnectorError> {
        let language = input
            .lang
            .unwrap_or_else(|| self.default_language.clone());

        let video_id = VideoId::resolve(&input.url)?;
        info!(video_id = %video_id, language = %language, "Processing video");

        let text = self.transcripts.fetch(&video_id, &language).await?;
        let char_count = text.chars().count();
        info!(video_id = %video_id, char_count, "Transcript fetched");

        Ok(ToolOutput::text(
            text,
            TranscriptMetadata {
                video_id: video_id.to_string(),
                language,
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                char_count,
            },
        ))
    }
}

#[async_trait]
impl Connector for YouTubeTranscriptConnector {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn description(&self) -> &'static str {
        "Fetches YouTube subtitle tracks as plain text."
    }

    async fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, ConnectorError> {
        Ok(ListToolsResult {
            tools: vec![self.transcript_tool()],
            next_cursor: None,
        })
    }

    async fn call_tool(&self, request: CallToolRequestParam) -> Result<ToolOutput, ConnectorError> {
        let name = request.name.as_ref();
        let args = request.arguments.unwrap_or_default();

        match name {
            GET_TRANSCRIPT => {
                let input: GetTranscriptInput = serde_json::from_value(Value::Object(args))
                    .map_err(|e| {
                        ConnectorError::InvalidParams(format!(
                            "invalid {} arguments: {}",
                            GET_TRANSCRIPT, e
                        ))
                    })?;

                let result = self.get_transcript(input).await;
                if let Err(e) = &result {
                    warn!(error = %e, "get_transcript failed");
                }
                result
            }
            _ => Err(ConnectorError::MethodNotFound(format!(
                "Unknown tool: {}",
                name
            ))),
        }
    }
}
