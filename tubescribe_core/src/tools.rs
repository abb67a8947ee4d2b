//! Wire shapes returned from `tools/call`.

use serde::{Deserialize, Serialize};

/// Result envelope of a successful tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: String, metadata: TranscriptMetadata) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text,
                metadata: Some(metadata),
            }],
            is_error: false,
        }
    }

    /// Text of the first text block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            ToolContent::Text { text, .. } => Some(text.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<TranscriptMetadata>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMetadata {
    pub video_id: String,
    pub language: String,
    /// ISO-8601 UTC time the transcript was produced.
    pub timestamp: String,
    pub char_count: usize,
}
