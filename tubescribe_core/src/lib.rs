// src/lib.rs
pub mod config;
pub mod connectors;
pub mod error;
pub mod mcp_server;
pub mod tools;
pub mod transport;

// Re-export types from rmcp that users of the library might need
pub use rmcp::model::{
    CallToolRequestParam, Implementation, InitializeRequestParam, InitializeResult,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool,
};

pub use crate::connectors::youtube::transcript::{
    SourceError, TranscriptError, TranscriptLine, TranscriptService, TranscriptSource,
};
pub use crate::connectors::youtube::video_id::{ResolveError, VideoId};
pub use crate::connectors::youtube::YouTubeTranscriptConnector;
pub use crate::error::ConnectorError;
pub use crate::tools::{ToolContent, ToolOutput, TranscriptMetadata};

use async_trait::async_trait;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the unique name of the connector.
    fn name(&self) -> &'static str;

    /// Returns a description of the connector.
    fn description(&self) -> &'static str;

    /// Returns the MCP capabilities of this connector.
    async fn capabilities(&self) -> ServerCapabilities;

    async fn list_tools(
        &self,
        request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, ConnectorError>;

    /// Runs one tool to completion. Unknown tool names are `MethodNotFound`.
    async fn call_tool(&self, request: CallToolRequestParam) -> Result<ToolOutput, ConnectorError>;
}
