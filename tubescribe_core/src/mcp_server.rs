use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{tools::ToolOutput, Connector, ConnectorError};
use rmcp::model::*;

pub const SERVER_NAME: &str = "tubescribe";

/// MCP server exposing the tools of a single connector.
///
/// Connectors hold no per-request state, so the server shares its connector
/// without locking and calls may run concurrently.
pub struct McpServer {
    connector: Arc<dyn Connector>,
}

impl McpServer {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    pub async fn get_capabilities(&self) -> ServerCapabilities {
        self.connector.capabilities().await
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: InitializeRequestParam,
    ) -> Result<InitializeResult, ConnectorError> {
        info!(
            client = %request.client_info.name,
            client_version = %request.client_info.version,
            "MCP Server initializing"
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: self.get_capabilities().await,
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "{} Call get_transcript with a YouTube URL or video ID and an optional language code.",
                self.connector.description()
            )),
        })
    }

    pub async fn handle_list_tools(
        &self,
        request: Option<PaginatedRequestParam>,
    ) -> Result<ListToolsResult, ConnectorError> {
        self.connector.list_tools(request).await
    }

    pub async fn handle_call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<ToolOutput, ConnectorError> {
        debug!(tool = %request.name, "Calling tool");
        self.connector.call_tool(request).await
    }
}

/// JSON-RPC message handler for the MCP server
pub struct JsonRpcHandler {
    server: McpServer,
}

impl JsonRpcHandler {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    /// Process a JSON-RPC message. Notifications (messages without an `id`)
    /// never produce a response.
    pub async fn handle_request(&self, request: Value) -> Option<Value> {
        debug!("Handling JSON-RPC request: {:?}", request);

        let method = request
            .get("method")
            .and_then(|m| m.as_str())
            .unwrap_or("")
            .to_string();

        let Some(id) = request.get("id").cloned() else {
            self.handle_notification(&method);
            return None;
        };

        let params = request.get("params").cloned().unwrap_or(json!({}));

        let result = match method.as_str() {
            "initialize" => match decode_params::<InitializeRequestParam>(params) {
                Ok(req) => self
                    .server
                    .handle_initialize(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(ConnectorError::from)),
                Err(e) => Err(e),
            },
            "ping" => Ok(json!({})),
            "tools/list" => match decode_params::<Option<PaginatedRequestParam>>(params) {
                Ok(req) => self
                    .server
                    .handle_list_tools(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(ConnectorError::from)),
                Err(e) => Err(e),
            },
            "tools/call" => match decode_params::<CallToolRequestParam>(params) {
                Ok(req) => self
                    .server
                    .handle_call_tool(req)
                    .await
                    .and_then(|r| serde_json::to_value(r).map_err(ConnectorError::from)),
                Err(e) => Err(e),
            },
            other => Err(ConnectorError::MethodNotFound(format!(
                "Unknown method: {}",
                other
            ))),
        };

        Some(match result {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "result": result,
                "id": id,
            }),
            Err(error) => json!({
                "jsonrpc": "2.0",
                "error": error.to_jsonrpc_error(),
                "id": id,
            }),
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("Client finished initialization"),
            "notifications/cancelled" => {
                debug!("Ignoring cancellation; tool calls always run to completion")
            }
            other => warn!(method = %other, "Ignoring unknown notification"),
        }
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, ConnectorError> {
    serde_json::from_value(params).map_err(|e| ConnectorError::InvalidParams(e.to_string()))
}
