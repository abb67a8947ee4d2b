// src/error.rs
use serde_json::json;

use crate::connectors::youtube::transcript::TranscriptError;
use crate::connectors::youtube::video_id::ResolveError;

/// Every failure a request can end in. The set is closed so the JSON-RPC
/// mapping below stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ConnectorError {
    pub fn code(&self) -> i64 {
        match self {
            ConnectorError::InvalidParams(_) => -32602,
            ConnectorError::MethodNotFound(_) => -32601,
            ConnectorError::InternalError(_) => -32603,
            ConnectorError::ParseError(_) => -32700,
        }
    }

    pub fn code_str(&self) -> &'static str {
        match self {
            ConnectorError::InvalidParams(_) => "invalid_params",
            ConnectorError::MethodNotFound(_) => "method_not_found",
            ConnectorError::InternalError(_) => "internal_error",
            ConnectorError::ParseError(_) => "parse_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ConnectorError::InvalidParams(msg)
            | ConnectorError::MethodNotFound(msg)
            | ConnectorError::InternalError(msg)
            | ConnectorError::ParseError(msg) => msg,
        }
    }

    pub fn to_jsonrpc_error(&self) -> serde_json::Value {
        json!({
            "code": self.code(),
            "message": self.message(),
            "data": { "kind": self.code_str() },
        })
    }
}

impl From<ResolveError> for ConnectorError {
    fn from(err: ResolveError) -> Self {
        ConnectorError::InvalidParams(err.to_string())
    }
}

impl From<TranscriptError> for ConnectorError {
    fn from(err: TranscriptError) -> Self {
        ConnectorError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::InternalError(format!("Serde JSON error: {}", err))
    }
}
