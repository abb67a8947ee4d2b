use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tubescribe_core::mcp_server::{JsonRpcHandler, McpServer};
use tubescribe_core::{
    SourceError, TranscriptLine, TranscriptSource, VideoId, YouTubeTranscriptConnector,
};

struct CannedSource;

#[async_trait]
impl TranscriptSource for CannedSource {
    async fn fetch_lines(
        &self,
        video_id: &VideoId,
        lang: &str,
    ) -> Result<Vec<TranscriptLine>, SourceError> {
        match (video_id.as_str(), lang) {
            ("dQw4w9WgXcQ", "en") => Ok(vec![
                TranscriptLine::new("  never gonna "),
                TranscriptLine::new("\n"),
                TranscriptLine::new("give you up"),
            ]),
            _ => Err(SourceError::new(format!(
                "Could not retrieve a transcript for the video {}",
                video_id
            ))),
        }
    }
}

fn handler() -> JsonRpcHandler {
    let connector = YouTubeTranscriptConnector::new(Arc::new(CannedSource));
    JsonRpcHandler::new(McpServer::new(Arc::new(connector)))
}

async fn call(handler: &JsonRpcHandler, id: u64, method: &str, params: Value) -> Value {
    handler
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await
        .expect("requests with an id get a response")
}

#[tokio::test]
async fn initialize_reports_tools_capability() {
    let handler = handler();

    let response = call(
        &handler,
        1,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-host", "version": "1.0.0"}
        }),
    )
    .await;

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "tubescribe");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn lists_only_get_transcript() {
    let handler = handler();

    let response = call(&handler, 2, "tools/list", json!({})).await;
    let tools = response["result"]["tools"].as_array().unwrap();

    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_transcript");
    assert_eq!(tools[0]["inputSchema"]["properties"]["url"]["type"], "string");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["url"]));
}

#[tokio::test]
async fn call_returns_transcript_envelope() {
    let handler = handler();

    let response = call(
        &handler,
        3,
        "tools/call",
        json!({
            "name": "get_transcript",
            "arguments": {"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["isError"], false);
    let content = &result["content"][0];
    assert_eq!(content["type"], "text");
    assert_eq!(content["text"], "never gonna give you up");
    assert_eq!(content["metadata"]["videoId"], "dQw4w9WgXcQ");
    assert_eq!(content["metadata"]["language"], "en");
    assert_eq!(content["metadata"]["charCount"], 23);
    assert!(content["metadata"]["timestamp"]
        .as_str()
        .unwrap()
        .ends_with('Z'));
}

#[tokio::test]
async fn bad_input_is_invalid_params() {
    let handler = handler();

    for arguments in [
        json!({"url": 123}),
        json!({"url": "dQw4w9WgXcQ", "lang": 5}),
        json!({"url": "not-an-id"}),
        json!({"url": "https://www.youtube.com/watch"}),
    ] {
        let response = call(
            &handler,
            4,
            "tools/call",
            json!({"name": "get_transcript", "arguments": arguments}),
        )
        .await;
        assert_eq!(response["error"]["code"], -32602, "{}", response);
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn missing_arguments_are_invalid_params() {
    let handler = handler();

    let response = call(&handler, 5, "tools/call", json!({"name": "get_transcript"})).await;
    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn retrieval_failure_is_internal_error() {
    let handler = handler();

    let response = call(
        &handler,
        6,
        "tools/call",
        json!({"name": "get_transcript", "arguments": {"url": "dQw4w9WgXcQ", "lang": "ja"}}),
    )
    .await;

    assert_eq!(response["error"]["code"], -32603);
    assert_eq!(
        response["error"]["message"],
        "failed to fetch transcript: Could not retrieve a transcript for the video dQw4w9WgXcQ"
    );
}

#[tokio::test]
async fn unknown_tool_and_method_are_method_not_found() {
    let handler = handler();

    let response = call(
        &handler,
        7,
        "tools/call",
        json!({"name": "search_videos", "arguments": {}}),
    )
    .await;
    assert_eq!(response["error"]["code"], -32601);

    let response = call(&handler, 8, "resources/list", json!({})).await;
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn ping_answers_with_empty_result() {
    let handler = handler();

    let response = call(&handler, 9, "ping", json!({})).await;
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn notifications_get_no_response() {
    let handler = handler();

    let response = handler
        .handle_request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await;
    assert!(response.is_none());
}
