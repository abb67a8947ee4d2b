use serde_json::Value;
use std::future::Future;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader as AsyncBufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::error::ConnectorError;
use crate::mcp_server::JsonRpcHandler;

/// Stdio transport for MCP server
pub struct StdioTransport {
    handler: JsonRpcHandler,
}

impl StdioTransport {
    pub fn new(handler: JsonRpcHandler) -> Self {
        Self { handler }
    }

    /// Run the stdio transport until stdin closes or `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await
    }

    /// Reads newline-delimited JSON-RPC messages from `reader` and writes one
    /// response line per request to `writer`.
    pub async fn serve<R, W, F>(&self, reader: R, mut writer: W, shutdown: F) -> io::Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        info!("Starting stdio transport");

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        // The reader task owns the only sender, so EOF closes the channel.
        let reader_task = tokio::spawn(async move {
            let mut reader = AsyncBufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!("EOF reached on stdin");
                        break;
                    }
                    Ok(_) => {
                        if !line.trim().is_empty() {
                            if let Err(e) = tx.send(line.clone()) {
                                error!("Failed to send line: {}", e);
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Error reading from stdin: {}", e);
                        break;
                    }
                }
            }
        });

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping stdio transport");
                    break;
                }
                next = rx.recv() => match next {
                    Some(line) => {
                        if let Err(e) = self.process_line(&line, &mut writer).await {
                            error!("Error processing line: {}", e);
                        }
                    }
                    None => break,
                },
            }
        }

        reader_task.abort();
        writer.flush().await?;
        info!("Stdio transport stopped");

        Ok(())
    }

    /// Process a single line of input
    async fn process_line<W>(&self, line: &str, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        debug!("Processing line: {}", line.trim_end());

        match serde_json::from_str::<Value>(line) {
            Ok(request) => {
                if let Some(response) = self.handler.handle_request(request).await {
                    write_response(writer, &response).await?;
                }
            }
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);

                let error_response = serde_json::json!({
                    "jsonrpc": "2.0",
                    "error": ConnectorError::ParseError(e.to_string()).to_jsonrpc_error(),
                    "id": null
                });

                write_response(writer, &error_response).await?;
            }
        }

        Ok(())
    }
}

async fn write_response<W>(writer: &mut W, response: &Value) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_str = serde_json::to_string(response)?;

    writer.write_all(response_str.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    debug!("Sent response: {}", response_str);

    Ok(())
}
