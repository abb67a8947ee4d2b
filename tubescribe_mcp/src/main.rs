use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tubescribe_core::{
    config::ServerConfig,
    mcp_server::{JsonRpcHandler, McpServer},
    transport::StdioTransport,
    YouTubeTranscriptConnector,
};

#[cfg(not(feature = "youtube"))]
compile_error!("tubescribe_mcp needs the `youtube` feature for its transcript backend");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_err) = match ServerConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (ServerConfig::default(), Some(err)),
    };

    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| EnvFilter::new("tubescribe=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(err) = config_err {
        warn!("Config load failed, continuing with defaults: {}", err);
    }

    info!("Starting tubescribe MCP server");

    let connector = YouTubeTranscriptConnector::from_youtube()
        .map_err(|e| {
            error!("Transcript backend init failed: {}", e);
            e
        })?
        .with_default_language(config.default_language.clone());

    let server = McpServer::new(Arc::new(connector));
    let handler = JsonRpcHandler::new(server);
    let transport = StdioTransport::new(handler);

    info!(
        default_language = %config.default_language,
        "MCP Server ready, listening on stdio"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    if let Err(e) = transport.run(shutdown).await {
        error!("Transport error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}
