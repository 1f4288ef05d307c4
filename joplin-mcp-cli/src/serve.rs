//! The `serve` command: MCP over stdio

use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use joplin_mcp::{JoplinApi, JoplinConfig, JoplinMcpServer};
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use std::sync::Arc;

/// Serve the Joplin tools until the client disconnects or Ctrl-C
pub async fn run_server(config: JoplinConfig) -> i32 {
    tracing::info!(
        "Serving Joplin at {} (token {})",
        config.base_url(),
        config.masked_token()
    );

    let api = Arc::new(JoplinApi::new(&config));
    let server = JoplinMcpServer::new(api);

    let running = match serve_server(server, stdio()).await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            return EXIT_WARNING;
        }
    };
    tracing::info!("MCP server started");

    tokio::select! {
        result = running.waiting() => match result {
            Ok(reason) => tracing::info!("MCP server shut down: {:?}", reason),
            Err(e) => {
                tracing::error!("MCP server task failed: {}", e);
                return EXIT_WARNING;
            }
        },
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            }
            tracing::info!("Shutdown signal received");
        }
    }

    EXIT_SUCCESS
}
