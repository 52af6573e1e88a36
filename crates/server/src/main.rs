//! Stdio MCP server exposing `http_get`, `http_post`, `http_put`, `http_patch` and `http_delete`.

mod cli;
mod logging;
mod server;

use anyhow::Context as _;
use clap::Parser as _;
use rmcp::ServiceExt as _;
use tracing::info;
use unrelated_http_request::{HttpExecutor, ToolDispatcher};

use crate::cli::Cli;
use crate::server::HttpRequestServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format)?;

    let config = cli.server_config();
    info!(
        user_agent = %config.user_agent,
        proxy = config.proxy_url.is_some(),
        timeout_secs = config.request_timeout.as_secs(),
        "starting {} v{}",
        server::SERVER_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let executor = HttpExecutor::new(config).context("build HTTP executor")?;
    let handler = HttpRequestServer::new(ToolDispatcher::new(executor));

    let service = handler
        .serve(rmcp::transport::stdio())
        .await
        .context("start MCP stdio server")?;

    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl-C, shutting down");
            cancel.cancel();
        }
    });

    let reason = service.waiting().await.context("MCP server task failed")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
