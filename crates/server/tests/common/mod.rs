use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::net::TcpListener;
use unrelated_test_support::StdioMcpSession;

pub const TIMEOUT: Duration = Duration::from_secs(10);

/// In-process upstream HTTP server the tools talk to.
pub struct Upstream {
    pub base_url: String,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl Drop for Upstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn echo_handler(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let headers: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), json!(v.to_str().unwrap_or_default())))
        .collect();
    (
        [("x-upstream", "echo")],
        axum::Json(json!({
            "method": method.as_str(),
            "path": uri.path(),
            "query": uri.query(),
            "headers": headers,
            "body": String::from_utf8_lossy(&body),
        })),
    )
}

/// `/echo/*` reflects the request as JSON; `/missing` answers 404 "not found".
pub async fn start_upstream() -> anyhow::Result<Upstream> {
    let app = Router::new()
        .route("/echo/{*path}", any(echo_handler))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "not found") }));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    });
    tokio::spawn(async move { server.await });

    Ok(Upstream {
        base_url: format!("http://{addr}"),
        shutdown_tx: Some(shutdown_tx),
    })
}

pub async fn spawn_server(args: &[&str]) -> anyhow::Result<StdioMcpSession> {
    let bin = env!("CARGO_BIN_EXE_unrelated-mcp-http-request");
    let mut full_args = vec!["--log-level", "warn"];
    full_args.extend_from_slice(args);
    StdioMcpSession::spawn(bin, &full_args, TIMEOUT).await
}

pub async fn call_tool(
    session: &mut StdioMcpSession,
    name: &str,
    arguments: Value,
) -> anyhow::Result<Value> {
    session
        .request(
            "tools/call",
            json!({ "name": name, "arguments": arguments }),
            TIMEOUT,
        )
        .await
}

/// Parse the JSON echoed by `/echo/*` out of a formatted tool response.
pub fn echoed_body(text: &str) -> anyhow::Result<Value> {
    let (_, body) = text
        .split_once("\n\nResponse Body:\n")
        .ok_or_else(|| anyhow::anyhow!("no response body section in: {text}"))?;
    Ok(serde_json::from_str(body)?)
}
