//! Tool Dispatcher: tool name + raw arguments in, one formatted text block out.

use crate::error::{HttpRequestError, Result};
use crate::executor::HttpExecutor;
use crate::format::format_response;
use crate::request::RequestSpec;
use crate::tools::{HttpTool, list_tools};
use rmcp::model::{CallToolResult, Content, Tool};
use serde_json::Value;
use tracing::{Instrument as _, debug, info_span, warn};

/// Stateless apart from the executor (and its immutable config); safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    executor: HttpExecutor,
}

impl ToolDispatcher {
    #[must_use]
    pub fn new(executor: HttpExecutor) -> Self {
        Self { executor }
    }

    /// MCP tool definitions for every recognized tool.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        list_tools()
    }

    /// Validate, execute and format one tool invocation.
    ///
    /// # Errors
    ///
    /// - [`HttpRequestError::UnknownTool`] if `tool_name` is not recognized
    /// - [`HttpRequestError::InvalidArguments`] if the arguments do not match the tool's shape
    ///   (no request is sent)
    /// - [`HttpRequestError::RequestFailure`] if the HTTP exchange fails at the transport level
    pub async fn dispatch(&self, tool_name: &str, arguments: &Value) -> Result<String> {
        let tool = HttpTool::from_name(tool_name)
            .ok_or_else(|| HttpRequestError::UnknownTool(tool_name.to_string()))?;

        let span = info_span!("tool_call", tool = %tool);
        async move {
            let spec = RequestSpec::from_arguments(tool, arguments)?;
            let method = spec.method();
            let url = spec.url().to_string();

            match self.executor.execute(&spec).await {
                Ok(result) => {
                    debug!(status = result.status_code, "formatting response");
                    Ok(format_response(method.as_str(), &url, &result))
                }
                Err(e) => {
                    warn!(error = %e, "HTTP tool call failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// [`Self::dispatch`] wrapped as an MCP tool result with a single text content block.
    ///
    /// # Errors
    ///
    /// Same as [`Self::dispatch`].
    pub async fn call_tool(&self, tool_name: &str, arguments: &Value) -> Result<CallToolResult> {
        let text = self.dispatch(tool_name, arguments).await?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    fn dispatcher() -> ToolDispatcher {
        ToolDispatcher::new(HttpExecutor::new(ServerConfig::default()).expect("executor"))
    }

    async fn serve(app: Router) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local_addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let err = dispatcher()
            .dispatch("http_nonexistent", &json!({ "url": "https://example.com" }))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpRequestError::UnknownTool(ref n) if n == "http_nonexistent"));
    }

    #[tokio::test]
    async fn missing_url_fails_before_any_network_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                "hit"
            }
        });
        let (base_url, handle) = serve(app).await;
        let d = dispatcher();

        let err = d.dispatch("http_get", &json!({})).await.unwrap_err();
        assert!(
            matches!(err, HttpRequestError::InvalidArguments { ref tool, .. } if tool == "http_get")
        );

        // A reachable URL with a malformed sibling field must not be contacted either.
        let err = d
            .dispatch(
                "http_post",
                &json!({ "url": format!("{base_url}/x"), "headers": { "X-N": 1 } }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HttpRequestError::InvalidArguments { .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn not_found_is_formatted_as_success() {
        async fn missing() -> impl IntoResponse {
            (StatusCode::NOT_FOUND, [("x-reason", "gone")], "not found")
        }
        let (base_url, handle) = serve(Router::new().route("/thing", get(missing))).await;
        let url = format!("{base_url}/thing");

        let text = dispatcher()
            .dispatch("http_get", &json!({ "url": url }))
            .await
            .expect("404 is a successful dispatch");

        assert!(text.starts_with(&format!("HTTP GET request to {url}\n\nStatus Code: 404\n")));
        assert!(text.contains("\nx-reason: gone\n"));
        assert!(text.ends_with("\n\nResponse Body:\nnot found"));

        handle.abort();
    }

    #[tokio::test]
    async fn call_tool_wraps_text_content() {
        let (base_url, handle) =
            serve(Router::new().route("/ok", get(|| async { "fine" }))).await;

        let result = dispatcher()
            .call_tool("http_get", &json!({ "url": format!("{base_url}/ok") }))
            .await
            .expect("call_tool");

        let v = serde_json::to_value(&result).expect("CallToolResult serializes");
        let content = v
            .get("content")
            .and_then(Value::as_array)
            .expect("content array");
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].get("type").and_then(Value::as_str), Some("text"));
        let text = content[0]
            .get("text")
            .and_then(Value::as_str)
            .expect("text");
        assert!(text.ends_with("Response Body:\nfine"));
        assert_ne!(v.get("isError"), Some(&json!(true)));

        handle.abort();
    }

    #[tokio::test]
    async fn concurrent_invocations_are_independent() {
        let app = Router::new()
            .route("/a", get(|| async { "alpha" }))
            .route("/b", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "beta") }));
        let (base_url, handle) = serve(app).await;
        let d = dispatcher();

        let args_a = json!({ "url": format!("{base_url}/a") });
        let args_b = json!({ "url": format!("{base_url}/b") });
        let args_c = json!({ "url": "not a url" });

        let (a, b, c) = tokio::join!(
            d.dispatch("http_get", &args_a),
            d.dispatch("http_get", &args_b),
            d.dispatch("http_put", &args_c),
        );

        assert!(a.expect("a").ends_with("alpha"));
        let b = b.expect("b");
        assert!(b.contains("Status Code: 500"));
        assert!(b.ends_with("beta"));
        assert!(matches!(c, Err(HttpRequestError::InvalidArguments { .. })));

        handle.abort();
    }
}
