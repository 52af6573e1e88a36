//! `rmcp` server handler exposing the HTTP tools.
//!
//! Transport, framing and the initialize handshake belong to `rmcp`; this handler only lists the
//! tools and forwards calls to the [`ToolDispatcher`].

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use unrelated_http_request::ToolDispatcher;

pub const SERVER_NAME: &str = "mcp-http-request";

const INSTRUCTIONS: &str = "Make HTTP requests with http_get, http_post, http_put, http_patch \
and http_delete. Every tool takes an absolute `url` and optional `headers`; http_get also takes \
`queryParams`, and http_post/http_put/http_patch take an optional `body` (a string is sent \
verbatim, an object is sent as JSON). Non-2xx responses are returned normally with their status code.";

#[derive(Clone)]
pub struct HttpRequestServer {
    dispatcher: Arc<ToolDispatcher>,
}

impl HttpRequestServer {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl ServerHandler for HttpRequestServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::default();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = server_info;
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.dispatcher.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        self.dispatcher
            .call_tool(&request.name, &arguments)
            .await
            .map_err(ErrorData::from)
    }
}
