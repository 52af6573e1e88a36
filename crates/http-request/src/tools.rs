//! The fixed catalog of HTTP tools exposed over MCP.
//!
//! Tool annotations follow RFC 9110-style method semantics; every tool talks to an external
//! system, so `openWorldHint` is always set.

use reqwest::Method;
use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpTool {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpTool {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Resolve an MCP tool name (`http_get`, ...). Matching is exact.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Get => "http_get",
            Self::Post => "http_post",
            Self::Put => "http_put",
            Self::Patch => "http_patch",
            Self::Delete => "http_delete",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Get => {
                "Makes an HTTP GET request to the specified URL. Use this to retrieve data from an API or web server."
            }
            Self::Post => {
                "Makes an HTTP POST request to the specified URL with an optional body. Use this to create new resources or submit data to an API."
            }
            Self::Put => {
                "Makes an HTTP PUT request to the specified URL with an optional body. Use this to update or replace existing resources in an API."
            }
            Self::Patch => {
                "Makes an HTTP PATCH request to the specified URL with an optional body. Use this to partially update existing resources in an API."
            }
            Self::Delete => {
                "Makes an HTTP DELETE request to the specified URL. Use this to delete resources from an API."
            }
        }
    }

    /// Whether the tool accepts a request body.
    #[must_use]
    pub fn accepts_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Whether the tool accepts query parameters.
    #[must_use]
    pub fn accepts_query_params(self) -> bool {
        matches!(self, Self::Get)
    }

    /// JSON Schema advertised as the tool's `inputSchema`.
    #[must_use]
    pub fn input_schema(self) -> Value {
        let method = self.method();
        let mut properties = serde_json::Map::new();
        properties.insert(
            "url".to_string(),
            json!({
                "type": "string",
                "format": "uri",
                "description": format!("URL to send {method} request to"),
            }),
        );
        properties.insert(
            "headers".to_string(),
            json!({
                "type": "object",
                "additionalProperties": { "type": "string" },
                "description": "Optional HTTP headers to include in the request as a JSON object",
            }),
        );
        if self.accepts_query_params() {
            properties.insert(
                "queryParams".to_string(),
                json!({
                    "type": "object",
                    "additionalProperties": { "type": "string" },
                    "description": "Optional query parameters to include in the request as a JSON object",
                }),
            );
        }
        if self.accepts_body() {
            properties.insert(
                "body".to_string(),
                json!({
                    "anyOf": [{ "type": "string" }, { "type": "object" }, { "type": "array" }],
                    "description": "Optional request body. Can be a JSON object or a string. If an object is provided, it will be sent as JSON",
                }),
            );
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": ["url"],
        })
    }

    #[must_use]
    pub fn annotations(self) -> ToolAnnotations {
        let (read_only, destructive, idempotent) = match self {
            Self::Get => (true, false, Some(true)),
            Self::Post => (false, false, Some(false)),
            Self::Put | Self::Delete => (false, true, Some(true)),
            // PATCH may or may not be idempotent; do not guess.
            Self::Patch => (false, true, None),
        };
        ToolAnnotations {
            title: None,
            read_only_hint: Some(read_only),
            destructive_hint: Some(destructive),
            idempotent_hint: idempotent,
            open_world_hint: Some(true),
        }
    }

    /// Build the MCP `Tool` definition.
    #[must_use]
    pub fn to_tool(self) -> Tool {
        let schema = self
            .input_schema()
            .as_object()
            .cloned()
            .unwrap_or_else(JsonObject::new);
        let mut tool = Tool::new(self.name(), self.description(), Arc::new(schema));
        tool.annotations = Some(self.annotations());
        tool
    }
}

impl fmt::Display for HttpTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All tools, in advertisement order.
#[must_use]
pub fn list_tools() -> Vec<Tool> {
    HttpTool::ALL.into_iter().map(HttpTool::to_tool).collect()
}
