//! Error types for `unrelated-http-request`.

use rmcp::model::{ErrorCode, ErrorData};
use thiserror::Error;

/// Main error type for HTTP request tools.
#[derive(Error, Debug)]
pub enum HttpRequestError {
    /// Tool arguments are missing or malformed. Raised before any network activity.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Tool name is not one of the recognized HTTP tools.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The outbound exchange could not be completed (DNS, connect, TLS, timeout, body read).
    #[error("Failed to make {method} request to {url}: {cause}")]
    RequestFailure {
        method: String,
        url: String,
        cause: String,
    },

    /// Startup configuration errors (invalid proxy URL, client construction).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HttpRequestError {
    pub(crate) fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// MCP JSON-RPC error code reported for this error.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidArguments { .. } | Self::UnknownTool(_) => ErrorCode::INVALID_PARAMS,
            Self::RequestFailure { .. } | Self::Config(_) => ErrorCode::INTERNAL_ERROR,
        }
    }
}

impl From<HttpRequestError> for ErrorData {
    fn from(value: HttpRequestError) -> Self {
        ErrorData::new(value.error_code(), value.to_string(), None)
    }
}

/// Result type alias for HTTP request tool operations.
pub type Result<T> = std::result::Result<T, HttpRequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_invalid_params() {
        let e: ErrorData = HttpRequestError::UnknownTool("http_nonexistent".to_string()).into();
        assert_eq!(e.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(e.message, "Unknown tool: http_nonexistent");

        let e: ErrorData = HttpRequestError::invalid_arguments("http_get", "url: missing").into();
        assert_eq!(e.code, ErrorCode::INVALID_PARAMS);
        assert!(e.message.contains("url: missing"));
    }

    #[test]
    fn request_failure_maps_to_internal_error() {
        let e: ErrorData = HttpRequestError::RequestFailure {
            method: "DELETE".to_string(),
            url: "http://127.0.0.1:9/x".to_string(),
            cause: "operation timed out".to_string(),
        }
        .into();
        assert_eq!(e.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(
            e.message,
            "Failed to make DELETE request to http://127.0.0.1:9/x: operation timed out"
        );
    }
}
