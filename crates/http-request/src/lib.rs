//! HTTP request tools for Unrelated MCP.
//!
//! Exposes `http_get`, `http_post`, `http_put`, `http_patch` and `http_delete`: each tool call
//! is validated into a [`request::RequestSpec`], executed once by the
//! [`executor::HttpExecutor`], and rendered into a single text block.
//!
//! It intentionally contains **no** protocol transport; the server crate wires it into `rmcp`.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod format;
pub mod request;
pub mod safety;
pub mod tools;

pub use config::{DEFAULT_USER_AGENT, REQUEST_TIMEOUT, ServerConfig};
pub use dispatcher::ToolDispatcher;
pub use error::{HttpRequestError, Result};
pub use executor::{BINARY_BODY_SENTINEL, HttpExecutor, ResponseBody, ResponseResult};
