//! Process-wide configuration shared by every HTTP tool call.

use std::time::Duration;

/// User-Agent sent when the operator does not configure one.
pub const DEFAULT_USER_AGENT: &str =
    "ModelContextProtocol/1.0 (HTTP-Request; +https://github.com/modelcontextprotocol/servers)";

/// Combined connect + read budget for a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable configuration, built once at startup and read by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub user_agent: String,
    pub proxy_url: Option<String>,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Build a config from optional operator overrides.
    ///
    /// A missing or blank user agent falls back to [`DEFAULT_USER_AGENT`]; a blank proxy URL is
    /// treated as "no proxy".
    #[must_use]
    pub fn new(user_agent: Option<String>, proxy_url: Option<String>) -> Self {
        let user_agent = user_agent
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let proxy_url = proxy_url.filter(|p| !p.trim().is_empty());
        Self {
            user_agent,
            proxy_url,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}
