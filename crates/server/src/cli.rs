use clap::{Parser, ValueEnum};
use unrelated_http_request::ServerConfig;

/// Give a model the ability to make HTTP requests (GET, POST, PUT, PATCH, DELETE).
#[derive(Debug, Parser)]
#[command(name = "unrelated-mcp-http-request", version, about)]
pub struct Cli {
    /// Custom User-Agent string (default: built-in MCP HTTP-Request agent)
    #[arg(long, env = "HTTP_REQUEST_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Proxy URL to route every request through
    #[arg(long, env = "HTTP_REQUEST_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Log level / filter directive (overridden by `RUST_LOG`)
    #[arg(long, env = "HTTP_REQUEST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (logs always go to stderr)
    #[arg(long, env = "HTTP_REQUEST_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.user_agent.clone(), self.proxy_url.clone())
    }
}
