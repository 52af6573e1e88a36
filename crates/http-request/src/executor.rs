//! Request Executor: performs exactly one outbound HTTP call per [`RequestSpec`].
//!
//! Non-2xx statuses are returned as ordinary [`ResponseResult`]s; only transport failures
//! (DNS, connect, TLS, timeout, body read) become errors.

use crate::config::ServerConfig;
use crate::error::{HttpRequestError, Result};
use crate::request::{RequestBody, RequestSpec};
use crate::safety::{describe_reqwest_error, redact_url};
use reqwest::Client;
use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Placeholder emitted instead of a body that cannot be decoded as text.
pub const BINARY_BODY_SENTINEL: &str = "<binary or non-text content>";

/// Maximum number of redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(String),
    Binary,
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Binary => f.write_str(BINARY_BODY_SENTINEL),
        }
    }
}

/// Normalized outcome of one HTTP call (post-redirect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult {
    pub status_code: u16,
    /// Header name/value pairs in wire order. Repeated names are merged with `", "`.
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
}

/// Executes requests with a single immutable client built from [`ServerConfig`].
///
/// Cheap to share across tasks; holds no per-request state.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    user_agent: HeaderValue,
}

impl HttpExecutor {
    /// # Errors
    ///
    /// Returns [`HttpRequestError::Config`] if the user agent is not a valid header value, the
    /// proxy URL is invalid, or the HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            HttpRequestError::Config(format!("Invalid user agent {:?}: {e}", config.user_agent))
        })?;

        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            // Every call is independent: no idle connections are kept between invocations.
            .pool_max_idle_per_host(0);

        builder = match config.proxy_url.as_deref() {
            Some(proxy_url) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                    HttpRequestError::Config(format!("Invalid proxy URL '{proxy_url}': {e}"))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| HttpRequestError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, user_agent })
    }

    /// Perform the request described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpRequestError::RequestFailure`] if the exchange cannot be completed.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseResult> {
        let method = spec.method();
        let url = spec.url();
        let failure = |cause: String| HttpRequestError::RequestFailure {
            method: method.to_string(),
            url: url.to_string(),
            cause,
        };

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(self.request_headers(spec));
        if !spec.query_params().is_empty() {
            request = request.query(spec.query_params());
        }
        request = match spec.body() {
            Some(RequestBody::Text(text)) => request.body(text.clone()),
            // `json` only sets Content-Type when the caller has not (case-insensitive).
            Some(RequestBody::Json(value)) => request.json(value),
            None => request,
        };

        let started = Instant::now();
        debug!(method = %method, url = %redact_url(url), "sending HTTP request");

        let response = request
            .send()
            .await
            .map_err(|e| failure(describe_reqwest_error(&e)))?;

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let encoding = declared_encoding(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| failure(describe_reqwest_error(&e)))?;
        let body = decode_body(&bytes, encoding);

        info!(
            method = %method,
            url = %redact_url(url),
            status = status_code,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "HTTP request completed"
        );

        Ok(ResponseResult {
            status_code,
            headers,
            body,
        })
    }

    /// Default `User-Agent`, then caller headers on top. Caller wins on (case-insensitive) name
    /// collisions; a caller header repeated with different casing keeps the last value.
    fn request_headers(&self, spec: &RequestSpec) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        for (name, value) in spec.headers() {
            // Names and values are validated when the spec is built.
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        headers
    }
}

/// Encoding named by the `charset` parameter of `Content-Type`, if any and recognized.
fn declared_encoding(headers: &HeaderMap) -> Option<&'static Encoding> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mime: Mime = content_type.parse().ok()?;
    let charset = mime.get_param(mime::CHARSET)?;
    Encoding::for_label(charset.as_str().as_bytes())
}

/// Strict decode: malformed input for the declared charset (UTF-8 when none) is not text.
fn decode_body(bytes: &[u8], encoding: Option<&'static Encoding>) -> ResponseBody {
    let encoding = encoding.unwrap_or(UTF_8);
    match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => ResponseBody::Text(text.into_owned()),
        None => ResponseBody::Binary,
    }
}

fn collect_headers(map: &HeaderMap) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::with_capacity(map.keys_len());
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes());
        match out.iter_mut().find(|(n, _)| n == name.as_str()) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => out.push((name.as_str().to_string(), value.into_owned())),
        }
    }
    out
}
