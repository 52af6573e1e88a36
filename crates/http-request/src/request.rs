//! Validated, method-specific request shapes built from raw tool arguments.

use crate::error::{HttpRequestError, Result};
use crate::tools::HttpTool;
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Map, Value};
use url::Url;

/// Request body as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim, no implicit content type.
    Text(String),
    /// Serialized to JSON; `Content-Type: application/json` unless the caller set one.
    Json(Value),
}

/// Ordered string-to-string pairs (headers or query parameters).
pub type StringPairs = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct GetRequest {
    pub url: Url,
    pub headers: StringPairs,
    pub query_params: StringPairs,
}

/// Shape shared by POST, PUT and PATCH.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRequest {
    pub url: Url,
    pub headers: StringPairs,
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub url: Url,
    pub headers: StringPairs,
}

/// One outbound HTTP call. Each variant carries only the fields legal for its method.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestSpec {
    Get(GetRequest),
    Post(BodyRequest),
    Put(BodyRequest),
    Patch(BodyRequest),
    Delete(DeleteRequest),
}

impl RequestSpec {
    /// Validate raw tool arguments for `tool`.
    ///
    /// Every violated field is reported in a single `InvalidArguments` error. Fields that are not
    /// legal for the tool are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HttpRequestError::InvalidArguments`] if the arguments are not an object, `url` is
    /// missing or not an absolute `http(s)` URL, `headers`/`queryParams` are not flat string maps,
    /// or `body` is neither a string nor a JSON object/array.
    pub fn from_arguments(tool: HttpTool, arguments: &Value) -> Result<Self> {
        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(HttpRequestError::invalid_arguments(
                    tool.name(),
                    format!("arguments must be a JSON object, got {}", type_name(other)),
                ));
            }
        };

        let mut violations = Violations::default();
        let url = violations.collect(required_url(args));
        let headers = violations
            .collect(optional_header_map(args))
            .unwrap_or_default();

        let spec = match tool {
            HttpTool::Get => {
                let query_params = violations
                    .collect(optional_string_map(args, &["queryParams", "params"]))
                    .unwrap_or_default();
                url.map(|url| {
                    Self::Get(GetRequest {
                        url,
                        headers,
                        query_params,
                    })
                })
            }
            HttpTool::Post | HttpTool::Put | HttpTool::Patch => {
                let body = violations.collect(optional_body(args)).flatten();
                url.map(|url| {
                    let req = BodyRequest { url, headers, body };
                    match tool {
                        HttpTool::Post => Self::Post(req),
                        HttpTool::Put => Self::Put(req),
                        _ => Self::Patch(req),
                    }
                })
            }
            HttpTool::Delete => url.map(|url| Self::Delete(DeleteRequest { url, headers })),
        };

        match (spec, violations.into_message()) {
            (Some(spec), None) => Ok(spec),
            (_, Some(message)) => Err(HttpRequestError::invalid_arguments(tool.name(), message)),
            (None, None) => Err(HttpRequestError::invalid_arguments(
                tool.name(),
                "url: field required",
            )),
        }
    }

    /// The tool this request was validated for.
    #[must_use]
    pub fn tool(&self) -> HttpTool {
        match self {
            Self::Get(_) => HttpTool::Get,
            Self::Post(_) => HttpTool::Post,
            Self::Put(_) => HttpTool::Put,
            Self::Patch(_) => HttpTool::Patch,
            Self::Delete(_) => HttpTool::Delete,
        }
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.tool().method()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        match self {
            Self::Get(r) => &r.url,
            Self::Post(r) | Self::Put(r) | Self::Patch(r) => &r.url,
            Self::Delete(r) => &r.url,
        }
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        match self {
            Self::Get(r) => &r.headers,
            Self::Post(r) | Self::Put(r) | Self::Patch(r) => &r.headers,
            Self::Delete(r) => &r.headers,
        }
    }

    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        match self {
            Self::Get(r) => &r.query_params,
            _ => &[],
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        match self {
            Self::Post(r) | Self::Put(r) | Self::Patch(r) => r.body.as_ref(),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn collect<T>(&mut self, r: std::result::Result<T, String>) -> Option<T> {
        match r {
            Ok(v) => Some(v),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    fn into_message(self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join("; "))
        }
    }
}

fn required_url(args: &Map<String, Value>) -> std::result::Result<Url, String> {
    let raw = match args.get("url") {
        None | Some(Value::Null) => return Err("url: field required".to_string()),
        Some(Value::String(s)) => s.trim(),
        Some(other) => return Err(format!("url: expected a string, got {}", type_name(other))),
    };

    let url = Url::parse(raw).map_err(|e| format!("url: invalid absolute URL '{raw}': {e}"))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "url: unsupported URL scheme '{scheme}' (expected http or https)"
            ));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("url: missing host in '{raw}'"));
    }
    Ok(url)
}

/// Read the first present key among `keys` as a flat string-to-string object.
fn optional_string_map(
    args: &Map<String, Value>,
    keys: &[&str],
) -> std::result::Result<StringPairs, String> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|k| args.get(*k).map(|v| (*k, v)))
    else {
        return Ok(Vec::new());
    };

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "{key}: expected an object of strings, got {}",
                type_name(other)
            ));
        }
    };

    let mut out = Vec::with_capacity(map.len());
    let mut bad = Vec::new();
    for (k, v) in map {
        match v {
            Value::String(s) => out.push((k.clone(), s.clone())),
            other => bad.push(format!("{key}.{k}: expected a string, got {}", type_name(other))),
        }
    }
    if bad.is_empty() {
        Ok(out)
    } else {
        Err(bad.join("; "))
    }
}

fn optional_header_map(args: &Map<String, Value>) -> std::result::Result<StringPairs, String> {
    let headers = optional_string_map(args, &["headers"])?;
    let bad: Vec<String> = headers
        .iter()
        .filter_map(|(name, value)| {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                Some(format!("headers.{name}: invalid HTTP header name"))
            } else if HeaderValue::from_str(value).is_err() {
                Some(format!("headers.{name}: invalid HTTP header value"))
            } else {
                None
            }
        })
        .collect();
    if bad.is_empty() {
        Ok(headers)
    } else {
        Err(bad.join("; "))
    }
}

fn optional_body(args: &Map<String, Value>) -> std::result::Result<Option<RequestBody>, String> {
    match args.get("body") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(RequestBody::Text(s.clone()))),
        Some(v @ (Value::Object(_) | Value::Array(_))) => Ok(Some(RequestBody::Json(v.clone()))),
        Some(other) => Err(format!(
            "body: expected a string or a JSON object, got {}",
            type_name(other)
        )),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
