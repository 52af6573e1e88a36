//! Redaction helpers for anything that leaves the process through logs or error messages.

use std::error::Error as _;
use url::Url;

/// Strip credentials, query and fragment from a URL before logging it.
#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    // Best-effort: cannot-be-a-base URLs reject credential changes.
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

/// Describe a transport error: its kind plus the full `source()` chain.
///
/// The URL embedded by `reqwest` is dropped because callers already report it.
#[must_use]
pub fn describe_reqwest_error(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_redirect() {
        "redirect failed"
    } else if e.is_body() || e.is_decode() {
        "failed to read response body"
    } else if e.is_builder() {
        "invalid request"
    } else {
        "transport error"
    };

    let mut causes: Vec<String> = Vec::new();
    let mut source = e.source();
    while let Some(s) = source {
        let msg = s.to_string();
        if !causes.contains(&msg) {
            causes.push(msg);
        }
        source = s.source();
    }

    if causes.is_empty() {
        let msg = match e.url() {
            Some(u) => e.to_string().replace(&format!(" ({u})"), ""),
            None => e.to_string(),
        };
        format!("{kind}: {msg}")
    } else {
        format!("{kind}: {}", causes.join(": "))
    }
}
