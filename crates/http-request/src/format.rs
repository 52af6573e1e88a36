//! Rendering of a [`ResponseResult`] into the single text block returned to the model.

use crate::executor::ResponseResult;

/// Render the response as:
///
/// ```text
/// HTTP <METHOD> request to <URL>
///
/// Status Code: <status>
///
/// Response Headers:
/// <name>: <value>
///
/// Response Body:
/// <body>
/// ```
#[must_use]
pub fn format_response(method: &str, url: &str, result: &ResponseResult) -> String {
    let headers = result
        .headers
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "HTTP {method} request to {url}\n\nStatus Code: {status}\n\nResponse Headers:\n{headers}\n\nResponse Body:\n{body}",
        status = result.status_code,
        body = result.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ResponseBody;

    #[test]
    fn renders_exact_layout() {
        let result = ResponseResult {
            status_code: 200,
            headers: vec![("X-Test".to_string(), "1".to_string())],
            body: ResponseBody::Text("ok".to_string()),
        };
        assert_eq!(
            format_response("GET", "https://x/y", &result),
            "HTTP GET request to https://x/y\n\nStatus Code: 200\n\nResponse Headers:\nX-Test: 1\n\nResponse Body:\nok"
        );
    }

    #[test]
    fn renders_headers_in_order_and_binary_sentinel() {
        let result = ResponseResult {
            status_code: 500,
            headers: vec![
                ("content-type".to_string(), "image/png".to_string()),
                ("x-b".to_string(), "2".to_string()),
                ("x-a".to_string(), "1".to_string()),
            ],
            body: ResponseBody::Binary,
        };
        let text = format_response("DELETE", "https://x/y", &result);
        assert!(text.contains("Status Code: 500\n"));
        assert!(text.contains(
            "Response Headers:\ncontent-type: image/png\nx-b: 2\nx-a: 1\n\nResponse Body:\n"
        ));
        assert!(text.ends_with("Response Body:\n<binary or non-text content>"));
    }

    #[test]
    fn renders_empty_header_list_and_body() {
        let result = ResponseResult {
            status_code: 204,
            headers: Vec::new(),
            body: ResponseBody::Text(String::new()),
        };
        assert_eq!(
            format_response("PUT", "https://x/y", &result),
            "HTTP PUT request to https://x/y\n\nStatus Code: 204\n\nResponse Headers:\n\n\nResponse Body:\n"
        );
    }
}
