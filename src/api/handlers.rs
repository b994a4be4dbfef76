//! Fixed-response emission
//!
//! Every mock route replays one stored example. `Content-Length` and
//! `Content-Encoding` are stripped (the server computes those itself); a
//! JSON content type gets its body re-emitted as structured JSON when it
//! parses, and falls back to the raw payload when it does not.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::types::MockResponse;

pub fn mock_response(mock: &MockResponse) -> Response {
    let status = StatusCode::from_u16(mock.status).unwrap_or(StatusCode::OK);

    let mut headers = HeaderMap::new();
    let mut content_type: Option<String> = None;

    for (key, value) in &mock.headers {
        if key.eq_ignore_ascii_case("content-length") || key.eq_ignore_ascii_case("content-encoding")
        {
            continue;
        }
        if key.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.clone());
            continue;
        }
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::warn!(header = %key, "dropping recorded header that is not valid HTTP"),
        }
    }

    let content_type = content_type.unwrap_or_default();

    if content_type.to_ascii_lowercase().contains("application/json") {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&mock.body) {
            // Json sets its own Content-Type
            return (status, headers, Json(value)).into_response();
        }
    }

    let media_type = if content_type.is_empty() {
        "text/plain".to_string()
    } else {
        content_type
    };
    let media_type = HeaderValue::from_str(&media_type)
        .unwrap_or_else(|_| HeaderValue::from_static("text/plain"));
    headers.insert(header::CONTENT_TYPE, media_type);

    (status, headers, mock.body.clone()).into_response()
}
