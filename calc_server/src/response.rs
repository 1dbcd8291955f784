//! JSON response helpers.
//!
//! Every API response goes through [`json_response`] so the content type
//! and an explicit content length are set the same way everywhere.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use serde_json::json;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const FALLBACK_BODY: &[u8] = br#"{"error":"Internal server error"}"#;

fn with_body(status: StatusCode, body: Vec<u8>) -> Response {
    let length = body.len();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// Serialize `value` as the response body.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => with_body(status, body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            with_body(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY.to_vec())
        }
    }
}

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, &json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let response = error_response(StatusCode::NOT_FOUND, "Configuration not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        let expected = br#"{"error":"Configuration not found"}"#.len().to_string();
        assert_eq!(response.headers()[header::CONTENT_LENGTH], expected.as_str());
    }
}
