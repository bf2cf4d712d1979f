//! HTTP response building module
//!
//! Builders for the status codes the guide server emits. A builder failure is
//! logged and replaced by an empty response with the same status.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::STATIC_CACHE_CONTROL;

pub type HttpResponse = Response<Full<Bytes>>;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

fn finish(builder: Builder, body: Bytes, status: StatusCode) -> HttpResponse {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = status;
        fallback
    })
}

fn plain(status: StatusCode, text: &'static str) -> Builder {
    Response::builder()
        .status(status)
        .header("Content-Type", TEXT)
        .header("Content-Length", text.len())
}

/// Body is dropped for HEAD requests, Content-Length is kept
fn head_aware(data: Bytes, is_head: bool) -> Bytes {
    if is_head {
        Bytes::new()
    } else {
        data
    }
}

fn with_cors(builder: Builder, enable_cors: bool) -> Builder {
    if enable_cors {
        builder.header("Access-Control-Allow-Origin", "*")
    } else {
        builder
    }
}

/// Set the `Server` header, skipping names that are not valid header values
pub fn set_server_name(response: &mut HttpResponse, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(SERVER, value);
    }
}

pub fn build_304_response(etag: &str) -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", STATIC_CACHE_CONTROL);
    finish(builder, Bytes::new(), StatusCode::NOT_MODIFIED)
}

pub fn build_404_response() -> HttpResponse {
    let text = "404 Not Found";
    finish(plain(StatusCode::NOT_FOUND, text), Bytes::from(text), StatusCode::NOT_FOUND)
}

/// 405 with the methods the path does accept
pub fn build_405_response(allow: &str) -> HttpResponse {
    let text = "405 Method Not Allowed";
    let builder = plain(StatusCode::METHOD_NOT_ALLOWED, text).header("Allow", allow);
    finish(builder, Bytes::from(text), StatusCode::METHOD_NOT_ALLOWED)
}

/// 204 answer to OPTIONS, with CORS preflight headers when enabled
pub fn build_options_response(allow: &str, enable_cors: bool) -> HttpResponse {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    finish(builder, Bytes::new(), StatusCode::NO_CONTENT)
}

pub fn build_health_response(is_head: bool) -> HttpResponse {
    let text = "ok";
    let builder = plain(StatusCode::OK, text).header("Cache-Control", "no-store");
    finish(builder, head_aware(Bytes::from(text), is_head), StatusCode::OK)
}

/// Serialize `body` as a JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    enable_cors: bool,
) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => {
            let builder = Response::builder()
                .status(status)
                .header("Content-Type", JSON)
                .header("Content-Length", json.len())
                .header("Cache-Control", "no-store");
            finish(with_cors(builder, enable_cors), Bytes::from(json), status)
        }
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            let text = r#"{"error":"Internal server error"}"#;
            let builder = Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", JSON);
            finish(builder, Bytes::from(text), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// JSON `{"error": message}` with the given status
pub fn build_json_error(status: StatusCode, message: &str, enable_cors: bool) -> HttpResponse {
    build_json_response(status, &serde_json::json!({ "error": message }), enable_cors)
}

pub fn build_html_response(content: String, is_head: bool) -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content.len())
        .header("Cache-Control", "no-cache");
    finish(builder, head_aware(Bytes::from(content), is_head), StatusCode::OK)
}

/// 200 for a static asset with its validator
pub fn build_static_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> HttpResponse {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len())
        .header("ETag", etag)
        .header("Cache-Control", STATIC_CACHE_CONTROL);
    finish(builder, head_aware(data, is_head), StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Body;

    fn body_len(response: &HttpResponse) -> Option<u64> {
        response.body().size_hint().exact()
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response("POST, OPTIONS");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], "POST, OPTIONS");
    }

    #[test]
    fn test_options_cors() {
        let closed = build_options_response("GET, HEAD, OPTIONS", false);
        assert_eq!(closed.status(), StatusCode::NO_CONTENT);
        assert!(closed.headers().get("Access-Control-Allow-Origin").is_none());

        let open = build_options_response("POST, OPTIONS", true);
        assert_eq!(open.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(open.headers()["Access-Control-Allow-Methods"], "POST, OPTIONS");
    }

    #[test]
    fn test_json_response() {
        let response = build_json_error(StatusCode::BAD_REQUEST, "bad", true);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["Content-Type"], JSON);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(body_len(&response), Some(br#"{"error":"bad"}"#.len() as u64));
    }

    #[test]
    fn test_head_keeps_length_drops_body() {
        let response = build_html_response("<p>hi</p>".to_string(), true);
        assert_eq!(response.headers()["Content-Length"], "9");
        assert_eq!(body_len(&response), Some(0));
    }

    #[test]
    fn test_static_response_headers() {
        let response = build_static_response(Bytes::from_static(b"body{}"), "text/css", "\"e\"", false);
        assert_eq!(response.headers()["ETag"], "\"e\"");
        assert_eq!(response.headers()["Cache-Control"], STATIC_CACHE_CONTROL);
        assert_eq!(body_len(&response), Some(6));
    }

    #[test]
    fn test_server_name() {
        let mut response = build_404_response();
        set_server_name(&mut response, "monastery-guide");
        assert_eq!(response.headers()["Server"], "monastery-guide");

        set_server_name(&mut response, "bad\nname");
        assert_eq!(response.headers()["Server"], "monastery-guide");
    }
}
