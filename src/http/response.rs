//! HTTP response building module
//!
//! Builders for every response the responder can produce.

use super::cache::CachePolicy;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Response, StatusCode};

/// Body of every 404
pub const NOT_FOUND_BODY: &str = "File not found";

/// Body of the 500 sent when a 200 could not be assembled
pub const BUILD_FAILURE_BODY: &str = "Server Error: invalid response header";

/// Headers added to every response in spa mode
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Build 200 response for a file read from disk
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    cache: CachePolicy,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len())
        .header("Cache-Control", cache.to_header_value())
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            build_failure_response()
        })
}

/// Build 200 response carrying the index document in place of a missing file
pub fn build_fallback_response(index: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", index.len())
        .body(Full::new(index))
        .unwrap_or_else(|e| {
            log_build_error("fallback", &e);
            build_failure_response()
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        })
}

/// Build 500 response naming the file system error code
pub fn build_500_response(code: &str) -> Response<Full<Bytes>> {
    let body = format!("Server Error: {code}");
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body.clone())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build OPTIONS response (preflight request)
///
/// CORS headers are added by [`apply_cors`] like on every other spa response.
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Add the permissive CORS headers
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// Add a `Server` header, skipped if the name is not a valid header value
pub fn apply_server_name(response: &mut Response<Full<Bytes>>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(hyper::header::SERVER, value);
        }
        Err(e) => log_build_error("Server header", &e),
    }
}

/// 500 assembled without the builder, so it cannot fail itself
fn build_failure_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(BUILD_FAILURE_BODY.as_bytes())));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(what: &str, error: &dyn std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
}
