//! Static file serving module
//!
//! Reads the resolved file and maps the outcome to a response: the file
//! itself, the index document fallback, 404 or 500.

use crate::config::AppState;
use crate::error::{io_error_code, ServeError};
use crate::handler::resolve::{index_path, resolve_path};
use crate::handler::router::RequestContext;
use crate::http::{self, CachePolicy};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the file behind `ctx.path`
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let site = &state.config.site;

    let loaded = match resolve_path(site, ctx.path) {
        Ok(path) => load_file(&path).await.map(|data| (path, data)),
        Err(e) => Err(e),
    };

    match loaded {
        Ok((path, data)) => {
            logger::log_served(&ctx.time, &path, data.len());
            let content_type = state.mime.content_type_for(&path);
            let cache = CachePolicy::for_file(site.mode, &path, state.config.http.asset_max_age);
            http::build_file_response(data, content_type, cache)
        }
        Err(ServeError::Io { path, source }) => {
            let code = io_error_code(&source);
            logger::log_server_error(&ctx.time, &code, &path);
            http::build_500_response(&code)
        }
        Err(ServeError::NotFound { path }) => {
            logger::log_not_found(&ctx.time, &path);
            serve_not_found(ctx, state).await
        }
        Err(ServeError::Forbidden { request_path }) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
            serve_not_found(ctx, state).await
        }
    }
}

/// Answer a request whose file does not exist
///
/// Simple mode and the favicon path get a 404; otherwise the index document
/// is served in place of the missing file.
async fn serve_not_found(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let site = &state.config.site;
    if !site.mode.is_spa() || ctx.path == site.favicon_path {
        return http::build_404_response();
    }

    match load_file(&index_path(site)).await {
        Ok(index) => http::build_fallback_response(index),
        Err(e) => {
            logger::log_warning(&format!("Index fallback unavailable: {e}"));
            http::build_404_response()
        }
    }
}

/// Read a whole file, splitting not-found from other failures
pub async fn load_file(path: &Path) -> Result<Bytes, ServeError> {
    fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|e| ServeError::from_io(PathBuf::from(path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::TestSite;

    #[tokio::test]
    async fn test_load_file() {
        let site = TestSite::new("load-file");
        site.write("data.bin", b"\x00\x01\x02");

        let data = load_file(&site.path("data.bin")).await.unwrap();
        assert_eq!(&data[..], b"\x00\x01\x02");

        let err = load_file(&site.path("nope.bin")).await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_directory_is_io_error() {
        let site = TestSite::new("load-dir");
        site.write("sub/file.txt", b"x");

        let err = load_file(&site.path("sub")).await.unwrap_err();
        assert!(matches!(err, ServeError::Io { .. }));
    }
}
