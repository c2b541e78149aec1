//! Request entry point
//!
//! Logs the request, short-circuits spa-mode preflights, serves the file and
//! decorates the response with the headers every response carries.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    /// URI path, query string excluded
    pub path: &'a str,
    /// Arrival time, shared by every log line of this request
    pub time: DateTime<Utc>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext {
        method: req.method(),
        path: req.uri().path(),
        time: Utc::now(),
    };
    let uri = req.uri().to_string();
    logger::log_request(&ctx.time, ctx.method.as_str(), &uri);

    let response = respond(&ctx, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            ctx.time,
            ctx.method.to_string(),
            uri,
        );
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce exactly one response for the request
pub async fn respond(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let spa = state.config.site.mode.is_spa();

    let mut response = if spa && *ctx.method == Method::OPTIONS {
        http::build_options_response()
    } else {
        // every other method is served like GET
        static_files::serve(ctx, state).await
    };

    if spa {
        http::apply_cors(&mut response);
    }
    if let Some(name) = state.config.http.server_name.as_deref() {
        http::apply_server_name(&mut response, name);
    }
    response
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
