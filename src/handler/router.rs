//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, body size
//! checks, dispatch to the chat endpoint or static site, access logging.

use crate::config::AppState;
use crate::handler::{chat, static_files};
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};
use hyper::body::{Body, Incoming};
use hyper::{Method, Request, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

pub const CHAT_PATH: &str = "/chat";
pub const STATIC_PREFIX: &str = "/static/";

const CHAT_ALLOW: &str = "POST, OPTIONS";
const PAGE_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Request context encapsulating information needed for static responses
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible> {
    let started = Instant::now();
    let entry = state
        .config
        .logging
        .access_log
        .then(|| access_entry(&req, peer_addr));

    let mut response = route(req, &state).await;
    http::set_server_name(&mut response, &state.config.http.server_name);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.elapsed = started.elapsed();
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route(req: Request<Incoming>, state: &AppState) -> HttpResponse {
    let enable_cors = state.config.http.enable_cors;

    if req.uri().path() == CHAT_PATH {
        let method = req.method().clone();
        return match method {
            Method::POST => {
                let max = state.config.http.max_body_size;
                if declared_too_large(&req, max) {
                    return chat::error_response(&chat::ChatError::TooLarge { max }, enable_cors);
                }
                chat::handle_chat(req, state).await
            }
            Method::OPTIONS => http::build_options_response(CHAT_ALLOW, enable_cors),
            other => {
                logger::log_warning(&format!("Method not allowed on {CHAT_PATH}: {other}"));
                http::build_405_response(CHAT_ALLOW)
            }
        };
    }

    if let Some(resp) = check_page_method(req.method(), enable_cors) {
        return resp;
    }

    let path = req.uri().path();
    let ctx = RequestContext {
        path,
        is_head: req.method() == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };
    route_page(&ctx, state).await
}

/// GET/HEAD pass, OPTIONS is answered, anything else is 405
fn check_page_method(method: &Method, enable_cors: bool) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(PAGE_ALLOW, enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response(PAGE_ALLOW))
        }
    }
}

/// True if the declared Content-Length exceeds `max_body_size`
///
/// Bodies without a usable Content-Length are still capped while reading.
fn declared_too_large(req: &Request<Incoming>, max_body_size: u64) -> bool {
    let Some(value) = req.headers().get("content-length") else {
        return false;
    };
    let Ok(size_str) = value.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return false;
    };
    match size_str.trim().parse::<u64>() {
        Ok(size) => size > max_body_size,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', relying on read limit"
            ));
            false
        }
    }
}

async fn route_page(ctx: &RequestContext<'_>, state: &AppState) -> HttpResponse {
    let site = &state.config.site;

    if site.health.is_health_path(ctx.path) {
        return http::build_health_response(ctx.is_head);
    }

    match ctx.path {
        "/" | "/index.html" => static_files::serve_index(ctx, state).await,
        "/favicon.ico" | "/favicon.svg" => {
            static_files::serve_asset(ctx, &site.static_dir, ctx.path).await
        }
        path => match path.strip_prefix(STATIC_PREFIX) {
            Some(relative) => static_files::serve_asset(ctx, &site.static_dir, relative).await,
            None => http::build_404_response(),
        },
    }
}

fn access_entry(req: &Request<Incoming>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().as_str(),
        req.uri().path(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
