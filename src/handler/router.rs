//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: host and body-size guards, the
//! `(method, path)` dispatch table, CORS headers and the access log.

use crate::config::AppState;
use crate::handler::home::home;
use crate::handler::ping::{ping, App};
use crate::http::{self, cors, host};
use crate::logger::{self, AccessLogEntry};
use crate::validation;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Route targets known to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Ping(App),
}

/// Static route table, exact path match
const ROUTES: [(&str, Route); 3] = [
    ("/", Route::Home),
    (App::Classifier.ping_path(), Route::Ping(App::Classifier)),
    (App::Enrichment.ping_path(), Route::Ping(App::Enrichment)),
];

/// Look up the route for an exact path
pub fn resolve(path: &str) -> Option<Route> {
    ROUTES
        .iter()
        .find(|(route_path, _)| *route_path == path)
        .map(|(_, route)| *route)
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let origin = req
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let allowed_origin =
        cors::allowed_origin(origin.as_deref(), &state.config.cors.allowed_origins);

    // Preflights are answered before host checks and route resolution
    let mut response = match allowed_origin {
        Some(_) if cors::is_preflight(&req) => cors::build_preflight_response(),
        _ => route_request(&req, &state),
    };

    if let Some(origin) = allowed_origin {
        if req.method() == Method::OPTIONS && response.status().is_success() {
            cors::apply_preflight_headers(&mut response, origin);
        } else {
            cors::apply_cors_headers(&mut response, origin);
        }
    }

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the guards then the dispatch table
fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    // 1. Host header
    if let Some(resp) = check_host(req, state) {
        return resp;
    }

    // 2. Body size, only for methods that carry one
    if !is_bodyless(method) {
        if let Some(resp) = check_body_size(req, state.max_body_mb()) {
            return resp;
        }
    }

    // 3. Exact route
    if let Some(route) = resolve(path) {
        return dispatch(method, route, is_head);
    }

    // 4. Missing trailing slash on a known route
    if matches!(*method, Method::GET | Method::HEAD) && !path.ends_with('/') {
        let slashed = format!("{path}/");
        if resolve(&slashed).is_some() {
            let target = match req.uri().query() {
                Some(query) => format!("{slashed}?{query}"),
                None => slashed,
            };
            return http::build_redirect_response(&target);
        }
    }

    http::build_404_response(is_head)
}

/// Method matching for a resolved route
fn dispatch(method: &Method, route: Route, is_head: bool) -> Response<Full<Bytes>> {
    match (method, route) {
        (&Method::GET | &Method::HEAD, Route::Home) => home(is_head),
        (&Method::GET | &Method::HEAD, Route::Ping(app)) => ping(app, is_head),
        (&Method::OPTIONS, _) => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response(method.as_str())
        }
    }
}

/// No route reads a body for these, so their Content-Length is not checked
fn is_bodyless(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Reject requests whose `Host` header is not allowed
fn check_host<B>(req: &Request<B>, state: &AppState) -> Option<Response<Full<Bytes>>> {
    // HTTP/1.0 clients may omit Host
    let value = req.headers().get("host")?;
    let security = &state.config.security;
    let allowed = value
        .to_str()
        .is_ok_and(|h| host::is_allowed_host(h, &security.allowed_hosts, security.debug));
    if allowed {
        return None;
    }

    logger::log_warning(&format!("Invalid HTTP_HOST header: {value:?}"));
    Some(http::build_400_response("Invalid host header."))
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_size_mb: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if !validation::validate_file_size(Some(&size), max_size_mb) => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_size_mb} MB)"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = logger::http_version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
