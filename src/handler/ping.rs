//! Ping endpoints
//!
//! Each app answers a liveness check with the same payload every time.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http;

/// Logical service groups mounted under `/api/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {
    Classifier,
    Enrichment,
}

impl App {
    /// Identifier returned in the `app` field
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Enrichment => "enrichment",
        }
    }

    /// Path the ping route is mounted on
    pub const fn ping_path(self) -> &'static str {
        match self {
            Self::Classifier => "/api/classify/ping/",
            Self::Enrichment => "/api/enrichment/ping/",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Classifier => "Classifier app is running!",
            Self::Enrichment => "Enrichment app is running!",
        }
    }
}

/// Ping payload; field order is part of the wire format
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PingResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub app: &'static str,
}

impl PingResponse {
    pub const fn for_app(app: App) -> Self {
        Self {
            status: "success",
            message: app.message(),
            app: app.slug(),
        }
    }
}

/// GET handler shared by every app
pub fn ping(app: App, is_head: bool) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, &PingResponse::for_app(app), is_head)
}
