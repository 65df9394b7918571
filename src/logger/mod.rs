//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging through `tracing`
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::error::ServerError;
use hyper::Version;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Initialize logging with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes precedence
/// over `logging.level`.
pub fn init(config: &Config) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| ServerError::Logger(format!("invalid log level: {e}")))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ServerError::Logger(e.to_string()))?;

    writer::init(config.logging.access_log_file.as_deref())?;
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Animal Identifier API listening on http://{addr}");
    tracing::info!(
        level = %config.logging.level,
        debug = config.security.debug,
        workers = ?config.server.workers,
        "server configuration loaded"
    );
    tracing::info!(
        allowed_hosts = ?config.security.allowed_hosts,
        cors_allowed_origins = ?config.cors.allowed_origins,
        max_upload_mb = config.upload.max_size_mb,
        "request policy"
    );
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!("Access log: {path}");
    }
    if config.security.debug {
        tracing::warn!("Debug mode is enabled; do not run like this in production");
    } else if config.security.secret_key == crate::config::DEV_SECRET_KEY {
        tracing::warn!("DJANGO_SECRET_KEY is unset, the development placeholder is in use");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_shutdown(active_connections: usize) {
    tracing::info!("Shutdown requested, no longer accepting connections ({active_connections} still open)");
}

pub fn log_drain_complete() {
    tracing::info!("All connections closed, shutting down");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    let line = entry.format(format);
    match writer::get() {
        Some(w) => w.write_line(&line),
        None => println!("{line}"),
    }
}

/// Version number as written in the request line
pub fn http_version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
