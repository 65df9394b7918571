// Application state module
// Immutable configuration plus the process-wide shutdown signal

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use super::types::Config;

/// Application state, shared by every connection through `Arc`
pub struct AppState {
    pub config: Config,
    /// Notified once when the process should stop accepting connections
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Largest accepted request body, in megabytes
    pub const fn max_body_mb(&self) -> u64 {
        self.config.upload.max_size_mb
    }

    /// Upper bound for one connection, and for draining them all on shutdown
    pub fn connection_timeout(&self) -> Duration {
        let performance = &self.config.performance;
        Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ))
    }
}
