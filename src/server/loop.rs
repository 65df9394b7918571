// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// Run the accept loop on the current `LocalSet`.
///
/// Once `state.shutdown` is notified the listener is closed and the call
/// returns after the open connections have finished, or after
/// [`AppState::connection_timeout`] at the latest. The caller must keep the
/// `LocalSet` alive until then.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) -> Result<(), ServerError> {
    let shutdown = Arc::clone(&state.shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections, state.connection_timeout()).await;
    Ok(())
}

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Wait until no connection is open, giving up at `grace`
pub async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) {
    let deadline = Instant::now() + grace;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_drain_complete();
            return;
        }
        if Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Drain period of {} seconds elapsed, closing {remaining} connection(s)",
                grace.as_secs()
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
