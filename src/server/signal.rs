// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Start the signal listener (Unix).
///
/// Spawns a background task that waits for SIGINT or SIGTERM and fires the
/// shutdown notify so the accept loop can exit cleanly. Interrupt-driven
/// shutdown is the normal way to stop the server and exits with status 0.
#[cfg(unix)]
pub fn spawn_signal_listener(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            logger::log_error("Failed to register SIGINT handler");
            return;
        };
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            logger::log_error("Failed to register SIGTERM handler");
            return;
        };

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }

        shutdown.notify_one();
    });
}

/// Start the signal listener (non-Unix): Ctrl+C only.
#[cfg(not(unix))]
pub fn spawn_signal_listener(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            logger::log_error("Failed to register Ctrl+C handler");
            return;
        }
        shutdown.notify_one();
    });
}
