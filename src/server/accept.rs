// Accept loop module
// Runs the listener until the shutdown notify fires.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::spawn_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until shutdown is requested.
///
/// Accept errors are logged and the loop keeps going; per-connection failures
/// never terminate the server. When the shutdown notify fires the loop exits,
/// the listener is dropped, and the port is released.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    Ok(())
}
