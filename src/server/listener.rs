// Listener module
// Binds the TCP listener the accept loop runs on.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// A dev server gets restarted constantly; `SO_REUSEADDR` lets the next start
/// rebind the port even while the previous socket sits in TIME_WAIT. A bind
/// failure here (port taken, no permission) is fatal and surfaced to the
/// caller unchanged.
pub fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for tokio compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind("127.0.0.1:0".parse().unwrap()).expect("bind should succeed");
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let first = bind("127.0.0.1:0".parse().unwrap()).expect("bind should succeed");
        let addr = first.local_addr().unwrap();

        // SO_REUSEADDR does not permit two live listeners on one port.
        let second = std::net::TcpListener::bind(addr);
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_port_released_after_drop() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = bind(addr).expect("bind should succeed");
        let bound = listener.local_addr().unwrap();

        drop(listener);
        bind(bound).expect("rebinding a released port should succeed");
    }
}
