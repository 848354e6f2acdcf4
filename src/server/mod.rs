//! Server lifecycle
//!
//! Listener creation, the accept loop, per-connection serving, and
//! signal-driven shutdown.

mod accept;
mod connection;
pub mod listener;
pub mod signal;

pub use accept::serve;
