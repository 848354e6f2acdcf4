//! coiserve - a static file server for cross-origin isolated pages
//!
//! Serves a directory tree over HTTP/1.1 and stamps every response with the
//! headers browsers require before they enable `SharedArrayBuffer` and wasm
//! threads on the served page. `.wasm` and `.js` files always get the correct
//! `Content-Type`, independent of any host MIME database.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
