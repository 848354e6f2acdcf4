//! Request handling
//!
//! Method validation, path resolution, and static file dispatch.

mod listing;
mod router;
mod static_files;

pub use router::handle_request;
