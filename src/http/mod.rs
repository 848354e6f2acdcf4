//! HTTP protocol helpers
//!
//! Response building, MIME resolution, conditional requests, and the
//! cross-origin isolation header injection applied to every response.

pub mod conditional;
pub mod headers;
pub mod mime;
pub mod response;

pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_file_response, build_html_response,
};
