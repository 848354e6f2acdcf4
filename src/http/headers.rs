//! Cross-origin isolation header injection
//!
//! Browsers only enable `SharedArrayBuffer` (and therefore wasm threads) on
//! pages that are cross-origin isolated. Isolation requires the document and
//! every subresource to carry the COOP/COEP pair below, so the server stamps
//! them on every response it produces, whatever the status code.
//!
//! `Cache-Control: no-cache` rides along so browsers revalidate during rapid
//! edit/rebuild cycles instead of replaying a stale wasm binary.

use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL, SERVER};
use hyper::Response;

pub const OPENER_POLICY: &str = "same-origin";
pub const EMBEDDER_POLICY: &str = "require-corp";
pub const CACHE_POLICY: &str = "no-cache";

const COOP: HeaderName = HeaderName::from_static("cross-origin-opener-policy");
const COEP: HeaderName = HeaderName::from_static("cross-origin-embedder-policy");

/// Finalize a response before it is handed to hyper.
///
/// Single composition point: every response, 200 or 404 alike, passes through
/// here exactly once. Insertion is unconditional; nothing earlier in the
/// pipeline sets these names.
pub fn finalize<B>(response: &mut Response<B>, server_name: &str) {
    let headers = response.headers_mut();
    headers.insert(COOP, HeaderValue::from_static(OPENER_POLICY));
    headers.insert(COEP, HeaderValue::from_static(EMBEDDER_POLICY));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_POLICY));

    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
}
