//! Request entry point
//!
//! Validates the method, decodes the path, dispatches to static file serving,
//! and finalizes every response with the cross-origin isolation headers.

use crate::config::AppState;
use crate::http::{self, headers};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Per-request context handed down to the static file resolver.
pub struct RequestContext<'a> {
    /// Percent-decoded request path, query string stripped.
    pub path: &'a str,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
}

/// Handle one HTTP request end to end.
///
/// Every exit path runs through `headers::finalize`, so 404s and 405s carry
/// the isolation headers just like file responses do.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    let mut response = match method {
        Method::GET | Method::HEAD => {
            let path = percent_decode(&raw_path);
            let ctx = RequestContext {
                path: &path,
                is_head,
                if_modified_since: req
                    .headers()
                    .get("if-modified-since")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            super::static_files::serve(&ctx, &state.config.server).await
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    headers::finalize(&mut response, &state.config.http.server_name);

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path: raw_path,
            status: response.status().as_u16(),
            body_bytes: response
                .body()
                .size_hint()
                .exact()
                .unwrap_or(0)
                .try_into()
                .unwrap_or(usize::MAX),
            request_time_us: started.elapsed().as_micros().try_into().unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.format);
    }

    Ok(response)
}

/// Decode percent-encoded octets in a request path.
///
/// Invalid escapes and non-UTF-8 results leave the path unchanged, which then
/// simply fails to resolve to a file.
fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(byte) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(decoded).unwrap_or_else(|_| path.to_string())
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode_plain() {
        assert_eq!(percent_decode("/app.wasm"), "/app.wasm");
    }

    #[test]
    fn test_percent_decode_space() {
        assert_eq!(percent_decode("/my%20scene.json"), "/my scene.json");
    }

    #[test]
    fn test_percent_decode_invalid_escape() {
        assert_eq!(percent_decode("/bad%zzpath"), "/bad%zzpath");
        assert_eq!(percent_decode("/truncated%2"), "/truncated%2");
    }

    #[test]
    fn test_percent_decode_non_utf8_falls_back() {
        assert_eq!(percent_decode("/%ff%fe"), "/%ff%fe");
    }
}
