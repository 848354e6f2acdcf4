//! Static file resolution and serving
//!
//! Resolves request paths against the configured root, with index file
//! support, directory listings, trailing-slash redirects, and conditional
//! request handling.

use crate::config::ServerConfig;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, conditional, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve a request path from the configured root directory.
pub async fn serve(ctx: &RequestContext<'_>, cfg: &ServerConfig) -> Response<Full<Bytes>> {
    let Some(relative) = sanitize_path(ctx.path) else {
        logger::log_warning(&format!("Rejected unsafe path: {}", ctx.path));
        return http::build_404_response();
    };

    let full_path = Path::new(&cfg.root).join(&relative);

    let Ok(metadata) = fs::metadata(&full_path).await else {
        return http::build_404_response();
    };

    if metadata.is_dir() {
        // Directory URLs need the trailing slash so relative links resolve.
        if !ctx.path.ends_with('/') {
            return http::build_301_response(&format!("{}/", ctx.path));
        }
        return serve_directory(ctx, cfg, &full_path).await;
    }

    serve_file(ctx, &full_path).await
}

/// Reduce a request path to a safe relative path under the root.
///
/// Only normal components survive; `..`, absolute roots, and drive prefixes
/// reject the whole path. Resolution can therefore never escape the root,
/// without touching the filesystem.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();

    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(clean)
}

/// Serve a directory: try index files in order, fall back to a listing.
async fn serve_directory(
    ctx: &RequestContext<'_>,
    cfg: &ServerConfig,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index_file in &cfg.index_files {
        let candidate = dir.join(index_file);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return serve_file(ctx, &candidate).await;
        }
    }

    match listing::render(dir, ctx.path).await {
        Some(html) => http::build_html_response(html, ctx.is_head),
        None => http::build_404_response(),
    }
}

/// Serve a single file with conditional request support.
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let last_modified = fs::metadata(path)
        .await
        .ok()
        .and_then(|m| m.modified().ok());

    if let Some(mtime) = last_modified {
        if conditional::not_modified(ctx.if_modified_since.as_deref(), mtime) {
            return http::build_304_response();
        }
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let content_type = mime::content_type_for(path);
    let last_modified = last_modified.map(conditional::http_date);

    http::build_file_response(content, content_type, last_modified.as_deref(), ctx.is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_path() {
        assert_eq!(
            sanitize_path("/build/app.wasm"),
            Some(PathBuf::from("build/app.wasm"))
        );
    }

    #[test]
    fn test_sanitize_root() {
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
    }

    #[test]
    fn test_sanitize_rejects_parent_components() {
        assert_eq!(sanitize_path("/../etc/passwd"), None);
        assert_eq!(sanitize_path("/build/../../secret"), None);
    }

    #[test]
    fn test_sanitize_drops_current_dir() {
        assert_eq!(
            sanitize_path("/./build/./main.js"),
            Some(PathBuf::from("build/main.js"))
        );
    }
}
