//! MIME type resolution
//!
//! Maps file extensions to `Content-Type` values without consulting the host
//! MIME database, so serving behavior is identical across machines.
//!
//! `.wasm` and `.js` are resolved through a forced override that is checked
//! before the extension table: `WebAssembly.instantiateStreaming` refuses
//! anything but `application/wasm`, and module scripts need a JavaScript type,
//! so these two must hold even if the table changes.

use std::path::Path;

/// Resolve the `Content-Type` for a file path.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use coiserve::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("app.wasm")), "application/wasm");
/// assert_eq!(content_type_for(Path::new("main.js")), "application/javascript");
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str());

    if let Some(forced) = forced_override(extension) {
        return forced;
    }

    base_content_type(extension)
}

/// Overrides evaluated before the extension table, in order.
fn forced_override(extension: Option<&str>) -> Option<&'static str> {
    match extension {
        Some("wasm") => Some("application/wasm"),
        Some("js") => Some("application/javascript"),
        _ => None,
    }
}

/// Best-guess `Content-Type` from the extension table.
fn base_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("mjs") => "application/javascript",
        Some("json" | "map") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Media
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Archives
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",

        // Default
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_override() {
        assert_eq!(content_type_for(Path::new("app.wasm")), "application/wasm");
        assert_eq!(
            content_type_for(Path::new("build/deep/raytracer.wasm")),
            "application/wasm"
        );
    }

    #[test]
    fn test_js_override() {
        assert_eq!(
            content_type_for(Path::new("main.js")),
            "application/javascript"
        );
    }

    #[test]
    fn test_base_table_unaffected() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("logo.png")), "image/png");
        assert_eq!(content_type_for(Path::new("style.css")), "text/css");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            content_type_for(Path::new("scene.blend")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("noextension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_override_is_case_sensitive() {
        // Matches the extension exactly, like the table does.
        assert_eq!(
            content_type_for(Path::new("app.WASM")),
            "application/octet-stream"
        );
    }
}
