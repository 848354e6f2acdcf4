//! Directory listing generation
//!
//! Renders an HTML index for directories without an index file. Entries are
//! sorted case-insensitively, directories carry a trailing slash, names are
//! HTML-escaped and hrefs percent-encoded.

use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// Render a directory listing, or `None` if the directory cannot be read.
pub async fn render(dir: &Path, request_path: &str) -> Option<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await.ok()?;

    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        entries.push(name);
    }

    entries.sort_by_key(|name| name.to_lowercase());

    Some(render_html(request_path, &entries))
}

fn render_html(request_path: &str, entries: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(request_path));

    let mut items = String::new();
    for name in entries {
        let _ = writeln!(
            items,
            "<li><a href=\"{}\">{}</a></li>",
            encode_href(name),
            escape_html(name)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<hr>
<ul>
{items}</ul>
<hr>
</body>
</html>
"#
    )
}

/// Escape text for HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode a relative href, leaving unreserved characters and `/`.
fn encode_href(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            other => {
                let _ = write!(encoded, "%{other:02X}");
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"a&b\"</script>"),
            "&lt;script&gt;&quot;a&amp;b&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("app.wasm"), "app.wasm");
        assert_eq!(encode_href("my scene.json"), "my%20scene.json");
        assert_eq!(encode_href("sub/"), "sub/");
    }

    #[test]
    fn test_render_html_structure() {
        let html = render_html("/build/", &["app.wasm".to_string(), "sub/".to_string()]);
        assert!(html.contains("<title>Directory listing for /build/</title>"));
        assert!(html.contains("<a href=\"app.wasm\">app.wasm</a>"));
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
    }
}
