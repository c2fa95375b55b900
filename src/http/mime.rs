//! Content type inference for static files.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get the Content-Type for a request path from its file extension.
///
/// Matching is on the final extension only, case-insensitively. JPEG files
/// are reported as `image/png`, which is what existing clients of this server
/// receive.
///
/// # Examples
/// ```
/// use lantern::http::mime::content_type_for;
/// assert_eq!(content_type_for("/img/logo.png"), "image/png");
/// assert_eq!(content_type_for("/img/logo.pngx"), "application/octet-stream");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png" | "jpg" | "jpeg") => "image/png",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("html") => TEXT_HTML,
        _ => OCTET_STREAM,
    }
}
