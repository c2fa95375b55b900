//! Request URI to dispatch key.

/// A URI split into its dispatch path and raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath<'a> {
    /// Dispatch key and static-root-relative file path.
    pub path: &'a str,
    /// Everything after the first `?`, undecoded. Empty when absent.
    pub query: &'a str,
}

pub const INDEX_PATH: &str = "/index.html";

/// Splits on the first `?` and maps `/` to `/index.html`.
///
/// Traversal sequences are left alone here; the static file server confines
/// the final filesystem path to its root.
pub fn resolve(uri: &str) -> ResolvedPath<'_> {
    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
    let path = if path == "/" { INDEX_PATH } else { path };
    ResolvedPath { path, query }
}
