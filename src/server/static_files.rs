//! Static file serving
//!
//! Files are read whole into memory on every request. There is no caching
//! and no conditional GET.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::HttpError;
use crate::http::mime;

/// File contents plus the content type they are served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serves `path` with a content type inferred from its extension.
    pub async fn serve(&self, path: &str) -> Result<StaticFile, HttpError> {
        self.serve_as(path, mime::content_type_for(path)).await
    }

    /// Serves `path` with a fixed content type.
    ///
    /// A read failure after the file was found is still reported as
    /// `NotFound`, so status and body always agree.
    pub async fn serve_as(
        &self,
        path: &str,
        content_type: &'static str,
    ) -> Result<StaticFile, HttpError> {
        let file_path = self.resolve(path).await?;

        match fs::read(&file_path).await {
            Ok(body) => {
                tracing::debug!(path = %path, bytes = body.len(), "Serving static file");
                Ok(StaticFile { body, content_type })
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to read static file");
                Err(HttpError::NotFound)
            }
        }
    }

    /// Maps a request path onto a regular file inside the root.
    async fn resolve(&self, path: &str) -> Result<PathBuf, HttpError> {
        let relative = path.trim_start_matches('/');

        let root = fs::canonicalize(&self.root).await.map_err(|e| {
            tracing::warn!(
                root = %self.root.display(),
                error = %e,
                "Static root is not accessible"
            );
            HttpError::NotFound
        })?;

        // Missing files fail here; that is the common 404.
        let resolved = fs::canonicalize(self.root.join(relative))
            .await
            .map_err(|_| HttpError::NotFound)?;

        if !resolved.starts_with(&root) {
            tracing::warn!(path = %path, "Rejected path outside static root");
            return Err(HttpError::NotFound);
        }

        let metadata = fs::metadata(&resolved)
            .await
            .map_err(|_| HttpError::NotFound)?;
        if !metadata.is_file() {
            return Err(HttpError::NotFound);
        }

        Ok(resolved)
    }
}
