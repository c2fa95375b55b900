use std::panic::{AssertUnwindSafe, catch_unwind};

use serde_json::json;

use crate::error::HttpError;
use crate::http::mime::TEXT_HTML;
use crate::http::parser::parse_request_line;
use crate::http::path::{self, INDEX_PATH, ResolvedPath};
use crate::http::request::{Request, parse_query};
use crate::http::response::{Reply, Response, StatusCode};
use crate::routing::RouteRegistry;
use crate::server::ServerHandle;
use crate::server::saved::SavedBox;
use crate::server::static_files::StaticFiles;

/// Turns a request line into a reply.
///
/// Registered routes win over the built-in table, which wins over plain
/// static files.
pub struct Dispatcher {
    routes: RouteRegistry,
    static_files: StaticFiles,
    saved: SavedBox,
    server_name: String,
    handle: ServerHandle,
}

impl Dispatcher {
    pub fn new(
        routes: RouteRegistry,
        static_files: StaticFiles,
        server_name: impl Into<String>,
        handle: ServerHandle,
    ) -> Self {
        Self {
            routes,
            static_files,
            saved: SavedBox::new(),
            server_name: server_name.into(),
            handle,
        }
    }

    pub fn saved(&self) -> &SavedBox {
        &self.saved
    }

    /// Never fails: every outcome, including a missing line, becomes a reply.
    pub async fn dispatch(&self, line: Option<&str>) -> Reply {
        let request_line = match parse_request_line(line) {
            Ok(request_line) => request_line,
            Err(e) => {
                tracing::warn!(error = ?e, "Rejecting request with bad request line");
                return Reply::error(e.into());
            }
        };

        if request_line.known_method().is_none() {
            tracing::debug!(
                method = %request_line.method,
                "Unrecognized method, dispatching by path"
            );
        }

        let reply = match self.route(&request_line.uri).await {
            Ok(reply) => reply,
            Err(e) => match e.downcast_ref::<HttpError>() {
                Some(err) => Reply::error(*err),
                None => {
                    tracing::error!(
                        uri = %request_line.uri,
                        error = %e,
                        "Unexpected failure while dispatching"
                    );
                    Reply::internal_error()
                }
            },
        };

        tracing::info!(
            method = %request_line.method,
            uri = %request_line.uri,
            status = reply.status,
            "Request handled"
        );

        reply
    }

    async fn route(&self, uri: &str) -> anyhow::Result<Reply> {
        let resolved = path::resolve(uri);

        if let Some(handler) = self.routes.lookup(resolved.path) {
            let request = Request::from_uri(uri);
            let response = catch_unwind(AssertUnwindSafe(|| {
                handler.handle(&request, Response::default())
            }))
            .map_err(|_| anyhow::anyhow!("route handler for {} panicked", resolved.path))??;
            return Ok(Reply::from_handler(response));
        }

        self.builtin(&resolved).await
    }

    async fn builtin(&self, resolved: &ResolvedPath<'_>) -> anyhow::Result<Reply> {
        let ok = StatusCode::Ok.as_u16();

        let reply = match resolved.path {
            INDEX_PATH => self.file(INDEX_PATH, TEXT_HTML).await?,
            "/stop" => {
                self.handle.stop();
                Reply::text(ok, "Server is stopping...")
            }
            "/name" => Reply::text(ok, format!("The Server name is: {}", self.server_name)),
            "/about" => self.file("/about/about.html", TEXT_HTML).await?,
            "/api" => self.file("/api/api.html", TEXT_HTML).await?,
            "/books" => self.books(resolved.query).await,
            other => {
                let file = self.static_files.serve(other).await?;
                Reply::file(file.body, file.content_type)
            }
        };

        Ok(reply)
    }

    async fn file(&self, path: &str, content_type: &'static str) -> Result<Reply, HttpError> {
        let file = self.static_files.serve_as(path, content_type).await?;
        Ok(Reply::file(file.body, file.content_type))
    }

    /// Saves a non-empty `name` parameter, then lists everything saved.
    async fn books(&self, query: &str) -> Reply {
        if let Some(name) = parse_query(query).remove("name") {
            if !name.is_empty() {
                self.saved.append(name).await;
            }
        }

        let entries = self.saved.snapshot().await;
        Reply::json(&json!({
            "message": format!("Books saved: [{}]", entries.join(", "))
        }))
    }
}
