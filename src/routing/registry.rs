use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// A dynamic route handler.
///
/// Receives the request and a default `200` response to fill in. Returning
/// an [`HttpError`](crate::error::HttpError) yields that error's fixed reply;
/// any other error yields a 500.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &Request, response: Response) -> anyhow::Result<Response>;
}

impl<F> Handler for F
where
    F: Fn(&Request, Response) -> anyhow::Result<Response> + Send + Sync + 'static,
{
    fn handle(&self, request: &Request, response: Response) -> anyhow::Result<Response> {
        self(request, response)
    }
}

/// Exact-path route table keyed by `(method, path)`.
#[derive(Default)]
pub struct RouteRegistry {
    routes: HashMap<(Method, String), Arc<dyn Handler>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handler`, replacing any earlier registration for the same
    /// method and path.
    pub fn register(&mut self, method: Method, path: impl Into<String>, handler: impl Handler) {
        let path = path.into();

        if method != Method::GET {
            tracing::warn!(
                method = method.as_str(),
                path = %path,
                "Only GET routes are dispatched; this registration is inert"
            );
        }

        let previous = self
            .routes
            .insert((method, path.clone()), Arc::new(handler));

        if previous.is_some() {
            tracing::debug!(method = method.as_str(), path = %path, "Route handler replaced");
        }
    }

    /// The handler dispatch uses for `path`. Only GET registrations are
    /// consulted, whatever method the client sent.
    pub fn lookup(&self, path: &str) -> Option<Arc<dyn Handler>> {
        self.routes.get(&(Method::GET, path.to_string())).cloned()
    }

    pub fn contains(&self, method: Method, path: &str) -> bool {
        self.routes.contains_key(&(method, path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
