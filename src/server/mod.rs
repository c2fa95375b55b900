//! Server lifecycle and route dispatch
//!
//! [`Server`] collects routes and settings, then [`Server::bind`] freezes them
//! into a [`Dispatcher`] owned by the accept loop. The process entry point
//! constructs exactly one `Server`.

pub mod dispatcher;
pub mod listener;
pub mod saved;
pub mod static_files;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;

use crate::config::Config;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::routing::RouteRegistry;

pub use dispatcher::Dispatcher;
pub use listener::{Listening, Timeouts};
pub use saved::SavedBox;
pub use static_files::{StaticFile, StaticFiles};

/// Cloneable control over the running flag.
///
/// `stop` may be called from anywhere, including from inside a request task.
#[derive(Debug, Clone)]
pub struct ServerHandle {
    running: Arc<watch::Sender<bool>>,
}

impl Default for ServerHandle {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            running: Arc::new(tx),
        }
    }
}

impl ServerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    pub fn stop(&self) {
        if self.running.send_replace(false) {
            tracing::info!("Server is stopping...");
        }
    }

    pub(crate) fn start(&self) {
        self.running.send_replace(true);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }
}

/// Route registration and configuration, before the server starts.
pub struct Server {
    config: Config,
    routes: RouteRegistry,
    handle: ServerHandle,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            routes: RouteRegistry::new(),
            handle: ServerHandle::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    pub fn handle(&self) -> ServerHandle {
        self.handle.clone()
    }

    /// Registers a GET handler for an exact path. Later registrations for
    /// the same path replace earlier ones.
    pub fn get<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Request, Response) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.routes.register(Method::GET, path, handler);
        self
    }

    /// Accepted but never dispatched.
    pub fn post<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Request, Response) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.routes.register(Method::POST, path, handler);
        self
    }

    /// Accepted but never dispatched.
    pub fn put<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Request, Response) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.routes.register(Method::PUT, path, handler);
        self
    }

    /// Accepted but never dispatched.
    pub fn delete<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&Request, Response) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.routes.register(Method::DELETE, path, handler);
        self
    }

    /// Serves static files from `dir`, creating it if it does not exist.
    pub fn static_files(&mut self, dir: impl Into<PathBuf>) -> anyhow::Result<&mut Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating static root {}", dir.display()))?;
        tracing::info!(root = %dir.display(), "Static files root set");
        self.config.static_root = dir;
        Ok(self)
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Binds the configured address and marks the server running.
    pub async fn bind(self) -> anyhow::Result<Listening> {
        self.config.validate()?;
        let listener = listener::bind(&self.config.listen_addr).await?;
        self.handle.start();

        let timeouts = Timeouts::from_config(&self.config);
        let dispatcher = Dispatcher::new(
            self.routes,
            StaticFiles::new(self.config.static_root),
            self.config.server_name,
            self.handle.clone(),
        );

        Ok(Listening::new(listener, dispatcher, self.handle, timeouts))
    }

    /// Binds and runs the accept loop until stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        self.bind().await?.serve().await
    }
}
