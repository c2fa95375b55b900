use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::ServerHandle;
use crate::server::dispatcher::Dispatcher;

pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not listen on {addr}"))
}

/// A bound server, ready to accept.
pub struct Listening {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    handle: ServerHandle,
    timeouts: Timeouts,
}

/// Per-connection I/O bounds and the shutdown grace period.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub read: Duration,
    pub write: Duration,
    pub shutdown_grace: Duration,
}

impl Timeouts {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            read: cfg.read_timeout(),
            write: cfg.write_timeout(),
            shutdown_grace: cfg.shutdown_grace(),
        }
    }
}

impl Listening {
    pub(crate) fn new(
        listener: TcpListener,
        dispatcher: Dispatcher,
        handle: ServerHandle,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            listener,
            dispatcher: Arc::new(dispatcher),
            handle,
            timeouts,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn handle(&self) -> ServerHandle {
        self.handle.clone()
    }

    /// Accepts until stopped, one task per connection. Once stopped, no new
    /// connection is accepted and in-flight ones get the shutdown grace
    /// period to finish before they are aborted.
    pub async fn serve(self) -> anyhow::Result<()> {
        let mut running = self.handle.subscribe();
        let mut connections = JoinSet::new();

        if let Ok(addr) = self.listener.local_addr() {
            info!("Listening on {}", addr);
        }

        loop {
            if !*running.borrow_and_update() {
                break;
            }

            tokio::select! {
                accepted = self.listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::error!(error = %e, "Error accepting connection");
                            continue;
                        }
                    };
                    info!("Accepted connection from {}", peer);

                    let dispatcher = Arc::clone(&self.dispatcher);
                    let timeouts = self.timeouts;
                    connections.spawn(async move {
                        let mut conn = Connection::new(socket, dispatcher, timeouts.read)
                            .with_write_timeout(timeouts.write);
                        if let Err(e) = conn.run().await {
                            tracing::error!("Connection error from {}: {}", peer, e);
                        }
                    });
                }

                changed = running.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }

                Some(finished) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!(error = %e, "Connection task failed");
                    }
                }
            }
        }

        info!(in_flight = connections.len(), "Server stopped accepting, draining connections");
        let drained = timeout(self.timeouts.shutdown_grace, async {
            while let Some(finished) = connections.join_next().await {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "Connection task failed");
                }
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                remaining = connections.len(),
                "Shutdown grace period elapsed, aborting connections"
            );
            connections.shutdown().await;
        }
        info!("Server stopped");

        Ok(())
    }
}
