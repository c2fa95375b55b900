use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Socket address the listener binds to.
    pub listen_addr: String,
    /// Directory static files are served from.
    pub static_root: PathBuf,
    /// Reported by the `/name` built-in route.
    pub server_name: String,
    /// How long a connection may take to deliver its request line.
    pub read_timeout_ms: u64,
    /// How long a client may take to accept the full response.
    pub write_timeout_ms: u64,
    /// How long a stopped server waits for in-flight connections before
    /// aborting them.
    pub shutdown_grace_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            static_root: PathBuf::from("webroot"),
            server_name: "TEST SERVER VALUE".to_string(),
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            shutdown_grace_ms: 5000,
        }
    }
}

impl Config {
    /// Loads the file named by `LANTERN_CONFIG` (if set), then applies the
    /// `LISTEN` and `STATIC_ROOT` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }
        if let Ok(root) = std::env::var("STATIC_ROOT") {
            cfg.static_root = PathBuf::from(root);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a defaulted map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// A zero timeout would expire before any I/O could happen.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.read_timeout_ms == 0 {
            anyhow::bail!("read_timeout_ms must be greater than zero");
        }
        if self.write_timeout_ms == 0 {
            anyhow::bail!("write_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
