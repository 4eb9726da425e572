//! Daemon configuration — `config.toml` in the data directory, overridden
//! by CLI flags / environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 4610;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// On-disk configuration shape (`config.toml`). All fields optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct FileConfig {
    port: Option<u16>,
    bind_address: Option<String>,
    log_level: Option<String>,
}

/// Resolved daemon configuration.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// JSON-RPC WebSocket port (also serves HTTP `GET /health`).
    pub port: u16,
    /// Bind address; `127.0.0.1` unless explicitly widened.
    pub bind_address: String,
    /// Data directory for the SQLite database and config file.
    pub data_dir: PathBuf,
    /// Default tracing filter, e.g. `info` or `taskdeskd=debug`.
    pub log_level: String,
}

impl DaemonConfig {
    /// Build the effective config: file values first, then CLI/env overrides.
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let file = load_file_config(&data_dir.join("config.toml"));

        Self {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_address
                .or(file.bind_address)
                .unwrap_or_else(default_bind_address),
            log_level: log_level.or(file.log_level).unwrap_or_else(default_log_level),
            data_dir,
        }
    }
}

/// `$TASKDESK_DATA_DIR`, else `$HOME/.taskdesk`, else `./.taskdesk`.
fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TASKDESK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".taskdesk"),
        Err(_) => PathBuf::from(".taskdesk"),
    }
}

fn load_file_config(path: &Path) -> FileConfig {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };
    match toml::from_str(&raw) {
        Ok(cfg) => {
            info!(path = %path.display(), "loaded config file");
            cfg
        }
        Err(e) => {
            warn!(path = %path.display(), err = %e, "invalid config file — using defaults");
            FileConfig::default()
        }
    }
}
