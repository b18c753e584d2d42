//! User configuration.
//!
//! Read from `~/.config/hyprland-file-manager/config.json`. Every field is
//! optional and a missing file yields the defaults. The shell falls back to
//! the defaults when the file cannot be parsed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::services::thumbnail_service::DEFAULT_THUMBNAIL_MAX_BYTES;

pub const APP_DIR_NAME: &str = "hyprland-file-manager";
const SOCKET_FILE_NAME: &str = "hyprland-file-manager.sock";
pub const DEFAULT_LOG_FILTER: &str = "info,hyprland_file_manager_lib=debug";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileManagerConfig {
    /// Images above this size get no inline thumbnail.
    pub thumbnail_max_bytes: u64,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Override for the single-instance socket.
    pub socket_path: Option<PathBuf>,
}

impl Default for FileManagerConfig {
    fn default() -> Self {
        Self {
            thumbnail_max_bytes: DEFAULT_THUMBNAIL_MAX_BYTES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            socket_path: None,
        }
    }
}

impl FileManagerConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn socket_path(&self) -> PathBuf {
        self.socket_path.clone().unwrap_or_else(default_socket_path)
    }
}

pub fn config_file_path() -> anyhow::Result<PathBuf> {
    let base = directories::BaseDirs::new().context("could not resolve config directory")?;
    Ok(base.config_dir().join(APP_DIR_NAME).join("config.json"))
}

/// `$XDG_RUNTIME_DIR/hyprland-file-manager.sock`, or the temp dir when no
/// runtime dir is available.
pub fn default_socket_path() -> PathBuf {
    directories::BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(Path::to_path_buf))
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_FILE_NAME)
}
