use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::indicator::DEFAULT_BADGE_COLOR;

/// Global configuration loaded from `~/.config/vg/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VgConfig {
    /// Badge background color while a tab has detected videos.
    pub badge_color: String,
    /// Persist downloads started from the list UI.
    pub record_history: bool,
    /// Pending host events before producers wait.
    pub event_queue_capacity: usize,
    /// Pending history writes before new entries are dropped.
    pub history_queue_capacity: usize,
    /// Optional history database path; default is under the XDG state dir.
    #[serde(default)]
    pub history_db: Option<PathBuf>,
}

impl Default for VgConfig {
    fn default() -> Self {
        Self {
            badge_color: DEFAULT_BADGE_COLOR.to_string(),
            record_history: true,
            event_queue_capacity: 256,
            history_queue_capacity: 64,
            history_db: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vg")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VgConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VgConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VgConfig = toml::from_str(&data)?;
    Ok(cfg)
}
