//! Toggle configuration.
//!
//! Read from `$XDG_CONFIG_HOME/olm-toggle/config.json`. Every field is
//! optional; a missing or unreadable file falls back to the defaults.

use crate::scheduler::MAX_PERIOD;
use crate::services::unit_state::DEFAULT_POLL_INTERVAL;
use log::{info, warn};
use olm_unit::UnitScope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "olm-toggle";
const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Unit to manage, e.g. "olm.service"
    pub unit: String,
    pub scope: UnitScope,
    /// Seconds between two status checks
    pub poll_interval_secs: u64,
    /// `systemctl` binary used for status checks
    pub systemctl: String,
    pub title: String,
    pub icon_name: String,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            unit: "olm.service".to_string(),
            scope: UnitScope::System,
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            systemctl: "systemctl".to_string(),
            title: "OLM Tunnel".to_string(),
            icon_name: "network-vpn-symbolic".to_string(),
        }
    }
}

impl ToggleConfig {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location.
    /// On first run the defaults are written there as a template.
    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                let config = Self::default();
                match config.save(&path) {
                    Ok(()) => info!("Wrote default config to {}", path.display()),
                    Err(e) => warn!("Failed to write {}: {}", path.display(), e),
                }
                config
            }
            None => {
                warn!("No config directory found, using defaults");
                Self::default()
            }
        }
    }

    /// Load from config file, or return default if not found
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to config file
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Poll interval, between one second and one day.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.clamp(1, MAX_PERIOD.as_secs()))
    }
}
