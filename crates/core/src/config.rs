//! Application configuration handling.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory under the user config dir holding our settings.
pub const DEFAULT_CONFIG_DIR: &str = "fleetsim";
/// Settings file name.
pub const CONFIG_FILE: &str = "config.json";

/// User-tunable settings for the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// MPH delta applied by the accelerate/decelerate menu entries.
    #[serde(default = "default_speed_step")]
    pub speed_step_mph: u32,
    /// Whether the title banner is drawn.
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

fn default_speed_step() -> u32 {
    5
}

fn default_show_banner() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            speed_step_mph: default_speed_step(),
            show_banner: default_show_banner(),
        }
    }
}

impl AppConfig {
    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load settings from the default location. A missing file yields the
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load settings from the given path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Write a default settings file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(AppConfig::config_path())
}

/// Write a default settings file at the given path if none exists yet.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(path, serialized).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("config.json"))?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.speed_step_mph, 5);
        assert!(config.show_banner);
        Ok(())
    }

    #[test]
    fn defaults_round_trip_through_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config, AppConfig::default());

        // a second call must not clobber user edits
        fs::write(&path, r#"{ "speed_step_mph": 10 }"#)?;
        ensure_default_config_at(&path)?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.speed_step_mph, 10);
        assert!(config.show_banner);
        Ok(())
    }
}
