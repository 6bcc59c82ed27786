//! File configuration.
//!
//! Read from `<config_dir>/clipmenu/config.toml`. Every table is optional;
//! a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::options::ContextMenuOptions;

/// Default long-press duration before the native menu is triggered.
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Options applied when the host enables the menu at startup.
    #[serde(default)]
    pub context_menu: ContextMenuOptions,

    #[serde(default)]
    pub long_press: LongPressConfig,

    #[serde(default)]
    pub presentation: PresentationConfig,
}

/// Native long-press gesture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongPressConfig {
    #[serde(default = "default_long_press_ms")]
    pub min_duration_ms: u64,
}

fn default_long_press_ms() -> u64 {
    DEFAULT_LONG_PRESS_MS
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

/// Native menu presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Preferred strategy name, e.g. "edit_menu_interaction".
    /// Ignored when the platform does not support it.
    #[serde(default)]
    pub preferred: Option<String>,
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("clipmenu"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load config.toml from the platform config directory.
pub fn load_config() -> Result<PluginConfig, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<PluginConfig, ConfigError> {
    if !path.exists() {
        return Ok(PluginConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, PluginConfig::default());
        assert_eq!(config.long_press.min_duration_ms, DEFAULT_LONG_PRESS_MS);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[context_menu]\nenableCut = false\n\n[presentation]\npreferred = \"popup_menu\""
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.context_menu.enable_cut, Some(false));
        assert_eq!(config.context_menu.enable_copy, None);
        assert_eq!(config.long_press.min_duration_ms, DEFAULT_LONG_PRESS_MS);
        assert_eq!(config.presentation.preferred.as_deref(), Some("popup_menu"));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[long_press\nmin_duration_ms = ").unwrap();
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
