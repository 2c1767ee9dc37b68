//! Application configuration

use anyhow::{Context, Result};
use colormap_core::{
    DEFAULT_COLORMAP_NAME, DEFAULT_RESOLUTION, MAX_EXPORT_COLORS, MIN_EXPORT_COLORS,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Number of samples used for the dense view and the source export
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
    /// Name given to new colormaps and exports
    #[serde(default = "default_name")]
    pub default_name: String,
    /// Directory of the last opened or saved file
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_num_colors() -> usize {
    DEFAULT_RESOLUTION
}

fn default_name() -> String {
    DEFAULT_COLORMAP_NAME.to_string()
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "colormap-maker", "colormap-maker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Sample count limited to what the source export supports
    pub fn effective_num_colors(&self) -> usize {
        self.num_colors.clamp(MIN_EXPORT_COLORS, MAX_EXPORT_COLORS)
    }

    /// Remember the directory of a file the user just opened or saved
    pub fn remember_directory(&mut self, file: &Path) {
        self.last_directory = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            num_colors: DEFAULT_RESOLUTION,
            default_name: DEFAULT_COLORMAP_NAME.to_string(),
            last_directory: None,
        }
    }
}

/// Config for one run of the tool.
///
/// A file that fails to load is never written back, so a hand-edited config
/// with a typo survives the run. An unchanged config is not rewritten either.
#[derive(Debug)]
pub struct ConfigStore {
    pub config: AppConfig,
    loaded: AppConfig,
    path: Option<PathBuf>,
    writable: bool,
}

impl ConfigStore {
    /// Load from `path`, or from the per-user location when `path` is None.
    /// Problems fall back to defaults.
    pub fn open(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) if path.exists() => AppConfig::load_from_path(path),
            Some(_) => Ok(AppConfig::default()),
            None => AppConfig::load(),
        };

        let (config, writable) = match result {
            Ok(config) => (config, true),
            Err(e) => {
                warn!("Using default config, leaving the file untouched: {:#}", e);
                (AppConfig::default(), false)
            }
        };

        Self {
            loaded: config.clone(),
            config,
            path: path.map(Path::to_path_buf),
            writable,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.config != self.loaded
    }

    /// Write the config back if it changed. Returns whether a file was written.
    pub fn persist(&mut self) -> Result<bool> {
        if !self.writable {
            debug!("Config did not load cleanly, not saving");
            return Ok(false);
        }
        if !self.is_dirty() {
            return Ok(false);
        }

        match &self.path {
            Some(path) => self.config.save_to_path(path)?,
            None => self.config.save()?,
        }
        self.loaded = self.config.clone();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = AppConfig {
            num_colors: 1024,
            default_name: "ocean".to_string(),
            last_directory: Some(PathBuf::from("/tmp/maps")),
            ..AppConfig::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.num_colors, 512);
        assert_eq!(config.default_name, "custom_colormap");
    }

    #[test]
    fn test_effective_num_colors_is_clamped() {
        let mut config = AppConfig::default();
        config.num_colors = 3;
        assert_eq!(config.effective_num_colors(), 16);
        config.num_colors = 100_000;
        assert_eq!(config.effective_num_colors(), 4096);
        config.num_colors = 700;
        assert_eq!(config.effective_num_colors(), 700);
    }

    #[test]
    fn test_remember_directory() {
        let mut config = AppConfig::default();
        config.remember_directory(Path::new("/data/maps/heat.json"));
        assert_eq!(config.last_directory, Some(PathBuf::from("/data/maps")));
        config.remember_directory(Path::new("heat.json"));
        assert_eq!(config.last_directory, None);
    }

    #[test]
    fn test_store_does_not_overwrite_unparsable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let original = "{\n  \"num_colors\": 1024,\n}\n";
        std::fs::write(&path, original).unwrap();

        let mut store = ConfigStore::open(Some(&path));
        assert_eq!(store.config, AppConfig::default());

        store.config.remember_directory(Path::new("/data/maps/heat.json"));
        assert!(store.is_dirty());
        assert!(!store.persist().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_store_skips_unchanged_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut store = ConfigStore::open(Some(&path));
        assert!(!store.persist().unwrap());
        assert!(!path.exists());

        store.config.num_colors = 256;
        assert!(store.persist().unwrap());
        assert_eq!(AppConfig::load_from_path(&path).unwrap().num_colors, 256);
        assert!(!store.is_dirty());
        assert!(!store.persist().unwrap());
    }
}
