use super::plugin_config::PluginConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file error variants.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading or writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The default configuration could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Reads the plugin configuration file, creating a default one when absent.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let path = PluginConfig::default_config_path().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Uses a specific file.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the configuration file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the plugin configuration.
    ///
    /// A missing file is created with defaults. A malformed file is left
    /// untouched and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load(&self) -> Result<PluginConfig, ConfigError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Config file not found, creating default");
            let default_config = PluginConfig::default();
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&self.path, &default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.path)?;
        match toml::from_str::<PluginConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to parse config file: {}. Using defaults.", e);
                Ok(PluginConfig::default())
            }
        }
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::PLACEHOLDER_API_URL;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default_if_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let store = ConfigStore::with_path(path.clone());

        let config = store.load().unwrap();
        assert_eq!(config.api_url.as_deref(), Some(PLACEHOLDER_API_URL));
        assert!(path.exists());

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.max_images, 5);
        assert!(!reloaded.to_settings().is_enabled());
    }

    #[test]
    fn test_load_handles_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_images = [").unwrap();

        let config = ConfigStore::with_path(path.clone()).load().unwrap();
        assert_eq!(config.max_images, 5);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "max_images = [");
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://localhost:3000/api\"\nmax_file_size_mb = 1\n").unwrap();

        let settings = ConfigStore::with_path(path).load().unwrap().to_settings();
        assert_eq!(settings.endpoint.as_deref(), Some("http://localhost:3000/api"));
        assert_eq!(settings.max_file_size_bytes(), 1024 * 1024);
    }
}
