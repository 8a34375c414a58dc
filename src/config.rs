// ABOUTME: Configuration loading for winsession.
// ABOUTME: Reads ~/.winsession/config.toml and writes back storage-mode toggles.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::session::{StorageMode, StorageSettings};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
}

/// Session storage options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Store every session under `storage_directory` and address it by name.
    pub use_centralized_storage_location: bool,
    /// Directory holding centralized sessions. A leading `~` is expanded.
    pub storage_directory: String,
    /// Name used when a command is given no session name.
    pub default_filename: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            use_centralized_storage_location: true,
            storage_directory: "~/.store".to_string(),
            default_filename: "Session".to_string(),
        }
    }
}

impl SessionConfig {
    /// The storage mode selected by `use_centralized_storage_location`.
    pub fn storage_mode(&self) -> StorageMode {
        if self.use_centralized_storage_location {
            StorageMode::Centralized
        } else {
            StorageMode::AdHoc
        }
    }

    pub fn set_storage_mode(&mut self, mode: StorageMode) {
        self.use_centralized_storage_location = mode == StorageMode::Centralized;
    }

    /// Resolve these options into the settings the session store works with.
    pub fn settings(&self) -> StorageSettings {
        StorageSettings {
            mode: self.storage_mode(),
            storage_directory: expand_home(&self.storage_directory),
            default_filename: self.default_filename.clone(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Write a new storage mode into the config file at `path`, keeping its other settings.
    pub fn persist_storage_mode(path: &Path, mode: StorageMode) -> anyhow::Result<Self> {
        let mut config = Self::load_from(path)?;
        config.session.set_storage_mode(mode);
        config.save_to(path)?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".winsession")
            .join("config.toml")
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if raw == "~" {
        return home();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert!(config.session.use_centralized_storage_location);
        assert_eq!(config.session.storage_directory, "~/.store");
        assert_eq!(config.session.default_filename, "Session");
        assert_eq!(config.session.storage_mode(), StorageMode::Centralized);
    }

    #[test]
    fn parse_config_toml() {
        let toml_str = r#"
[session]
use_centralized_storage_location = false
storage_directory = "/var/tmp/layouts"
default_filename = "Workspace"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.storage_mode(), StorageMode::AdHoc);
        let settings = config.session.settings();
        assert_eq!(settings.storage_directory, PathBuf::from("/var/tmp/layouts"));
        assert_eq!(settings.default_filename, "Workspace");
    }

    #[test]
    fn parse_partial_config_uses_defaults() {
        let toml_str = r#"
[session]
default_filename = "main"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.default_filename, "main");
        assert!(config.session.use_centralized_storage_location);
        assert_eq!(config.session.storage_directory, "~/.store");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.session.default_filename, "Session");
    }

    #[test]
    fn storage_mode_toggle_survives_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.session.set_storage_mode(StorageMode::AdHoc);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.storage_mode(), StorageMode::AdHoc);
        assert_eq!(loaded.session.storage_directory, "~/.store");
    }

    #[test]
    fn persist_storage_mode_keeps_other_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[session]\nstorage_directory = \"/srv/layouts\"\n").unwrap();

        let updated = Config::persist_storage_mode(&path, StorageMode::AdHoc).unwrap();
        assert_eq!(updated.session.storage_mode(), StorageMode::AdHoc);

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.storage_mode(), StorageMode::AdHoc);
        assert_eq!(loaded.session.storage_directory, "/srv/layouts");

        Config::persist_storage_mode(&path, StorageMode::Centralized).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.storage_mode(), StorageMode::Centralized);
    }

    #[test]
    fn expand_home_handles_tilde_forms() {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~/.store"), home.join(".store"));
        assert_eq!(expand_home("/abs/dir"), PathBuf::from("/abs/dir"));
        assert_eq!(expand_home("rel/~dir"), PathBuf::from("rel/~dir"));
    }
}
