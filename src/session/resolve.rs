// ABOUTME: Pure session path resolution from a name or path and the storage settings.
// ABOUTME: Centralized mode addresses sessions by name; ad-hoc mode takes paths as given.

use std::fmt;
use std::path::PathBuf;

/// Where session files live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// All sessions live in one directory and are addressed by name.
    Centralized,
    /// Each session lives at whatever path the user names.
    AdHoc,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Centralized => f.write_str("centralized"),
            StorageMode::AdHoc => f.write_str("ad-hoc"),
        }
    }
}

/// Everything path resolution depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub mode: StorageMode,
    pub storage_directory: PathBuf,
    pub default_filename: String,
}

impl StorageSettings {
    /// Resolve a session name or path into the file it refers to.
    ///
    /// With no name, the default filename is used: inside the storage directory
    /// when centralized, relative to the current directory otherwise.
    pub fn resolve(&self, name_or_path: Option<&str>) -> PathBuf {
        match (self.mode, name_or_path) {
            (StorageMode::Centralized, None) => {
                self.storage_directory.join(&self.default_filename)
            }
            (StorageMode::AdHoc, None) => PathBuf::from(&self.default_filename),
            (StorageMode::Centralized, Some(name)) => self.storage_directory.join(name),
            (StorageMode::AdHoc, Some(path)) => PathBuf::from(path),
        }
    }

    /// Path of an entry listed from the storage directory, whatever the mode.
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.storage_directory.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(mode: StorageMode) -> StorageSettings {
        StorageSettings {
            mode,
            storage_directory: PathBuf::from("/home/user/.store"),
            default_filename: "Session".to_string(),
        }
    }

    #[test]
    fn centralized_joins_name_to_storage_directory() {
        let s = settings(StorageMode::Centralized);
        for name in ["work", "my session", "a.b.c", "nested/child"] {
            assert_eq!(s.resolve(Some(name)), PathBuf::from("/home/user/.store").join(name));
        }
    }

    #[test]
    fn centralized_default_uses_default_filename() {
        let s = settings(StorageMode::Centralized);
        assert_eq!(s.resolve(None), PathBuf::from("/home/user/.store/Session"));
    }

    #[test]
    fn ad_hoc_returns_path_unchanged() {
        let s = settings(StorageMode::AdHoc);
        for path in ["/tmp/layout", "relative/layout", "plain"] {
            assert_eq!(s.resolve(Some(path)), PathBuf::from(path));
        }
    }

    #[test]
    fn ad_hoc_default_is_relative_to_current_directory() {
        let s = settings(StorageMode::AdHoc);
        let resolved = s.resolve(None);
        assert_eq!(resolved, PathBuf::from("Session"));
        assert!(resolved.is_relative());
    }

    #[test]
    fn entry_path_ignores_mode() {
        let central = settings(StorageMode::Centralized);
        let ad_hoc = settings(StorageMode::AdHoc);
        assert_eq!(central.entry_path("x"), ad_hoc.entry_path("x"));
        assert_eq!(ad_hoc.entry_path("x"), PathBuf::from("/home/user/.store/x"));
    }

    #[test]
    fn storage_mode_display() {
        assert_eq!(StorageMode::Centralized.to_string(), "centralized");
        assert_eq!(StorageMode::AdHoc.to_string(), "ad-hoc");
    }
}
