// ABOUTME: Session file store — save, restore, list, delete, and rename session payloads.
// ABOUTME: Guards directory creation and overwrites behind confirmation; writes are atomic.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use glob::Pattern;
use serde::Serialize;
use tracing::{debug, info};

use super::error::SessionError;
use super::resolve::{StorageMode, StorageSettings};
use crate::prompt::Confirm;

pub type SessionResult<T> = Result<T, SessionError>;

/// One file in the storage directory.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Local>>,
}

/// Reads and writes opaque session payloads according to the storage settings.
#[derive(Debug, Clone)]
pub struct SessionStore {
    settings: StorageSettings,
}

impl SessionStore {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    pub fn resolve(&self, name_or_path: Option<&str>) -> PathBuf {
        self.settings.resolve(name_or_path)
    }

    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.settings.entry_path(name)
    }

    /// Make sure the storage directory exists before writing into it.
    ///
    /// Only centralized storage needs the directory. A missing one is created
    /// after the user agrees.
    pub fn ensure_storage_directory<C>(&self, confirm: &mut C) -> SessionResult<()>
    where
        C: Confirm + ?Sized,
    {
        if self.settings.mode != StorageMode::Centralized {
            return Ok(());
        }
        let dir = &self.settings.storage_directory;
        if dir.is_dir() {
            return Ok(());
        }
        let question = format!("Storage directory {} does not exist. Create it?", dir.display());
        if !confirm.confirm(&question)? {
            return Err(SessionError::DirectoryCreationDeclined(dir.clone()));
        }
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "created storage directory");
        Ok(())
    }

    /// Write `payload` to the session named by `name_or_path`.
    ///
    /// An existing file is only replaced once the user confirms.
    pub fn save<C>(
        &self,
        name_or_path: Option<&str>,
        payload: &[u8],
        confirm: &mut C,
    ) -> SessionResult<PathBuf>
    where
        C: Confirm + ?Sized,
    {
        let path = self.resolve(name_or_path);
        self.ensure_storage_directory(confirm)?;
        if path.exists() {
            let question = format!("Session {} already exists. Overwrite?", path.display());
            if !confirm.confirm(&question)? {
                return Err(SessionError::UserDeclined {
                    action: "Save",
                    path,
                });
            }
        }
        write_atomic(&path, payload)?;
        Ok(path)
    }

    /// Write `payload` without asking before an overwrite.
    pub fn save_forced<C>(
        &self,
        name_or_path: Option<&str>,
        payload: &[u8],
        confirm: &mut C,
    ) -> SessionResult<PathBuf>
    where
        C: Confirm + ?Sized,
    {
        let path = self.resolve(name_or_path);
        self.ensure_storage_directory(confirm)?;
        write_atomic(&path, payload)?;
        Ok(path)
    }

    /// Read back the payload of the session named by `name_or_path`.
    pub fn restore(&self, name_or_path: Option<&str>) -> SessionResult<Vec<u8>> {
        self.read(&self.resolve(name_or_path))
    }

    /// Read the payload stored at an already-resolved path.
    pub fn read(&self, path: &Path) -> SessionResult<Vec<u8>> {
        if !path.is_file() {
            return Err(SessionError::NotFound(path.to_path_buf()));
        }
        let payload = fs::read(path)?;
        debug!(path = %path.display(), bytes = payload.len(), "read session");
        Ok(payload)
    }

    /// Names of the sessions in the storage directory, sorted.
    ///
    /// A storage directory that does not exist yet holds no sessions.
    pub fn list(&self) -> SessionResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.name).collect())
    }

    /// Sessions in the storage directory with size and modification time.
    pub fn entries(&self) -> SessionResult<Vec<SessionEntry>> {
        let dir = &self.settings.storage_directory;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name == "." || name == ".." || name.starts_with(TMP_PREFIX) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            entries.push(SessionEntry {
                name,
                path: entry.path(),
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Entries whose names match a glob pattern, or all entries without one.
    pub fn entries_matching(&self, pattern: Option<&str>) -> SessionResult<Vec<SessionEntry>> {
        let pattern = pattern.map(Pattern::new).transpose()?;
        let mut entries = self.entries()?;
        entries.retain(|e| pattern.as_ref().is_none_or(|p| p.matches(&e.name)));
        Ok(entries)
    }

    /// Remove the session file at `path`.
    pub fn delete(&self, path: &Path) -> SessionResult<()> {
        if !path.is_file() {
            return Err(SessionError::NotFound(path.to_path_buf()));
        }
        fs::remove_file(path)?;
        info!(path = %path.display(), "deleted session");
        Ok(())
    }

    /// Move the session at `path` to wherever `new_name_or_path` resolves.
    ///
    /// Replacing an existing destination needs confirmation.
    pub fn rename<C>(
        &self,
        path: &Path,
        new_name_or_path: &str,
        confirm: &mut C,
    ) -> SessionResult<PathBuf>
    where
        C: Confirm + ?Sized,
    {
        if !path.is_file() {
            return Err(SessionError::NotFound(path.to_path_buf()));
        }
        let target = self.resolve(Some(new_name_or_path));
        if target == path {
            return Ok(target);
        }
        self.ensure_storage_directory(confirm)?;
        if target.exists() {
            let question = format!("Session {} already exists. Overwrite?", target.display());
            if !confirm.confirm(&question)? {
                return Err(SessionError::UserDeclined {
                    action: "Rename",
                    path: target,
                });
            }
        }
        move_file(path, &target)?;
        info!(from = %path.display(), to = %target.display(), "renamed session");
        Ok(target)
    }
}

/// Prefix of in-flight temp files; never listed as sessions.
const TMP_PREFIX: &str = ".winsession-";

/// Write through a uniquely named temp file beside `path` and persist it into place.
fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(TMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(parent)?;
    tmp.write_all(payload)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = payload.len(), "wrote session");
    Ok(())
}

/// Rename, falling back to copy and remove only when crossing filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    move_file_with(from, to, |a, b| fs::rename(a, b))
}

fn move_file_with<F>(from: &Path, to: &Path, rename: F) -> std::io::Result<()>
where
    F: FnOnce(&Path, &Path) -> std::io::Result<()>,
{
    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            if let Err(e) = fs::remove_file(from) {
                let _ = fs::remove_file(to);
                return Err(e);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
