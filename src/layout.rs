// ABOUTME: Window-layout host seam — captures and applies the opaque layout payload.
// ABOUTME: File, stdio, and in-memory hosts; the payload format belongs to the host.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;

/// The editor side of a session: produces the current layout and applies a saved one.
///
/// Payloads are opaque bytes and are never interpreted here.
pub trait LayoutHost {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>>;

    fn apply(&mut self, payload: &[u8]) -> anyhow::Result<()>;
}

impl<T: LayoutHost + ?Sized> LayoutHost for Box<T> {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>> {
        (**self).capture()
    }

    fn apply(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        (**self).apply(payload)
    }
}

/// Treats one file as the live layout.
#[derive(Debug, Clone)]
pub struct FileLayout {
    path: PathBuf,
}

impl FileLayout {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LayoutHost for FileLayout {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>> {
        std::fs::read(&self.path)
            .with_context(|| format!("failed to read layout from {}", self.path.display()))
    }

    fn apply(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        std::fs::write(&self.path, payload)
            .with_context(|| format!("failed to write layout to {}", self.path.display()))
    }
}

/// Captures from stdin and applies to stdout, for use in pipelines.
#[derive(Debug, Default)]
pub struct StdioLayout;

impl LayoutHost for StdioLayout {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut payload = Vec::new();
        std::io::stdin()
            .read_to_end(&mut payload)
            .context("failed to read layout from stdin")?;
        Ok(payload)
    }

    fn apply(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(payload)?;
        out.flush()?;
        Ok(())
    }
}

/// Holds the layout in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayout {
    pub current: Vec<u8>,
}

impl MemoryLayout {
    pub fn new(current: impl Into<Vec<u8>>) -> Self {
        Self {
            current: current.into(),
        }
    }
}

impl LayoutHost for MemoryLayout {
    fn capture(&mut self) -> anyhow::Result<Vec<u8>> {
        Ok(self.current.clone())
    }

    fn apply(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        self.current = payload.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_layout_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("layout");
        std::fs::write(&path, b"before").unwrap();

        let mut host = FileLayout::new(&path);
        assert_eq!(host.capture().unwrap(), b"before");
        host.apply(b"after").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"after");
    }

    #[test]
    fn file_layout_missing_file_names_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("absent");
        let err = FileLayout::new(&path).capture().unwrap_err();
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn memory_layout_applies_in_place() {
        let mut host = MemoryLayout::new("one");
        host.apply(b"two").unwrap();
        assert_eq!(host.capture().unwrap(), b"two");
    }

    #[test]
    fn boxed_host_delegates() {
        let mut host: Box<dyn LayoutHost> = Box::new(MemoryLayout::new("one"));
        host.apply(b"two").unwrap();
        assert_eq!(host.capture().unwrap(), b"two");
    }
}
