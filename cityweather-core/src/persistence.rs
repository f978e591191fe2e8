//! Snapshot storage for the search history: a single key holding the
//! serialized entry list, with get/set/clear semantics.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{fmt::Debug, fs, path::PathBuf};

/// Key-value storage for the history snapshot. Injected into
/// [`crate::HistoryStore`] so tests can substitute an in-memory double.
pub trait HistoryPersistence: Debug {
    /// The stored snapshot, or `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    fn write(&self, payload: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// File-backed snapshot under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the default platform location.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self {
            path: dirs.data_dir().join("history.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl HistoryPersistence for FileStore {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history file: {}", self.path.display()))?;

        Ok(Some(contents))
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, payload)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove history file: {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::at(dir.path().join("nested").join("history.json"))
    }

    #[test]
    fn read_of_a_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn write_creates_parent_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));
    }

    #[test]
    fn write_overwrites_the_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write("[1]").unwrap();
        store.write("[2]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn clear_removes_the_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write("[]").unwrap();
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);

        store.clear().unwrap();
    }
}
