//! Current-selection persistence
//!
//! One JSON file in the platform config dir holding the name of the current
//! workflow. Reads and writes are best-effort: a broken state file degrades
//! to "no selection", never to a failed command. The persisted name is not
//! validated against the registry here; staleness surfaces at dispatch as a
//! not-found error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const STATE_FILE: &str = "state.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    current_workflow: Option<String>,
}

/// Store for the persisted current selection.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store at the default platform location.
    pub fn open() -> Self {
        let path = crate::config::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STATE_FILE);
        Self { path }
    }

    /// Store at a specific path.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the current selection. Never fails; unreadable state reads as
    /// no selection.
    pub fn current(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<State>(&content) {
            Ok(state) => state.current_workflow,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable state file");
                None
            }
        }
    }

    /// Persist the current selection. Best-effort: failures are logged and
    /// swallowed.
    pub fn set_current(&self, name: &str) {
        let state = State {
            current_workflow: Some(name.to_string()),
        };
        if let Err(e) = self.write(&state) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist current workflow");
        }
    }

    fn write(&self, state: &State) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(state)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(&self.path, json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::open_at(dir.path().join("state.json"));

        assert_eq!(store.current(), None);
        store.set_current("alpha");
        assert_eq!(store.current().as_deref(), Some("alpha"));
        store.set_current("beta");
        assert_eq!(store.current().as_deref(), Some("beta"));
    }

    #[test]
    fn test_reopen_reads_persisted_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        StateStore::open_at(&path).set_current("alpha");
        assert_eq!(StateStore::open_at(&path).current().as_deref(), Some("alpha"));
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(StateStore::open_at(&path).current(), None);
    }

    #[test]
    fn test_missing_parent_is_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = StateStore::open_at(&path);
        store.set_current("alpha");
        assert_eq!(store.current().as_deref(), Some("alpha"));
    }
}
