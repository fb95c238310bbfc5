//! Chore completion persistence
//!
//! Completion state is a flat JSON object of completion key to flag, e.g.
//! `{"daily-d1-2026-02-11": true}`. Keys embed their period, so stale
//! entries are simply never looked up again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::StoreError;

/// File-backed completion map
#[derive(Debug)]
pub struct CompletionStore {
    path: PathBuf,
    completions: HashMap<String, bool>,
}

impl CompletionStore {
    /// `<data dir>/homeboard/chores.json`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let data = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(data.join("homeboard").join("chores.json"))
    }

    /// Open the store at `path`. A missing or unreadable file yields an
    /// empty map.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let completions = load(&path);
        Self { path, completions }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn completions(&self) -> &HashMap<String, bool> {
        &self.completions
    }

    pub fn is_done(&self, key: &str) -> bool {
        self.completions.get(key).copied().unwrap_or(false)
    }

    /// Flip the flag for `key` and return the new state
    pub fn toggle(&mut self, key: &str) -> bool {
        let done = !self.is_done(key);
        if done {
            self.completions.insert(key.to_string(), true);
        } else {
            self.completions.remove(key);
        }
        done
    }

    /// Write the map back to disk
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::SaveError(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(&self.completions)
            .map_err(|e| StoreError::SaveError(e.to_string()))?;

        std::fs::write(&self.path, contents).map_err(|e| StoreError::SaveError(e.to_string()))
    }
}

fn load(path: &Path) -> HashMap<String, bool> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No completion file at {}", path.display());
            return HashMap::new();
        }
        Err(e) => {
            warn!("Failed to read {}, using empty completions: {}", path.display(), e);
            return HashMap::new();
        }
    };

    if contents.trim().is_empty() {
        return HashMap::new();
    }

    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!("Failed to parse {}, using empty completions: {}", path.display(), e);
        HashMap::new()
    })
}
