//! JSON-file credential store
//!
//! The whole map is held in memory and written back to disk after every
//! mutation, so a crash never loses more than the in-progress write.

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::CredentialStore;

/// Default filename in the Sentinel config directory
const SESSION_FILE: &str = "session.json";

/// File-backed implementation of [`CredentialStore`]
///
/// File format is a flat JSON object of string values:
/// ```text
/// { "isLoggedIn": "true", "userEmail": "user@example.com" }
/// ```
pub struct FileCredentialStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileCredentialStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = if path.exists() {
            config::load_json_file(&path)?
        } else {
            BTreeMap::new()
        };
        debug!("Opened credential store at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open the store at ~/.config/sentinel/session.json
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path().context("Could not determine config directory")?;
        Self::open(path)
    }

    /// Get the default store path (~/.config/sentinel/session.json)
    pub fn default_path() -> Option<PathBuf> {
        config::config_path(SESSION_FILE)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        config::save_json_file(&self.path, entries)
    }

    fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.write().map_err(|_| anyhow!("store lock poisoned"))?;
        let mut updated = entries.clone();
        f(&mut updated);
        // Memory only changes once the file does
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.mutate(|entries| entries.clear())
    }
}
