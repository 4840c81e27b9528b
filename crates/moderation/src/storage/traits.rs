//! Storage trait definitions

use anyhow::Result;

/// Persistent string key-value store that survives process restarts
pub trait CredentialStore: Send + Sync {
    /// Get the value for a key, if present
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key
    fn clear(&self) -> Result<()>;

    /// True if the stored value equals `"true"`
    fn get_flag(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_deref() == Some("true"))
    }

    /// Store a boolean as `"true"` / `"false"`
    fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}
