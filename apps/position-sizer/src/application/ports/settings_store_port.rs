//! Settings Store Port (Driven Port)
//!
//! Key-value persistence for the last-used sizing settings.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Keys of the persisted settings. Values are numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    /// Last-used reward:risk ratio.
    RiskRatio,
    /// Last-used risk percentage.
    RiskPercentage,
    /// Last-used account balance.
    Balance,
}

impl SettingKey {
    /// Every key, in storage order.
    pub const ALL: [Self; 3] = [Self::RiskRatio, Self::RiskPercentage, Self::Balance];

    /// Storage key string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RiskRatio => "risk-ratio",
            Self::RiskPercentage => "risk-percentage",
            Self::Balance => "balance",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by settings store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("Settings store I/O failed for '{path}': {source}")]
    Io {
        /// Location of the backing storage.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Stored data could not be encoded or decoded.
    #[error("Settings store data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for reading and writing persisted settings.
pub trait SettingsStorePort: Send + Sync {
    /// Read a value; `None` when the key was never written.
    fn get(&self, key: SettingKey) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: SettingKey, value: &str) -> Result<(), StoreError>;

    /// Remove every stored value.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory implementation for testing and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<SettingKey, String>>,
}

impl InMemorySettingsStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with values (for test setup).
    #[must_use]
    pub fn with_values(values: &[(SettingKey, &str)]) -> Self {
        let values = values
            .iter()
            .map(|(key, value)| (*key, (*value).to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStorePort for InMemorySettingsStore {
    fn get(&self, key: SettingKey) -> Result<Option<String>, StoreError> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: SettingKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value.to_string());
        drop(values);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_match_persisted_names() {
        assert_eq!(SettingKey::RiskRatio.as_str(), "risk-ratio");
        assert_eq!(SettingKey::RiskPercentage.as_str(), "risk-percentage");
        assert_eq!(SettingKey::Balance.as_str(), "balance");
    }

    #[test]
    fn in_memory_set_and_get() {
        let store = InMemorySettingsStore::new();
        assert!(store.get(SettingKey::Balance).unwrap().is_none());

        store.set(SettingKey::Balance, "10000").unwrap();
        assert_eq!(
            store.get(SettingKey::Balance).unwrap().as_deref(),
            Some("10000")
        );

        store.set(SettingKey::Balance, "12000").unwrap();
        assert_eq!(
            store.get(SettingKey::Balance).unwrap().as_deref(),
            Some("12000")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn in_memory_clear() {
        let store =
            InMemorySettingsStore::with_values(&[(SettingKey::RiskRatio, "2"), (SettingKey::Balance, "500")]);
        assert_eq!(store.len(), 2);

        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
