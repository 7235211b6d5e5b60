// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use qecp_app_core::config::{ConfigError, ConfigStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share state, so a test can hand one clone to a
/// [`ConfigService`](qecp_app_core::config::ConfigService) and inspect the
/// other. Every `load_raw`/`save_raw` attempt is counted, failed ones included.
///
/// # Example
///
/// ```
/// use qecp_dry_tests::InMemoryConfigStore;
/// use qecp_app_core::config::ConfigService;
/// use qecp_app_core::config_port::ConfigPort;
/// use qecp_app_core::prefs::ViewerPrefs;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save_prefs(&ViewerPrefs::default());
/// assert_eq!(store.save_count(), 1);
/// assert_eq!(service.load_prefs(), Some(ViewerPrefs::default()));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one blob.
    pub fn with_blob(key: &str, data: &[u8]) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), data.to_vec());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Configure the store to fail on save operations.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Raw blob stored under `key`, without counting a load.
    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(ConfigError::Unavailable("simulated load failure".into()));
        }

        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;

        if inner.fail_on_save {
            return Err(ConfigError::Unavailable("simulated save failure".into()));
        }

        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_save_load() {
        let store = InMemoryConfigStore::new();
        store.save_raw("test", b"hello").unwrap();
        assert_eq!(store.load_raw("test").unwrap(), b"hello");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn load_missing_key_returns_not_found() {
        let store = InMemoryConfigStore::new();
        assert!(matches!(store.load_raw("missing"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn failures_are_counted_and_store_nothing() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(store.save_raw("key", b"value").is_err());
        assert_eq!(store.save_count(), 1);
        assert!(!store.contains_key("key"));

        store.set_fail_on_load(true);
        assert!(matches!(store.load_raw("key"), Err(ConfigError::Unavailable(_))));
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn clones_share_state() {
        let a = InMemoryConfigStore::with_blob("k", b"v");
        let b = a.clone();
        b.save_raw("other", b"x").unwrap();
        assert!(a.contains_key("other"));
        assert_eq!(a.blob("k").as_deref(), Some(&b"v"[..]));
        assert_eq!(a.save_count(), 1);
    }
}
