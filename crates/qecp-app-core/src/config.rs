// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON config values on top of a raw blob store.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Key under which viewer preferences are stored.
pub const PREFS_KEY: &str = "viewer_prefs";

/// Where config blobs live (a directory, browser storage, a test map).
pub trait ConfigStore {
    /// Raw blob for `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace the blob for `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Config load/save failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No blob under the key.
    #[error("not found")]
    NotFound,
    /// Reading or writing the backing file failed.
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    /// The stored blob is not valid JSON for the requested type.
    #[error("config {key:?} is unreadable: {source}")]
    Decode {
        /// Key being loaded.
        key: String,
        /// Parser error.
        source: serde_json::Error,
    },
    /// The value could not be encoded.
    #[error("config {key:?} could not be encoded: {source}")]
    Encode {
        /// Key being saved.
        key: String,
        /// Encoder error.
        source: serde_json::Error,
    },
    /// The store itself is unusable.
    #[error("config store unavailable: {0}")]
    Unavailable(String),
}

/// Typed access to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Value under `key`; `Ok(None)` when missing or empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => return Ok(None),
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ConfigError::Decode {
                key: key.to_owned(),
                source,
            })
    }

    /// Like [`load`](Self::load) but falls back to `T::default()` when missing.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, ConfigError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Stores `value` under `key` as pretty JSON.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.store.save_raw(key, &data)
    }
}
