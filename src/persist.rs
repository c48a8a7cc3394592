//! Saving and restoring the editor state under a single storage key.
//!
//! DESIGN
//! ======
//! Both containers are serialized together as one JSON blob
//! `{ buffer, work, timestamp }`. Storage itself sits behind the
//! [`KeyValueStore`] trait so the same code runs against browser
//! `localStorage` and against an in-memory map in tests and the CLI.
//!
//! Unreadable saved data is never fatal: it is logged and treated as
//! "nothing saved".

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::doc::Polygon;

/// Error returned by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage is not available in this environment.
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the operation (quota, permissions, ...).
    #[error("storage operation failed: {0}")]
    Backend(String),
}

/// Error returned by [`save`] and [`reset`].
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode saved state: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// String-keyed blob storage.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Everything that gets saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    /// Polygons in the buffer tray, in order.
    #[serde(default)]
    pub buffer: Vec<Polygon>,
    /// Polygons on the canvas, in order.
    #[serde(default)]
    pub work: Vec<Polygon>,
    /// When the state was saved, in milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl SavedState {
    /// Encode as the stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if a value cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode stored JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if `raw` is not a valid saved state.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Write both containers' contents under `key`.
///
/// # Errors
///
/// Returns [`PersistError`] if encoding or the store write fails.
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, state: &SavedState) -> Result<(), PersistError> {
    let raw = state.to_json()?;
    store.set(key, &raw)?;
    info!(buffer = state.buffer.len(), work = state.work.len(), "state saved");
    Ok(())
}

/// Read the saved state under `key`.
///
/// Returns `None` when nothing is saved, when storage can't be read, or
/// when the saved text doesn't parse; the latter two are logged.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<SavedState> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            error!(error = %e, "failed to read saved state");
            return None;
        }
    };
    match SavedState::from_json(&raw) {
        Ok(state) => {
            info!(buffer = state.buffer.len(), work = state.work.len(), "state loaded");
            Some(state)
        }
        Err(e) => {
            error!(error = %e, "failed to parse saved state");
            None
        }
    }
}

/// Delete the saved state under `key`.
///
/// # Errors
///
/// Returns [`PersistError`] if the store rejects the delete.
pub fn reset<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> Result<(), PersistError> {
    store.remove(key)?;
    info!("saved state reset");
    Ok(())
}
