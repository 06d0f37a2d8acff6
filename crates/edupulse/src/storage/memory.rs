//! In-memory key-value store.
//!
//! Used as the test double for [`super::SqliteStore`]. Writes can be made to
//! fail on demand to exercise the out-of-sync path of the views.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

use super::{KeyValueStore, SharedStore};

/// A `BTreeMap`-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store behind a [`SharedStore`] handle.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Put a raw value under `key`, bypassing the failure switch.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots() {
            slots.insert(key.to_string(), value.to_string());
        }
    }

    fn slots(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(Error::storage_write(key, "quota exceeded"))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable(key)?;
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.check_writable(key)?;
        Ok(self.slots()?.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.slots()?.keys().cloned().collect())
    }
}
