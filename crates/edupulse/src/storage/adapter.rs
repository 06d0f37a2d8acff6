//! Entity store adapter.
//!
//! `load` never fails: an absent, unreadable or structurally incompatible slot
//! yields the caller's default, which is *not* written back. `save` rewrites
//! the slot on every call and reports failures as [`Error::StorageWrite`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{envelope, KeyValueStore};

/// Read the slot `key`, falling back to `default`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("Slot {} is empty, using defaults", key);
            default
        }
        Err(e) => {
            warn!("Falling back to defaults for slot {}: {}", key, e);
            default
        }
    }
}

/// Read the slot `key`, distinguishing "absent" from "unreadable".
///
/// # Errors
///
/// Returns [`Error::StorageRead`] if the slot holds a value that cannot be
/// migrated or deserialized into `T`, or the store itself fails.
pub fn try_load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store
        .get(key)
        .map_err(|e| Error::storage_read(key, e.to_string()))?
    else {
        return Ok(None);
    };

    let data = envelope::unwrap(key, &raw)?;
    let value = serde_json::from_value(data).map_err(|e| Error::storage_read(key, e.to_string()))?;
    Ok(Some(value))
}

/// Serialize `value` and write it to the slot `key`.
///
/// # Errors
///
/// Returns [`Error::StorageWrite`] if serialization or the write fails.
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = envelope::wrap(value).map_err(|e| Error::storage_write(key, e.to_string()))?;
    store.set(key, &raw).map_err(|e| match e {
        Error::StorageWrite { .. } => e,
        other => Error::storage_write(key, other.to_string()),
    })
}
