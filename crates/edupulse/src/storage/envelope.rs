//! Versioned slot values.
//!
//! Every value edupulse writes is wrapped as `{"version": N, "data": ...}`.
//! A bare value (no envelope) is what the browser dashboard wrote and is read
//! as version 0. On read, the data is passed through one migration hook per
//! version step until it reaches [`CURRENT_VERSION`].

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// The slot format version written by this build.
pub const CURRENT_VERSION: u64 = 1;

/// Rewrites a slot's data from version `n` to `n + 1`.
pub type SlotMigration = fn(key: &str, data: Value) -> Result<Value>;

/// Migration hooks; entry `n` upgrades version `n` data to `n + 1`.
const MIGRATIONS: &[SlotMigration] = &[migrate_v0_to_v1];

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    version: u64,
    data: &'a T,
}

/// Serialize `data` inside a current-version envelope.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
pub fn wrap<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let envelope = Envelope {
        version: CURRENT_VERSION,
        data,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a stored value and migrate its data to the current version.
///
/// # Errors
///
/// Returns [`Error::StorageRead`] if the value is not JSON, was written by a
/// newer build, or a migration hook rejects it.
pub fn unwrap(key: &str, raw: &str) -> Result<Value> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| Error::storage_read(key, e.to_string()))?;
    let (mut version, mut data) = split(parsed);

    if version > CURRENT_VERSION {
        return Err(Error::storage_read(
            key,
            format!("slot version {version} is newer than supported version {CURRENT_VERSION}"),
        ));
    }

    while version < CURRENT_VERSION {
        let step = usize::try_from(version)
            .ok()
            .and_then(|index| MIGRATIONS.get(index))
            .ok_or_else(|| {
                Error::storage_read(key, format!("no migration from slot version {version}"))
            })?;
        data = step(key, data)?;
        version += 1;
        debug!("Migrated slot {} to version {}", key, version);
    }

    Ok(data)
}

/// Split an envelope into `(version, data)`; anything else is version 0.
fn split(value: Value) -> (u64, Value) {
    match value {
        Value::Object(mut map)
            if map.len() == 2 && map.contains_key("data") && map.contains_key("version") =>
        {
            match map.get("version").and_then(Value::as_u64) {
                Some(version) => {
                    let data = map.remove("data").unwrap_or(Value::Null);
                    (version, data)
                }
                None => (0, Value::Object(map)),
            }
        }
        other => (0, other),
    }
}

/// Legacy values carry the same record shapes as version 1.
fn migrate_v0_to_v1(_key: &str, data: Value) -> Result<Value> {
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_writes_current_version() {
        let raw = wrap(&vec![1, 2, 3]).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({"version": CURRENT_VERSION, "data": [1, 2, 3]}));
    }

    #[test]
    fn test_unwrap_current_envelope() {
        let data = unwrap("k", r#"{"version":1,"data":{"name":"x"}}"#).unwrap();
        assert_eq!(data, json!({"name": "x"}));
    }

    #[test]
    fn test_unwrap_legacy_bare_value() {
        let data = unwrap("k", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(data, json!([{"id": "1"}]));
    }

    #[test]
    fn test_unwrap_legacy_object_with_version_field() {
        // a bare record that merely has a `version` field is not an envelope
        let raw = r#"{"version":"2.4","name":"EduPulse"}"#;
        let data = unwrap("k", raw).unwrap();
        assert_eq!(data, json!({"version": "2.4", "name": "EduPulse"}));
    }

    #[test]
    fn test_unwrap_newer_version_rejected() {
        let err = unwrap("k", r#"{"version":99,"data":[]}"#).unwrap_err();
        assert!(matches!(err, Error::StorageRead { .. }));
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_unwrap_invalid_json() {
        let err = unwrap("edupulse_students", "{not json").unwrap_err();
        assert!(matches!(err, Error::StorageRead { ref key, .. } if key == "edupulse_students"));
    }

    #[test]
    fn test_migrations_cover_every_version() {
        assert_eq!(MIGRATIONS.len() as u64, CURRENT_VERSION);
    }
}
