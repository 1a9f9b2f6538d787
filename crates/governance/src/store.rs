// governance/src/store.rs

//! JSON record adapter over the host metadata store.

use crate::host::MetadataStore;
use crate::{GovernanceError, GovernanceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads and deserializes a record. A record that exists but fails to
/// deserialize is corrupt state and surfaces as a typed store error,
/// never a panic.
pub fn load_record<T, H>(host: &H, key: &str) -> GovernanceResult<Option<T>>
where
    T: DeserializeOwned,
    H: MetadataStore + ?Sized,
{
    match host.load(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| GovernanceError::Store(format!("Corrupt record under {key}: {e}"))),
    }
}

/// Serializes and stores a record.
pub fn store_record<T, H>(host: &mut H, key: &str, value: &T) -> GovernanceResult<()>
where
    T: Serialize,
    H: MetadataStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| GovernanceError::Store(format!("Failed to serialize record for {key}: {e}")))?;
    host.store(key, &raw)?;
    tracing::debug!(key, value = %raw, "Stored metadata record");
    Ok(())
}

/// Deletes a record.
pub fn delete_record<H>(host: &mut H, key: &str) -> GovernanceResult<()>
where
    H: MetadataStore + ?Sized,
{
    host.delete(key)?;
    tracing::debug!(key, "Deleted metadata record");
    Ok(())
}
