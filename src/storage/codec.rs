//! JSON codec for persisted collections

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{CollectionKey, KeyValueStore, StorageError};

/// Encode an ordered collection as a JSON array
pub fn encode<T: Serialize>(items: &[T]) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(items)?)
}

/// Decode a JSON array back into an ordered collection
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Load one collection.
///
/// A missing blob is an empty collection. A blob that fails to read or decode
/// is reported and also yields an empty collection, so a corrupt entry never
/// leaves partial state behind.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: CollectionKey,
) -> Vec<T> {
    let bytes = match store.get(key.as_str()) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No stored data for {}", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read {} from {}: {}", key, store.name(), e);
            return Vec::new();
        }
    };

    match decode(&bytes) {
        Ok(items) => items,
        Err(e) => {
            warn!("Discarding undecodable {} data: {}", key, e);
            Vec::new()
        }
    }
}

/// Encode and write one collection
pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: CollectionKey,
    items: &[T],
) -> Result<(), StorageError> {
    let bytes = encode(items)?;
    store.set(key.as_str(), &bytes)
}
