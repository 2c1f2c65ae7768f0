use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects::ObjectStore;

/// Load a JSON object.
pub async fn load_state<T: DeserializeOwned>(store: &ObjectStore, key: &str) -> Result<T, StorageError> {
    let body = store.get_object(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Load a JSON object, falling back to `T::default()` when it does not
/// exist yet.
pub async fn load_state_or_default<T: DeserializeOwned + Default>(
    store: &ObjectStore,
    key: &str,
) -> Result<T, StorageError> {
    match load_state(store, key).await {
        Ok(value) => Ok(value),
        Err(StorageError::NotFound { .. }) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Save a JSON object.
pub async fn save_state<T: Serialize>(store: &ObjectStore, key: &str, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object(key, body).await
}

/// Load every JSON object under a prefix, in key order.
pub async fn load_all<T: DeserializeOwned>(
    store: &ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list_objects(prefix).await?;
    let mut values = Vec::with_capacity(keys.len());
    for key in &keys {
        values.push(load_state(store, key).await?);
    }
    Ok(values)
}
