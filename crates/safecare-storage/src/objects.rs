use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StorageError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    objects: BTreeMap<String, String>,
}

/// Shared handle to the object store. Cloning is cheap; clones see the
/// same objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    inner: Arc<RwLock<Snapshot>>,
    snapshot_path: Option<PathBuf>,
}

impl ObjectStore {
    /// An empty store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by a snapshot file. A missing file starts an
    /// empty store; the file is created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no snapshot found, starting empty store");
                Snapshot::default()
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            path = %path.display(),
            objects = snapshot.objects.len(),
            "object store opened"
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(snapshot)),
            snapshot_path: Some(path),
        })
    }

    /// Get an object's body.
    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let guard = self.inner.read().await;
        guard
            .objects
            .get(key)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    pub async fn exists(&self, key: &str) -> bool {
        self.inner.read().await.objects.contains_key(key)
    }

    /// Put an object. When the snapshot cannot be written the previous
    /// body is restored, so a failed put leaves no trace.
    pub async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let body = String::from_utf8(body).map_err(|_| StorageError::InvalidBody {
            key: key.to_string(),
        })?;

        let mut guard = self.inner.write().await;
        let previous = guard.objects.insert(key.to_string(), body);
        if let Err(e) = self.persist(&guard).await {
            match previous {
                Some(body) => guard.objects.insert(key.to_string(), body),
                None => guard.objects.remove(key),
            };
            tracing::error!(key = %key, error = %e, "snapshot write failed, put rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// Delete an object. Deleting a missing key is an error, and a failed
    /// snapshot write puts the object back.
    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.inner.write().await;
        let Some(previous) = guard.objects.remove(key) else {
            return Err(StorageError::NotFound {
                key: key.to_string(),
            });
        };
        if let Err(e) = self.persist(&guard).await {
            guard.objects.insert(key.to_string(), previous);
            tracing::error!(key = %key, error = %e, "snapshot write failed, delete rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// List keys under a prefix, in key order.
    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let guard = self.inner.read().await;
        Ok(guard
            .objects
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    /// Write the snapshot file, if configured. Called with the write lock
    /// held so snapshots land in write order.
    async fn persist(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_vec_pretty(snapshot)?;

        // Write to a temp file then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&tmp_path, path).await?;
        tracing::debug!(path = %path.display(), objects = snapshot.objects.len(), "snapshot saved");
        Ok(())
    }
}
