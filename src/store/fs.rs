//! Filesystem store backend
//!
//! One file per key directly under the base directory, encoded with
//! `bincode`. Writes land in a sibling temp file and are renamed into
//! place, so a concurrent reader sees a whole entry or none of it.

use std::path::PathBuf;

use super::{SnapshotStore, StoreError, StoredEntry};

/// Filesystem-backed snapshot store.
pub struct FsStore {
    base_path: PathBuf,
}

impl FsStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Create the base directory if needed. Called once at startup.
    pub async fn ensure_base_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

/// Keys map straight to file names, so only the characters produced by the
/// key codec (base64url plus the `.` of the namespace prefix) are accepted.
/// Anything else cannot name a stored entry.
fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
}

#[async_trait::async_trait]
impl SnapshotStore for FsStore {
    async fn write(&self, key: &str, entry: &StoredEntry) -> Result<(), StoreError> {
        if !valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        let encoded = bincode::serialize(entry).map_err(|e| StoreError::Codec(e.to_string()))?;

        let path = self.entry_path(key);
        tokio::fs::create_dir_all(&self.base_path).await?;

        // Same-key writers carry identical bytes, so sharing one temp name
        // per key is harmless; the rename publishes the entry atomically.
        let tmp = self.base_path.join(format!("{key}.partial"));
        tokio::fs::write(&tmp, &encoded).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        if !valid_key(key) {
            return Ok(None);
        }

        let bytes = match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry = bincode::deserialize(&bytes).map_err(|e| StoreError::Codec(e.to_string()))?;
        Ok(Some(entry))
    }
}
