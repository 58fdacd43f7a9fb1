//! In-memory store backend

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{SnapshotStore, StoreError, StoredEntry};

/// HashMap-backed store for tests and embedding. Entries are held behind an
/// async `RwLock` and cloned on read/write.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStore {
    async fn write(&self, key: &str, entry: &StoredEntry) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), entry.clone());
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(wram: &[u8]) -> StoredEntry {
        StoredEntry {
            header: Some(vec![0x00]),
            wram: Some(wram.to_vec()),
            sram: None,
        }
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        store.write("snes.k", &entry(b"w")).await.unwrap();
        assert_eq!(store.read_all("snes.k").await.unwrap(), Some(entry(b"w")));
    }

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read_all("snes.nope").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn overwrite_replaces_entry() {
        let store = MemoryStore::new();
        store.write("snes.k", &entry(b"a")).await.unwrap();
        store.write("snes.k", &entry(b"b")).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.read_all("snes.k").await.unwrap(), Some(entry(b"b")));
    }
}
