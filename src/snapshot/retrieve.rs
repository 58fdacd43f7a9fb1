//! Retrieval pipeline
//!
//! One fresh store read per lookup, then a presence branch and a field
//! pass-through. No caching layer sits in front of the store.

use std::sync::Arc;

use crate::store::SnapshotStore;

use super::fingerprint::namespaced_key;
use super::types::{RetrieveError, SegmentSet};

/// Looks snapshots up by their store key.
#[derive(Clone)]
pub struct RetrievalService {
    store: Arc<dyn SnapshotStore>,
}

impl RetrievalService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Look up a snapshot by its bare store key.
    ///
    /// The key text is opaque; the store lookup is the only validation.
    /// `Ok(None)` when no entry exists, an expected outcome distinct from
    /// a store fault. Whatever fields the entry holds are passed through,
    /// even if a required segment is missing: the store is the source of
    /// truth and the entry may predate this writer.
    pub async fn retrieve(&self, key: &str) -> Result<Option<SegmentSet>, RetrieveError> {
        let entry = self.store.read_all(&namespaced_key(key)).await?;

        Ok(entry.map(|entry| SegmentSet {
            header: entry.header,
            wram: entry.wram,
            sram: entry.sram,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ingest::IngestService;
    use crate::snapshot::types::Snapshot;
    use crate::store::{MemoryStore, StoreError, StoredEntry};

    #[tokio::test]
    async fn never_ingested_key_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = RetrievalService::new(store);

        let result = service
            .retrieve("JqZrBh6PSPOZJ8MS8lKTlZcp7ulZeOKJLUnTUSpcwJI")
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn ingested_snapshot_round_trips_byte_for_byte() {
        let store = Arc::new(MemoryStore::new());
        let ingest = IngestService::new(Arc::clone(&store) as Arc<dyn SnapshotStore>);
        let retrieval = RetrievalService::new(store);

        let key = ingest
            .ingest_snapshot(Snapshot {
                header: vec![0x00, 0x01],
                wram: vec![0xff],
                sram: Some(vec![0xaa, 0xbb]),
            })
            .await
            .unwrap();

        let set = retrieval.retrieve(&key).await.unwrap().unwrap();
        assert_eq!(set.header, Some(vec![0x00, 0x01]));
        assert_eq!(set.wram, Some(vec![0xff]));
        assert_eq!(set.sram, Some(vec![0xaa, 0xbb]));
    }

    #[tokio::test]
    async fn partially_populated_entry_passes_through() {
        let store = Arc::new(MemoryStore::new());
        store
            .write(
                "snes.partial",
                &StoredEntry {
                    header: None,
                    wram: Some(vec![0x42]),
                    sram: None,
                },
            )
            .await
            .unwrap();

        let service = RetrievalService::new(store);
        let set = service.retrieve("partial").await.unwrap().unwrap();
        assert_eq!(set.header, None);
        assert_eq!(set.wram, Some(vec![0x42]));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_store_read() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl SnapshotStore for FailingStore {
            async fn write(&self, _key: &str, _entry: &StoredEntry) -> Result<(), StoreError> {
                Ok(())
            }

            async fn read_all(&self, _key: &str) -> Result<Option<StoredEntry>, StoreError> {
                Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "store down",
                )))
            }
        }

        let service = RetrievalService::new(Arc::new(FailingStore));
        let result = service.retrieve("any").await;
        assert!(matches!(result, Err(RetrieveError::StoreRead(_))));
    }
}
