//! Ingest pipeline
//!
//! Decode the multipart body, validate completeness, fingerprint the
//! segments, and persist them under the derived key.

use std::sync::Arc;

use axum::extract::Multipart;

use crate::store::{SnapshotStore, StoredEntry};

use super::decoder::decode_segments;
use super::fingerprint::{encode_key, fingerprint, namespaced_key};
use super::types::{IngestError, Snapshot};

/// Orchestrates one upload: decode, validate, hash, encode, write.
#[derive(Clone)]
pub struct IngestService {
    store: Arc<dyn SnapshotStore>,
}

impl IngestService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Ingest a raw multipart body. Returns the bare store key on success;
    /// the namespace prefix is never exposed to callers.
    pub async fn ingest(&self, multipart: Multipart) -> Result<String, IngestError> {
        let set = decode_segments(multipart).await?;
        self.ingest_snapshot(set.into_snapshot()?).await
    }

    /// Ingest an already-validated snapshot.
    ///
    /// Exactly one store write per successful call, and none on failure.
    /// Re-ingesting the same bytes derives the same key and overwrites the
    /// entry with identical content.
    pub async fn ingest_snapshot(&self, snapshot: Snapshot) -> Result<String, IngestError> {
        let header_len = snapshot.header.len();
        let wram_len = snapshot.wram.len();
        let sram_len = snapshot.sram.as_ref().map(Vec::len);

        let digest = fingerprint(&snapshot);
        let key = encode_key(&digest);

        let entry = StoredEntry {
            header: Some(snapshot.header),
            wram: Some(snapshot.wram),
            sram: snapshot.sram,
        };
        self.store.write(&namespaced_key(&key), &entry).await?;

        tracing::info!(
            key = %key,
            header_len,
            wram_len,
            ?sram_len,
            "snapshot stored"
        );

        Ok(key)
    }
}
