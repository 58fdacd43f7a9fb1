//! Durable snapshot storage
//!
//! One record per content fingerprint, written and read atomically per key.
//! Backends implement [`SnapshotStore`]; the filesystem backend is the
//! production default, the in-memory backend serves tests and embedding.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

/// The record persisted under one store key.
///
/// Every field is optional on the read side: the store is the source of
/// truth, and an entry written by another writer or version may be partially
/// populated. Ingest always writes `header` and `wram`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub header: Option<Vec<u8>>,
    pub wram: Option<Vec<u8>>,
    pub sram: Option<Vec<u8>>,
}

/// Store backend failure. Absence of a key is not an error; reads report it
/// as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("entry codec error: {0}")]
    Codec(String),

    #[error("invalid store key: '{0}'")]
    InvalidKey(String),
}

/// Durable associative store keyed by opaque strings.
///
/// Implementations must be safe for concurrent use and atomic per key: a
/// reader sees a whole entry or none of it, never a partial write.
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Write a whole entry under `key` in a single call. Overwrites are
    /// allowed; callers key by content fingerprint, so an overwrite carries
    /// identical bytes.
    async fn write(&self, key: &str, entry: &StoredEntry) -> Result<(), StoreError>;

    /// Read the whole entry under `key`. `Ok(None)` when the key is absent.
    async fn read_all(&self, key: &str) -> Result<Option<StoredEntry>, StoreError>;
}
