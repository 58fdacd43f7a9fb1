//! Snapshot core
//!
//! Multipart decoding, content addressing, and the ingest/retrieval
//! pipelines. Everything here is per-request state; the only shared handle
//! is the injected store.

mod decoder;
mod fingerprint;
mod ingest;
mod retrieve;
mod types;

pub use decoder::decode_segments;
pub use fingerprint::{encode_key, fingerprint, namespaced_key, KEY_NAMESPACE};
pub use ingest::IngestService;
pub use retrieve::RetrievalService;
pub use types::{IngestError, RetrieveError, SegmentName, SegmentSet, Snapshot};
