//! Snapshot types
//!
//! A snapshot is up to three named binary segments captured from a running
//! console: the cartridge header, work RAM, and save RAM. `header` and
//! `wram` are mandatory; `sram` is optional.

use crate::store::StoreError;

// ============================================================================
// Segment Names
// ============================================================================

/// Name of a single snapshot segment.
///
/// The set is closed. Parsed from the lower-cased filename an uploaded part
/// declares; anything outside the set is rejected (strict policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentName {
    Header,
    Wram,
    Sram,
}

impl SegmentName {
    /// Parse a part's declared filename, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "header" => Some(Self::Header),
            "wram" => Some(Self::Wram),
            "sram" => Some(Self::Sram),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Wram => "wram",
            Self::Sram => "sram",
        }
    }
}

// ============================================================================
// Segment Sets
// ============================================================================

/// The segments decoded from one upload, or read back from the store.
///
/// Any field may be absent: decoding fills in whatever parts arrived, and a
/// stored entry is passed through as-is on the read side. Completeness is
/// only enforced at ingest, via [`SegmentSet::into_snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentSet {
    pub header: Option<Vec<u8>>,
    pub wram: Option<Vec<u8>>,
    pub sram: Option<Vec<u8>>,
}

impl SegmentSet {
    /// Assign bytes to a segment. A repeated name overwrites the earlier part.
    pub fn insert(&mut self, name: SegmentName, bytes: Vec<u8>) {
        match name {
            SegmentName::Header => self.header = Some(bytes),
            SegmentName::Wram => self.wram = Some(bytes),
            SegmentName::Sram => self.sram = Some(bytes),
        }
    }

    /// Enforce the completeness invariant: `header` and `wram` must both have
    /// been supplied. Empty-but-present bytes pass; only absence fails.
    pub fn into_snapshot(self) -> Result<Snapshot, IngestError> {
        match (self.header, self.wram) {
            (Some(header), Some(wram)) => Ok(Snapshot {
                header,
                wram,
                sram: self.sram,
            }),
            (None, _) => Err(IngestError::MissingRequiredSegment(SegmentName::Header)),
            (_, None) => Err(IngestError::MissingRequiredSegment(SegmentName::Wram)),
        }
    }
}

/// A complete, validated snapshot. Only this form is ever hashed or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub header: Vec<u8>,
    pub wram: Vec<u8>,
    /// `None` when the part was never supplied. A supplied zero-length
    /// `sram` stays `Some` and is stored as an explicit empty field.
    pub sram: Option<Vec<u8>>,
}

// ============================================================================
// Error Types
// ============================================================================

/// Ingest failure taxonomy.
///
/// The first three variants are caller mistakes; no store write has
/// happened when any of them is returned.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("malformed multipart body: {0}")]
    MalformedMultipart(String),

    #[error("unknown segment name: '{0}'")]
    UnknownSegment(String),

    #[error("missing required segment: {}", .0.as_str())]
    MissingRequiredSegment(SegmentName),

    #[error("upstream read failed: {0}")]
    UpstreamIo(String),

    #[error("store write failed: {0}")]
    StoreWrite(#[from] StoreError),
}

/// Retrieval failure. An absent key is not an error; lookups report absence
/// as `Ok(None)` so it stays distinguishable from a store fault.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("store read failed: {0}")]
    StoreRead(#[from] StoreError),
}

// ============================================================================
// Tests
// ============================================================================
