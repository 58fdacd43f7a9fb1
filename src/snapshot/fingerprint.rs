//! Content addressing
//!
//! A snapshot's identity is the SHA-256 digest over `header || wram || sram`
//! in that fixed order. Concatenation is pure byte adjacency: no lengths or
//! separators are mixed in, so the segment split is not recoverable from the
//! digest and two snapshots whose concatenated bytes coincide share a key.
//! The digest is rendered as unpadded base64url for URLs and store keys.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::types::Snapshot;

/// Namespace prefix shared by every stored snapshot key.
pub const KEY_NAMESPACE: &str = "snes.";

/// Compute the content fingerprint of a validated snapshot.
///
/// An absent `sram` contributes nothing; a supplied-but-empty `sram` is
/// hashed as zero bytes, which yields the same digest. The two cases differ
/// only in what the store ends up holding.
pub fn fingerprint(snapshot: &Snapshot) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(&snapshot.header);
    hasher.update(&snapshot.wram);
    if let Some(sram) = &snapshot.sram {
        hasher.update(sram);
    }
    hasher.finalize().into()
}

/// Encode a fingerprint as an unpadded base64url store key.
pub fn encode_key(digest: &[u8; 32]) -> String {
    URL_SAFE_NO_PAD.encode(digest)
}

/// Qualify a bare store key with the snapshot namespace.
pub fn namespaced_key(key: &str) -> String {
    format!("{KEY_NAMESPACE}{key}")
}
