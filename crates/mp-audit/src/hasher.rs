// hasher.rs — SHA-256 helpers for the audit chain.
//
// Hashes are hex-encoded lowercase. The chain hashes the serialized JSON
// line of each event, so any byte-level edit to history changes the
// digest the next line must carry.

use sha2::{Digest, Sha256};

/// SHA-256 of arbitrary bytes as a 64-character lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// SHA-256 of a UTF-8 string.
pub fn hash_str(s: &str) -> String {
    hash_bytes(s.as_bytes())
}
