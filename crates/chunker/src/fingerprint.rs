use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Lowercase hex SHA-256 of the raw document bytes.
///
/// The store uses it to recognise a document it has already ingested; a changed
/// fingerprint means full re-ingestion under new chunk records.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        let _ = write!(out, "{b:02x}");
    }
    out
}
