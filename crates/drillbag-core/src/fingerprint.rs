//! Content-derived item identity.
//!
//! The remote generator assigns fresh ids to every response, so duplicate
//! detection has to key on what the learner actually sees: the stem text.
//! Fingerprints are SHA-256 over a normalized form of the stem, which makes
//! them deterministic across sessions and independent of ephemeral fields
//! (item ids, timestamps, choice shuffling).

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic identity of a generated item, derived from its stem.
///
/// Two items with equal fingerprints are duplicates for sampling purposes
/// even if their server-side ids differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a stem: normalize, then hex-encode SHA-256.
    pub fn of_stem(stem: &str) -> Self {
        let normalized = normalize_stem(stem);
        let digest = Sha256::digest(normalized.as_bytes());
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            use fmt::Write;
            // write! to a String cannot fail
            let _ = write!(hex, "{byte:02x}");
        }
        Fingerprint(hex)
    }

    /// The full lowercase-hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a stem for fingerprinting: trim, collapse whitespace runs to a
/// single space, lowercase. Presentation-only differences (wrapping,
/// trailing newlines, casing) must not defeat duplicate detection.
fn normalize_stem(stem: &str) -> String {
    stem.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
