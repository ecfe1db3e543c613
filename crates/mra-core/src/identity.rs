//! Content-addressed report identity.
//!
//! A report's ID is a Sha256 digest over its normalized title, date, and
//! edition. Two topics that differ only in case or whitespace map to the
//! same ID, which is what the dedup ledger keys on.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Normalize a title for hashing: trim, lowercase, and collapse internal
/// whitespace runs to single spaces.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hex-encoded Sha256 of an arbitrary string.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Compute the content-addressed ID for a report identity.
///
/// Pure and total: equal under title normalization implies equal ID; the
/// `|` separator keeps the three fields unambiguous in the hash input.
#[must_use]
pub fn compute_id(title: &str, date: &str, edition: &str) -> String {
    sha256_hex(&format!("{}|{date}|{edition}", normalize_title(title)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sha256_hex_is_stable() {
        assert_eq!(sha256_hex("abc"), sha256_hex("abc"));
        assert_eq!(sha256_hex("abc").len(), 64);
    }

    #[test]
    fn compute_id_normalizes_case_and_whitespace() {
        let a = compute_id("Topic", "2025-01-01", "v1");
        let b = compute_id("  topic  ", "2025-01-01", "v1");
        let c = compute_id("TOPIC\t ONE", "2025-01-01", "v1");
        let d = compute_id("topic one", "2025-01-01", "v1");
        assert_eq!(a, b);
        assert_eq!(c, d);
        assert_ne!(a, c);
    }

    #[test]
    fn compute_id_distinguishes_date_and_edition() {
        let base = compute_id("topic", "2025-01-01", "v1");
        assert_ne!(base, compute_id("topic", "2025-01-02", "v1"));
        assert_ne!(base, compute_id("topic", "2025-01-01", "v2"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(title in "\\PC{0,40}") {
            let once = normalize_title(&title);
            prop_assert_eq!(normalize_title(&once), once);
        }

        #[test]
        fn id_ignores_surrounding_whitespace(title in "[a-zA-Z0-9 ]{1,30}") {
            let padded = format!("  {title}\t");
            prop_assert_eq!(
                compute_id(&title, "2025-06-01", "v1"),
                compute_id(&padded, "2025-06-01", "v1")
            );
        }
    }
}
