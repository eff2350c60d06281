//! Cache-key digest utilities.
//!
//! Keys are SHA-256 hex digests of a canonical JSON serialization. With
//! serde_json's default (sorted, BTreeMap-backed) object representation the
//! serialization of a given value is byte-stable, so identical inputs always
//! digest to identical keys.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Compute a SHA-256 hex digest of a JSON value's canonical serialization.
pub fn object_digest(value: &serde_json::Value) -> String {
    // serde_json::Value cannot fail to serialize.
    let bytes = serde_json::to_vec(value).expect("JSON value serialization is infallible");
    sha256_hex(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn consistent_output() {
        let data = b"hello world";
        assert_eq!(sha256_hex(data), sha256_hex(data));
        assert_eq!(sha256_hex(data).len(), 64);
    }

    #[test]
    fn object_digest_is_insensitive_to_construction_order() {
        let a = serde_json::json!({ "experimentId": "e1", "body": { "x": 1, "y": 2 } });
        let b = serde_json::json!({ "body": { "y": 2, "x": 1 }, "experimentId": "e1" });
        assert_eq!(object_digest(&a), object_digest(&b));
    }

    #[test]
    fn object_digest_differs_on_any_field_change() {
        let base = serde_json::json!({ "experimentId": "e1", "body": { "x": 1 } });
        let other = serde_json::json!({ "experimentId": "e1", "body": { "x": 2 } });
        assert_ne!(object_digest(&base), object_digest(&other));
    }
}
