//! HMAC-SHA256 primitives and canonical request construction.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Hash a request body with SHA-256, rendered as lowercase hex.
///
/// An empty body hashes to the digest of the empty byte string, not a
/// sentinel value.
pub fn hash_body(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// Build the canonical string both sides sign and verify.
///
/// Format, joined by `\n` with no trailing newline:
///
/// ```text
/// <METHOD-UPPERCASE>
/// <PATH>
/// <TIMESTAMP-DECIMAL-STRING>
/// <HEX-SHA256-OF-BODY>
/// ```
///
/// The path must be the literal on-wire request-target (no trailing-slash
/// normalization, query string excluded). Construction is deterministic:
/// the same inputs always produce byte-identical output.
pub fn build_canonical_string(method: &str, path: &str, timestamp_ms: i64, body: &[u8]) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.to_uppercase(),
        path,
        timestamp_ms,
        hash_body(body)
    )
}

/// Compute the hex-encoded HMAC-SHA256 of a canonical string.
pub fn compute_mac(secret: &[u8], canonical: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison of a received signature against the expected MAC.
///
/// The received signature is hex-decoded and checked with `Mac::verify_slice`,
/// which compares in constant time. Undecodable hex is simply a mismatch.
pub fn mac_matches(secret: &[u8], canonical: &str, received_hex: &str) -> bool {
    let Ok(received) = hex::decode(received_hex) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(canonical.as_bytes());
    mac.verify_slice(&received).is_ok()
}
