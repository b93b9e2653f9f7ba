//! HMAC-SHA256 webhook signatures.
//!
//! Signatures are computed over the exact bytes received on the wire. The
//! body must never be parsed and re-serialized before hashing: key order and
//! whitespace would change and every signature would fail.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `raw_body` keyed with `shared_secret`.
pub fn sign(raw_body: &[u8], shared_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(shared_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a hex signature against the raw body.
///
/// Never panics: an empty signature or secret, a non-hex signature and a
/// mismatch all yield `false`. Comparison is constant time.
pub fn verify(raw_body: &[u8], signature: &str, shared_secret: &str) -> bool {
    let signature = signature.trim();
    if signature.is_empty() || shared_secret.is_empty() {
        return false;
    }

    let Ok(provided) = hex::decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(shared_secret.as_bytes()) else {
        return false;
    };
    mac.update(raw_body);
    mac.verify_slice(&provided).is_ok()
}
