//! SHA-256 digest used as the default template fingerprint.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of raw bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Compute the default fingerprint of a template string
pub fn compute_fingerprint(template: &str) -> String {
    sha256_hex(template.as_bytes())
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
