//! Template fingerprints.

use qs_core::compute_fingerprint;

use crate::extract::ExtractionResult;

/// SHA-256 hex digest of every template, in statement order
pub fn fingerprint(result: &ExtractionResult) -> Vec<String> {
    result
        .statements()
        .iter()
        .map(|s| compute_fingerprint(&s.template))
        .collect()
}

/// Digest of every template under `hash`, in statement order.
///
/// Can be called any number of times on the same result with different
/// functions; nothing is re-parsed.
pub fn fingerprint_with<F>(result: &ExtractionResult, hash: F) -> Vec<String>
where
    F: Fn(&[u8]) -> String,
{
    result
        .statements()
        .iter()
        .map(|s| hash(s.template.as_bytes()))
        .collect()
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
