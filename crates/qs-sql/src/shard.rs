//! Shard-suffix normalization for schema and table names.
//!
//! Horizontally sharded deployments name physical objects `orders_0`,
//! `orders_1`, ... `orders_104`. Generalizing the numeric suffix lets every
//! shard share one logical identity.

/// Separator between a logical name and its shard number
pub const SHARD_SEPARATOR: char = '_';

/// Segment that replaces the shard number
pub const SHARD_PLACEHOLDER: &str = "?";

/// Replace a trailing `_<integer>` segment with `_?`.
///
/// Names that are empty, contain no separator, or whose last segment is not
/// an integer are returned unchanged. The function is idempotent.
pub fn normalize_shard_suffix(name: &str) -> String {
    let Some((logical, suffix)) = name.rsplit_once(SHARD_SEPARATOR) else {
        return name.to_string();
    };
    if suffix.parse::<i64>().is_err() {
        return name.to_string();
    }
    format!("{logical}{SHARD_SEPARATOR}{SHARD_PLACEHOLDER}")
}

#[cfg(test)]
#[path = "shard_test.rs"]
mod tests;
