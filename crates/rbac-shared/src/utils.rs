//! Utility functions

use crate::constants::SEQUENCE_WIDTH;

/// Case-insensitive substring test, mirroring the store's default collation.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Empty or whitespace-only strings count as missing.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Formats a raw sequence value into an entity id, e.g. `GRP000042`.
pub fn format_sequence(prefix: &str, value: i64) -> String {
    format!("{}{:0width$}", prefix, value, width = SEQUENCE_WIDTH)
}
