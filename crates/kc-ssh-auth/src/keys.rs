//! SSH key extraction from attribute values.

/// Flattens attribute values into individual key lines.
///
/// Each value may hold several keys, one per line. Lines are trimmed and
/// blank lines dropped; order follows value order, then line order. Key
/// syntax is not checked and duplicates are kept.
#[must_use]
pub fn extract_keys<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
