//! Text normalization shared by header matching and synonym tables.

/// Normalizes a header or synonym for comparison.
///
/// Lowercases, replaces every character outside `[a-z0-9]` and whitespace
/// with a space, collapses whitespace runs and trims.
pub fn normalize_text(raw: &str) -> String {
    let replaced: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into words.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
