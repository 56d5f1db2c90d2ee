//! Normalization of raw extracted values for display and export.
//!
//! Absent values are `None` throughout; the [`UNKNOWN`] sentinel only exists
//! at the string boundary, where an empty string and the sentinel itself are
//! both read back as absent.

use super::rules::patterns::{DIGIT, NON_DIGIT};

/// Display value of a field that could not be extracted.
pub const UNKNOWN: &str = "Unknown";

/// Maximum length of a cleaned expansion code, in characters.
pub const EXPANSION_CODE_LEN: usize = 3;

/// Render an optional field, substituting [`UNKNOWN`].
pub fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

/// Read a field from its string form; empty and [`UNKNOWN`] are absent.
pub fn from_display(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty() && *v != UNKNOWN)
}

/// Drop dots and keep at most the first three characters.
pub fn normalize_expansion(raw: Option<&str>) -> Option<String> {
    let cleaned: String = raw
        .and_then(from_display)?
        .chars()
        .filter(|&c| c != '.')
        .take(EXPANSION_CODE_LEN)
        .collect();

    from_display(&cleaned).map(str::to_string)
}

/// Keep the part before the first `/`, then reduce it to its digits when it
/// has any.
pub fn normalize_collector_number(raw: Option<&str>) -> Option<String> {
    let raw = raw.and_then(from_display)?;
    let head = raw.split('/').next().unwrap_or(raw);

    let cleaned = if DIGIT.is_match(head) {
        let digits = NON_DIGIT.replace_all(head, "");
        if digits.is_empty() {
            head.to_string()
        } else {
            digits.into_owned()
        }
    } else {
        head.to_string()
    };

    from_display(&cleaned).map(str::to_string)
}

/// Clean a displayed expansion code, e.g. `"AB.CD"` becomes `"ABC"`.
pub fn clean_expansion_code(raw: &str) -> String {
    or_unknown(normalize_expansion(Some(raw)).as_deref()).to_string()
}

/// Clean a displayed collector number, e.g. `"7/120U"` becomes `"7"`.
pub fn clean_collector_number(raw: &str) -> String {
    or_unknown(normalize_collector_number(Some(raw)).as_deref()).to_string()
}
