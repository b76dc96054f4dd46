//! Structural checks on the `prefix_body` shape.

/// Separator between prefix and body.
pub const SEPARATOR: char = '_';

/// Splits on the first separator.
///
/// Does not check that either half is well-formed.
pub fn split(muid: &str) -> Option<(&str, &str)> {
    muid.split_once(SEPARATOR)
}

/// Returns true if `muid` has exactly one separator with non-empty halves.
pub fn has_valid_format(muid: &str) -> bool {
    if muid.matches(SEPARATOR).count() != 1 {
        return false;
    }

    matches!(split(muid), Some((prefix, body)) if !prefix.is_empty() && !body.is_empty())
}
