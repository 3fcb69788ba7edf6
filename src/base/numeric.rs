//! Helpers for resolved expression values.
//!
//! The evaluator hands back decimal strings. Anything that does not parse as
//! an unsigned decimal is treated as unknown by the callers here.

/// Parse a resolved decimal value.
///
/// Returns `None` for empty, negative or otherwise non-numeric text.
pub fn parse_u64(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<u64>().ok()
}

/// Render a value as a binary string without leading zeros ("0" for zero).
pub fn to_binary(value: u64) -> String {
    format!("{value:b}")
}

/// Right-justify a bit string to `width` characters.
///
/// Short strings are padded with leading zeros. Long strings keep their
/// least-significant (rightmost) `width` bits.
pub fn right_justify(bits: &str, width: usize) -> String {
    let len = bits.chars().count();
    if len >= width {
        bits.chars().skip(len - width).collect()
    } else {
        let mut justified = "0".repeat(width - len);
        justified.push_str(bits);
        justified
    }
}
