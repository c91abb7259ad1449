//! Wide-character string operations: wcslen, strlen, and conversions between
//! Rust strings and NUL-terminated `u32` buffers.

/// Returns the length of a NUL-terminated wide string (not counting the NUL).
///
/// Equivalent to C `wcslen`. Scans `s` for the first `0u32` element.
/// If no NUL is found, returns the full slice length.
pub fn wcslen(s: &[u32]) -> usize {
    s.iter().position(|&c| c == 0).unwrap_or(s.len())
}

/// Returns the length of a NUL-terminated narrow string (not counting the NUL).
///
/// Same contract as [`wcslen`], for byte strings.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&c| c == 0).unwrap_or(s.len())
}

/// Encodes `s` as a NUL-terminated wide string, one `u32` per scalar value.
///
/// An interior `'\0'` in `s` is kept, so the result reads as terminated at
/// that point.
#[must_use]
pub fn to_wide(s: &str) -> Vec<u32> {
    let mut out: Vec<u32> = s.chars().map(u32::from).collect();
    out.push(0);
    out
}

/// Decodes the wide string in `s` up to its first NUL.
///
/// Code units that are not Unicode scalar values decode as U+FFFD.
#[must_use]
pub fn from_wide(s: &[u32]) -> String {
    s[..wcslen(s)]
        .iter()
        .map(|&c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
