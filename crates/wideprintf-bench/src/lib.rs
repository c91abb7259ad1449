//! Shared inputs for the wideprintf benchmarks.

use wideprintf_core::string::to_wide;

/// A wide string of `len` repetitions of `ch`, NUL-terminated.
#[must_use]
pub fn wide_text(ch: char, len: usize) -> Vec<u32> {
    to_wide(&ch.to_string().repeat(len))
}
