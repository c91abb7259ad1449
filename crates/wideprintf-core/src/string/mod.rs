//! String helpers shared by the formatting engine.
//!
//! Narrow strings are byte slices and wide strings are `u32` slices; both are
//! NUL-terminated, with the slice end acting as an implicit terminator.

pub mod wide;

pub use wide::{from_wide, strlen, to_wide, wcslen};
