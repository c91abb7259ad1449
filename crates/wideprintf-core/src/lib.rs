//! # wideprintf-core
//!
//! Safe Rust implementation of a bounded `swprintf`/`vswprintf` engine.
//!
//! Wide strings are `u32` slices terminated by `0u32`, the same representation
//! `wchar_t` strings have on targets with a 32-bit `wchar_t`. Output is always
//! written into a caller-supplied buffer and never grows past its length.

#![deny(unsafe_code)]

pub mod stdio;
pub mod stdlib;
pub mod string;

pub use stdio::{ArgStream, FormatArg, WideFormatter, format_into, format_into_with_args};
