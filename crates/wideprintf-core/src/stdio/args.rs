//! Typed argument streams for the formatting engine.
//!
//! C passes `swprintf` arguments through an untyped `va_list`; here every
//! argument is a [`FormatArg`] the caller builds explicitly, and directives
//! pull them left to right through an [`ArgStream`]. A directive asking for a
//! kind the next argument does not hold gets a defined coercion instead of
//! undefined behavior.

/// A single typed formatting argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    /// A wide character (`%c`).
    Char(u32),
    /// A signed integer (`%d`); narrowed to 32 bits unless `ll`/`L` is used.
    SignedInt(i64),
    /// An unsigned integer (`%u`, `%x`); narrowed to 32 bits unless `ll`/`L` is used.
    UnsignedInt(u64),
    /// An address (`%p`).
    Pointer(usize),
    /// A NUL-terminated byte string (`%hs`); `None` is a null pointer.
    NarrowStr(Option<&'a [u8]>),
    /// A NUL-terminated wide string (`%s`, `%ls`); `None` is a null pointer.
    WideStr(Option<&'a [u32]>),
    /// A double (`%f`).
    Float(f64),
}

/// A string argument as seen by the string converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrArg<'a> {
    Narrow(&'a [u8]),
    Wide(&'a [u32]),
}

/// Left-to-right cursor over a slice of [`FormatArg`]s.
///
/// Reading past the end yields the same defaults as a mismatched argument:
/// zero for numbers and characters, null for strings.
#[derive(Debug, Clone)]
pub struct ArgStream<'a> {
    args: core::slice::Iter<'a, FormatArg<'a>>,
}

impl<'a> ArgStream<'a> {
    #[must_use]
    pub fn new(args: &'a [FormatArg<'a>]) -> Self {
        Self { args: args.iter() }
    }

    /// Number of arguments not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.args.len()
    }

    /// Consume the next argument as a signed integer.
    pub fn next_signed(&mut self) -> i64 {
        match self.args.next() {
            Some(FormatArg::SignedInt(v)) => *v,
            Some(FormatArg::UnsignedInt(v)) => *v as i64,
            Some(FormatArg::Char(c)) => i64::from(*c),
            Some(FormatArg::Pointer(p)) => *p as i64,
            Some(FormatArg::Float(f)) => *f as i64,
            _ => 0,
        }
    }

    /// Consume the next argument as an unsigned integer.
    pub fn next_unsigned(&mut self) -> u64 {
        match self.args.next() {
            Some(FormatArg::UnsignedInt(v)) => *v,
            Some(FormatArg::SignedInt(v)) => *v as u64,
            Some(FormatArg::Char(c)) => u64::from(*c),
            Some(FormatArg::Pointer(p)) => *p as u64,
            Some(FormatArg::Float(f)) => *f as u64,
            _ => 0,
        }
    }

    /// Consume the next argument as an address.
    pub fn next_pointer(&mut self) -> usize {
        match self.args.next() {
            Some(FormatArg::Pointer(p)) => *p,
            Some(FormatArg::UnsignedInt(v)) => *v as usize,
            Some(FormatArg::SignedInt(v)) => *v as usize,
            Some(FormatArg::NarrowStr(Some(s))) => s.as_ptr() as usize,
            Some(FormatArg::WideStr(Some(s))) => s.as_ptr() as usize,
            _ => 0,
        }
    }

    /// Consume the next argument as a wide character.
    pub fn next_char(&mut self) -> u32 {
        match self.args.next() {
            Some(FormatArg::Char(c)) => *c,
            Some(FormatArg::SignedInt(v)) => *v as u32,
            Some(FormatArg::UnsignedInt(v)) => *v as u32,
            _ => 0,
        }
    }

    /// Consume the next argument as a double.
    pub fn next_float(&mut self) -> f64 {
        match self.args.next() {
            Some(FormatArg::Float(f)) => *f,
            Some(FormatArg::SignedInt(v)) => *v as f64,
            Some(FormatArg::UnsignedInt(v)) => *v as f64,
            _ => 0.0,
        }
    }

    /// Consume the next argument as a string; `None` renders as `(null)`.
    pub fn next_str(&mut self) -> Option<StrArg<'a>> {
        match self.args.next() {
            Some(FormatArg::NarrowStr(Some(s))) => Some(StrArg::Narrow(*s)),
            Some(FormatArg::WideStr(Some(s))) => Some(StrArg::Wide(*s)),
            _ => None,
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(v: $t) -> Self {
                FormatArg::SignedInt(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(v: $t) -> Self {
                FormatArg::UnsignedInt(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<char> for FormatArg<'_> {
    fn from(c: char) -> Self {
        FormatArg::Char(u32::from(c))
    }
}

impl From<f32> for FormatArg<'_> {
    fn from(v: f32) -> Self {
        FormatArg::Float(f64::from(v))
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(v: f64) -> Self {
        FormatArg::Float(v)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        FormatArg::NarrowStr(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(s: &'a [u8]) -> Self {
        FormatArg::NarrowStr(Some(s))
    }
}

impl<'a> From<Option<&'a [u8]>> for FormatArg<'a> {
    fn from(s: Option<&'a [u8]>) -> Self {
        FormatArg::NarrowStr(s)
    }
}

impl<'a> From<&'a [u32]> for FormatArg<'a> {
    fn from(s: &'a [u32]) -> Self {
        FormatArg::WideStr(Some(s))
    }
}

impl<'a> From<&'a Vec<u32>> for FormatArg<'a> {
    fn from(s: &'a Vec<u32>) -> Self {
        FormatArg::WideStr(Some(s.as_slice()))
    }
}

impl<'a> From<Option<&'a [u32]>> for FormatArg<'a> {
    fn from(s: Option<&'a [u32]>) -> Self {
        FormatArg::WideStr(s)
    }
}

impl<T> From<*const T> for FormatArg<'_> {
    fn from(p: *const T) -> Self {
        FormatArg::Pointer(p as usize)
    }
}

impl<T> From<*mut T> for FormatArg<'_> {
    fn from(p: *mut T) -> Self {
        FormatArg::Pointer(p as usize)
    }
}
