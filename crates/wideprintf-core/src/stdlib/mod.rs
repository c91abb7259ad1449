//! Numeric conversion services used by the formatting engine.
//!
//! `dtoa` turns floating-point magnitudes into decimal digit strings for the
//! `%f` converter; `conversion` parses wide numeric text back into integers.

pub mod conversion;
pub mod dtoa;

pub use conversion::{ConversionStatus, wcstol, wcstoul};
pub use dtoa::{Decimal, DecimalDecompose, DecimalMode, StdDecimal};
