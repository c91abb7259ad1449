//! Decimal decomposition of binary floating-point values.
//!
//! The `%f` converter never rounds on its own: it asks a [`DecimalDecompose`]
//! implementation for the correctly rounded digit string and the position of
//! the decimal point, then lays the digits out. [`StdDecimal`] is backed by
//! the exact float-to-decimal conversion in `core::fmt`, which rounds to
//! nearest with ties to even.
//!
//! The service rounds either to a count of fractional digits or to a count of
//! significant digits. The formatter only asks for [`DecimalMode::Fixed`];
//! [`DecimalMode::Significant`] is there for callers that plug their own
//! decomposer in or need significant-digit rounding directly.

use std::fmt::Write as _;

/// Largest fractional precision that can still change the digits of an `f64`.
///
/// The smallest subnormal needs 1074 fractional digits to print exactly; past
/// that every extra digit is a zero the caller can pad on its own.
pub const MAX_FIXED_PRECISION: usize = 1100;

/// Largest significant-digit count that can change the digits of an `f64`.
pub const MAX_SIGNIFICANT_PRECISION: usize = 800;

/// How `precision` is interpreted by [`DecimalDecompose::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalMode {
    /// Round to `precision` digits after the decimal point (dtoa mode 3).
    Fixed,
    /// Round to `precision` significant digits, at least one (dtoa mode 2).
    /// Not used by `%f`.
    Significant,
}

/// A rounded decimal rendering of a float's magnitude.
///
/// The value is `0.d1 d2 d3 ... x 10^exponent`. `digits` are ASCII and carry
/// no leading or trailing zeros; an empty digit string means the magnitude
/// rounded to zero, in which case `exponent` is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub digits: Vec<u8>,
    pub exponent: i32,
    pub negative: bool,
}

impl Decimal {
    /// True when the magnitude rounded to zero at the requested precision.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }
}

/// Float-to-decimal service used by the fixed-point converter.
///
/// Implementations must be stateless from the caller's point of view and
/// round to nearest at the requested precision.
pub trait DecimalDecompose {
    /// Decompose `value`. Non-finite values yield an empty digit string.
    fn decompose(&self, value: f64, mode: DecimalMode, precision: usize) -> Decimal;
}

impl<T: DecimalDecompose + ?Sized> DecimalDecompose for &T {
    fn decompose(&self, value: f64, mode: DecimalMode, precision: usize) -> Decimal {
        (**self).decompose(value, mode, precision)
    }
}

/// Decomposition backed by the standard library's float formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDecimal;

impl DecimalDecompose for StdDecimal {
    fn decompose(&self, value: f64, mode: DecimalMode, precision: usize) -> Decimal {
        let negative = value.is_sign_negative();
        let magnitude = value.abs();
        if !magnitude.is_finite() {
            return Decimal {
                digits: Vec::new(),
                exponent: 0,
                negative,
            };
        }

        let mut text = String::with_capacity(32);
        let (digits, exponent) = match mode {
            DecimalMode::Fixed => {
                let precision = precision.min(MAX_FIXED_PRECISION);
                let _ = write!(text, "{magnitude:.precision$}");
                let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
                let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
                (digits, int_part.len() as i32)
            }
            DecimalMode::Significant => {
                let precision = precision.clamp(1, MAX_SIGNIFICANT_PRECISION) - 1;
                let _ = write!(text, "{magnitude:.precision$e}");
                let (mantissa, exp) = text.split_once('e').unwrap_or((&text, "0"));
                let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
                (digits, exp.parse::<i32>().unwrap_or(0) + 1)
            }
        };

        let (digits, exponent) = trim_zeros(digits, exponent);
        Decimal {
            digits,
            exponent,
            negative,
        }
    }
}

/// Strip leading zeros (moving the decimal point) and trailing zeros.
fn trim_zeros(mut digits: Vec<u8>, mut exponent: i32) -> (Vec<u8>, i32) {
    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    if leading == digits.len() {
        return (Vec::new(), 0);
    }
    digits.drain(..leading);
    exponent -= leading as i32;
    while digits.last() == Some(&b'0') {
        digits.pop();
    }
    (digits, exponent)
}
