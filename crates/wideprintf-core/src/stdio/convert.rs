//! Value converters.
//!
//! Each converter renders one argument for one resolved [`FormatSpec`] and
//! pushes the result through the [`BoundedSink`]. Integer digits are built in
//! a fixed stack scratch buffer; the fixed-point converter lays out digits from
//! a [`Decimal`] without materializing padding zeros.

use super::args::StrArg;
use super::sink::BoundedSink;
use super::wprintf::{Conversion, FormatSpec, LengthMod, Precision};
use crate::stdlib::dtoa::{DecimalDecompose, DecimalMode};
use crate::string::{strlen, wcslen};

/// Scratch size: 64 binary digits of a `u64` plus sign and slack.
const SCRATCH_LEN: usize = 66;

/// Minimum number of hex digits a pointer renders with.
const POINTER_DIGITS: usize = 8;

/// Default `%f` precision.
const DEFAULT_FLOAT_PRECISION: usize = 6;

const NULL_STR: &[u8] = b"(null)";

// ---------------------------------------------------------------------------
// Justification
// ---------------------------------------------------------------------------

/// Rendered content that knows its length before it is emitted.
trait Body {
    fn len(&self) -> usize;
    fn emit(&self, sink: &mut BoundedSink<'_>);
}

impl Body for &[u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn emit(&self, sink: &mut BoundedSink<'_>) {
        sink.put_ascii(self);
    }
}

impl Body for &[u32] {
    fn len(&self) -> usize {
        <[u32]>::len(self)
    }

    fn emit(&self, sink: &mut BoundedSink<'_>) {
        sink.put_wide(self);
    }
}

/// Emit `head` (sign or radix prefix) and `body`, padded to `spec.width`.
///
/// Padding goes in front of the whole rendered text, sign and prefix
/// included; zeros are used only when the converter allows them. Left
/// justification pads with spaces on the right.
fn emit_justified<B: Body>(
    sink: &mut BoundedSink<'_>,
    spec: &FormatSpec,
    head: &[u8],
    body: &B,
    zero_fill: bool,
) {
    let content = head.len().saturating_add(body.len());
    let pad_total = spec.width.saturating_sub(content);

    if spec.flags.left_justify {
        sink.put_ascii(head);
        body.emit(sink);
        sink.fill(u32::from(b' '), pad_total);
    } else {
        let pad = if zero_fill && spec.flags.zero_pad { b'0' } else { b' ' };
        sink.fill(u32::from(pad), pad_total);
        sink.put_ascii(head);
        body.emit(sink);
    }
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// Render `value` in `base` into `scratch`, most significant digit first.
///
/// Digits are produced least significant first and reversed in place.
/// Returns the number of digits.
fn render_digits(mut value: u64, base: u64, uppercase: bool, scratch: &mut [u8; SCRATCH_LEN]) -> usize {
    if value == 0 {
        scratch[0] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut len = 0;
    while value > 0 {
        let digit = (value % base) as u8;
        scratch[len] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
        len += 1;
    }
    scratch[..len].reverse();
    len
}

/// Render a signed decimal (`%d`, `%D`).
pub fn format_signed(value: i64, spec: &FormatSpec, sink: &mut BoundedSink<'_>) {
    let value = match spec.length {
        LengthMod::LongLong => value,
        _ => i64::from(value as i32),
    };
    let mut scratch = [0u8; SCRATCH_LEN];
    let len = render_digits(value.unsigned_abs(), 10, spec.uppercase, &mut scratch);

    // Zero stays a bare "0" even with '+'.
    let sign: &[u8] = if value < 0 {
        b"-"
    } else if spec.flags.force_sign && value > 0 {
        b"+"
    } else {
        b""
    };
    emit_justified(sink, spec, sign, &&scratch[..len], true);
}

/// Render an unsigned decimal or hexadecimal value (`%u`, `%x`, `%X`).
///
/// A non-zero value takes `+` under the force-sign flag and, for hex with
/// `#`, a `0x`/`0X` prefix after it.
pub fn format_unsigned(value: u64, spec: &FormatSpec, sink: &mut BoundedSink<'_>) {
    let value = match spec.length {
        LengthMod::LongLong => value,
        _ => u64::from(value as u32),
    };
    let hex = spec.conversion == Conversion::Hex;
    let base = if hex { 16 } else { 10 };
    let mut scratch = [0u8; SCRATCH_LEN];
    let len = render_digits(value, base, spec.uppercase, &mut scratch);

    let mut head = [0u8; 3];
    let mut head_len = 0;
    if value != 0 {
        if spec.flags.force_sign {
            head[0] = b'+';
            head_len = 1;
        }
        if hex && spec.flags.alt_form {
            let prefix = if spec.uppercase { b"0X" } else { b"0x" };
            head[head_len..head_len + 2].copy_from_slice(prefix);
            head_len += 2;
        }
    }
    emit_justified(sink, spec, &head[..head_len], &&scratch[..len], true);
}

/// Render an address (`%p`, `%P`): at least eight zero-padded hex digits.
///
/// Width and justification do not apply; `#` adds `0x` to non-null pointers.
pub fn format_pointer(addr: usize, spec: &FormatSpec, sink: &mut BoundedSink<'_>) {
    let mut scratch = [0u8; SCRATCH_LEN];
    let len = render_digits(addr as u64, 16, spec.uppercase, &mut scratch);

    if spec.flags.alt_form && addr != 0 {
        sink.put_ascii(b"0x");
    }
    sink.fill(u32::from(b'0'), POINTER_DIGITS.saturating_sub(len));
    sink.put_ascii(&scratch[..len]);
}

// ---------------------------------------------------------------------------
// Characters and strings
// ---------------------------------------------------------------------------

/// Render a wide character (`%c`, `%C`). Width and flags do not apply.
pub fn format_char(c: u32, sink: &mut BoundedSink<'_>) {
    sink.put(c);
}

/// Render a narrow or wide string (`%s`, `%hs`, `%ls`, `%S`).
///
/// `None` renders `(null)`. A non-zero precision caps the number of
/// characters; `.0` leaves the string whole.
pub fn format_str(s: Option<StrArg<'_>>, spec: &FormatSpec, sink: &mut BoundedSink<'_>) {
    let limit = match spec.precision {
        Precision::Fixed(p) if p > 0 => p,
        _ => usize::MAX,
    };
    match s {
        Some(StrArg::Wide(w)) => {
            let text = &w[..wcslen(w).min(limit)];
            emit_justified(sink, spec, b"", &text, false);
        }
        Some(StrArg::Narrow(n)) => {
            let text = &n[..strlen(n).min(limit)];
            emit_justified(sink, spec, b"", &text, false);
        }
        None => {
            let text = &NULL_STR[..NULL_STR.len().min(limit)];
            emit_justified(sink, spec, b"", &text, false);
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed-point floats
// ---------------------------------------------------------------------------

/// Digit layout of a finite `%f` magnitude.
///
/// `digits` are the significant digits from the decomposition; positions past
/// their end (up to `ndig`) read as zeros and are emitted with `fill`.
#[derive(Debug)]
struct FixedPoint<'d> {
    digits: &'d [u8],
    ndig: usize,
    exponent: i64,
    precision: usize,
    alt_form: bool,
}

impl<'d> FixedPoint<'d> {
    fn new(digits: &'d [u8], exponent: i32, precision: usize, alt_form: bool) -> Self {
        let exponent = i64::from(exponent);
        let covered = if exponent >= 0 {
            precision.saturating_add(exponent as usize)
        } else {
            precision.saturating_sub(exponent.unsigned_abs() as usize)
        };
        Self {
            digits,
            ndig: digits.len().max(covered),
            exponent,
            precision,
            alt_form,
        }
    }

    /// Emit digit positions `start..end`, zeros past the significant digits.
    fn emit_range(&self, sink: &mut BoundedSink<'_>, start: usize, end: usize) {
        let real_end = end.min(self.digits.len());
        if start < real_end {
            sink.put_ascii(&self.digits[start..real_end]);
        }
        sink.fill(u32::from(b'0'), end - start.max(real_end).min(end));
    }

    /// Lay the digits out per the exponent position.
    fn emit(&self, sink: &mut BoundedSink<'_>) {
        if self.digits.is_empty() {
            sink.put(u32::from(b'0'));
            if self.precision > 0 || self.alt_form {
                sink.put(u32::from(b'.'));
                sink.fill(u32::from(b'0'), self.precision);
            }
            return;
        }
        if self.exponent <= 0 {
            sink.put_ascii(b"0.");
            sink.fill(u32::from(b'0'), self.exponent.unsigned_abs() as usize);
            self.emit_range(sink, 0, self.ndig);
            return;
        }
        let exponent = self.exponent as usize;
        if exponent >= self.ndig {
            self.emit_range(sink, 0, exponent);
            if self.alt_form {
                sink.put(u32::from(b'.'));
            }
        } else {
            self.emit_range(sink, 0, exponent);
            sink.put(u32::from(b'.'));
            self.emit_range(sink, exponent, self.ndig);
        }
    }
}

/// Render a double in fixed-point notation (`%f`, `%F`).
///
/// The sign comes from the bit pattern, so `-0.0` keeps its minus sign; NaN
/// never carries one. Width, justification and `+` do not apply. Rounding is
/// entirely up to `decimal`.
pub fn format_float<D: DecimalDecompose + ?Sized>(
    value: f64,
    spec: &FormatSpec,
    decimal: &D,
    sink: &mut BoundedSink<'_>,
) {
    let precision = match spec.precision {
        Precision::Fixed(p) => p,
        _ => DEFAULT_FLOAT_PRECISION,
    };

    if value.is_nan() {
        sink.put_ascii(if spec.uppercase { b"NAN" } else { b"nan" });
        return;
    }
    if value.is_sign_negative() {
        sink.put(u32::from(b'-'));
    }
    if value.is_infinite() {
        sink.put_ascii(if spec.uppercase { b"INF" } else { b"inf" });
        return;
    }

    let decomposed = decimal.decompose(value.abs(), DecimalMode::Fixed, precision);
    FixedPoint::new(
        &decomposed.digits,
        decomposed.exponent,
        precision,
        spec.flags.alt_form,
    )
    .emit(sink);
}
