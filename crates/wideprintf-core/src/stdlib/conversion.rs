//! Wide numeric conversion functions (wcstol, wcstoul).

/// Result of a string-to-number conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Overflow,
    Underflow,
    InvalidBase,
}

pub fn wcstol(s: &[u32], base: u32) -> i64 {
    let (val, _, _) = wcstol_impl(s, base);
    val
}

pub fn wcstoul(s: &[u32], base: u32) -> u64 {
    let (val, _, _) = wcstoul_impl(s, base);
    val
}

/// Helper for wcstol: returns (value, consumed_units, status).
pub fn wcstol_impl(s: &[u32], base: u32) -> (i64, usize, ConversionStatus) {
    let (negative, magnitude, consumed, status) = scan_integer(s, base);
    if status != ConversionStatus::Success {
        return (0, consumed, status);
    }
    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return (i64::MIN, consumed, ConversionStatus::Underflow);
        }
        (0_i64.wrapping_sub_unsigned(magnitude), consumed, status)
    } else if magnitude > i64::MAX as u64 {
        (i64::MAX, consumed, ConversionStatus::Overflow)
    } else {
        (magnitude as i64, consumed, status)
    }
}

/// Helper for wcstoul: returns (value, consumed_units, status).
///
/// A leading `-` negates the result in unsigned arithmetic, as C `wcstoul` does.
pub fn wcstoul_impl(s: &[u32], base: u32) -> (u64, usize, ConversionStatus) {
    let (negative, magnitude, consumed, status) = scan_integer(s, base);
    match status {
        ConversionStatus::Success if negative => (magnitude.wrapping_neg(), consumed, status),
        ConversionStatus::Success => (magnitude, consumed, status),
        ConversionStatus::Overflow => (u64::MAX, consumed, status),
        _ => (0, consumed, status),
    }
}

/// Shared scanner: whitespace, sign, optional `0x` prefix, then digits.
///
/// Returns (negative, magnitude, consumed_units, status). Stops at the first
/// NUL or non-digit.
fn scan_integer(s: &[u32], base: u32) -> (bool, u64, usize, ConversionStatus) {
    let len = crate::string::wcslen(s);
    let s = &s[..len];
    let mut i = 0;

    while i < len && is_space(s[i]) {
        i += 1;
    }
    if i == len {
        return (false, 0, 0, ConversionStatus::Success);
    }

    let mut negative = false;
    if s[i] == u32::from(b'-') {
        negative = true;
        i += 1;
    } else if s[i] == u32::from(b'+') {
        i += 1;
    }

    let has_0x_prefix = i + 1 < len
        && s[i] == u32::from(b'0')
        && (s[i + 1] == u32::from(b'x') || s[i + 1] == u32::from(b'X'))
        && i + 2 < len
        && digit_value(s[i + 2]).is_some_and(|d| d < 16);

    let effective_base = match base {
        0 if has_0x_prefix => {
            i += 2;
            16
        }
        0 if i < len && s[i] == u32::from(b'0') => 8,
        0 => 10,
        16 if has_0x_prefix => {
            i += 2;
            16
        }
        b => b,
    };

    if !(2..=36).contains(&effective_base) {
        return (false, 0, 0, ConversionStatus::InvalidBase);
    }

    let mut acc: u64 = 0;
    let mut any_digits = false;
    let mut overflow = false;

    while i < len {
        let Some(digit) = digit_value(s[i]) else {
            break;
        };
        if digit >= effective_base {
            break;
        }
        any_digits = true;
        if !overflow {
            match acc
                .checked_mul(u64::from(effective_base))
                .and_then(|v| v.checked_add(u64::from(digit)))
            {
                Some(v) => acc = v,
                None => overflow = true,
            }
        }
        i += 1;
    }

    if !any_digits {
        return (false, 0, 0, ConversionStatus::Success);
    }
    if overflow {
        let status = if negative {
            ConversionStatus::Underflow
        } else {
            ConversionStatus::Overflow
        };
        return (negative, u64::MAX, i, status);
    }
    (negative, acc, i, ConversionStatus::Success)
}

fn digit_value(c: u32) -> Option<u32> {
    match char::from_u32(c)? {
        d @ '0'..='9' => Some(d as u32 - '0' as u32),
        d @ 'a'..='z' => Some(d as u32 - 'a' as u32 + 10),
        d @ 'A'..='Z' => Some(d as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

fn is_space(c: u32) -> bool {
    matches!(c, 0x20 | 0x09..=0x0D)
}
