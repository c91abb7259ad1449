//! swprintf formatting engine.
//!
//! Parses a NUL-terminated wide format template into segments and renders
//! them against an [`ArgStream`] into a bounded wide buffer.
//!
//! Directive grammar:
//!
//! ```text
//! "%" {flags}* [width] ["." (precision | "*")] [length-modifier] conversion
//! flags:           '-' | '+' | '#' | '0'
//! length-modifier: "h" | "hh" | "l" | "ll" | "L"
//! conversion:      '%' 'c' 'C' 'd' 'D' 'u' 'U' 'x' 'X' 'p' 'P' 's' 'S' 'f' 'F'
//! ```
//!
//! A directive with an unknown conversion letter is not dropped: the `%` is
//! emitted as text and scanning resumes right after it, so everything the
//! parser had consumed (flags, width, precision, modifiers) is replayed as
//! literal characters. A template that ends inside a directive ends the
//! output there.

use super::args::{ArgStream, FormatArg};
use super::convert::{
    format_char, format_float, format_pointer, format_signed, format_str, format_unsigned,
};
use super::sink::BoundedSink;
use crate::stdlib::dtoa::{DecimalDecompose, StdDecimal};
use crate::string::wcslen;

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// Flags parsed from a format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// Length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Half,     // 'h', 'hh'
    Long,     // 'l'
    LongLong, // 'll', 'L'
}

/// Conversion selected by the directive's final letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Percent,
    Char,
    Signed,
    Unsigned,
    Hex,
    Pointer,
    Str,
    Float,
}

impl Conversion {
    /// Classify a conversion letter; the flag is true for the uppercase form.
    fn from_letter(c: char) -> Option<(Self, bool)> {
        let conversion = match c.to_ascii_lowercase() {
            '%' => Self::Percent,
            'c' => Self::Char,
            'd' => Self::Signed,
            'u' => Self::Unsigned,
            'x' => Self::Hex,
            'p' => Self::Pointer,
            's' => Self::Str,
            'f' => Self::Float,
            _ => return None,
        };
        Some((conversion, c.is_ascii_uppercase()))
    }
}

/// A parsed format directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    /// Minimum field width; 0 means no minimum.
    pub width: usize,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: Conversion,
    /// The conversion letter was uppercase (`X`, `P`, `F`, ...).
    pub uppercase: bool,
}

/// Why a directive could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveError {
    /// The template ended before the conversion letter.
    Incomplete,
    /// The conversion letter is not recognized. `precision` records whether
    /// a `.*` already claimed an argument.
    UnknownConversion { precision: Precision },
}

// ---------------------------------------------------------------------------
// Segment: parsed pieces of a format template
// ---------------------------------------------------------------------------

/// A segment of a parsed format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal characters to emit verbatim.
    Literal(&'a [u32]),
    /// A directive requiring conversion.
    Spec(FormatSpec),
    /// A directive with an unknown conversion: emits `%`, after consuming the
    /// `.*` argument if it had one. The directive's text follows as literals.
    Malformed { precision: Precision },
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

fn ch(c: u32) -> char {
    char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Parse a single directive starting after the '%' character.
///
/// `fmt` holds the template text following '%' (no NUL inside). Returns
/// `(spec, units_consumed)` where `units_consumed` counts from `fmt[0]`.
pub fn parse_format_spec(fmt: &[u32]) -> Result<(FormatSpec, usize), DirectiveError> {
    let mut pos = 0;
    let next = |pos: usize| -> Result<char, DirectiveError> {
        fmt.get(pos).map(|&c| ch(c)).ok_or(DirectiveError::Incomplete)
    };

    // --- flags ---
    let mut flags = FormatFlags::default();
    loop {
        match next(pos)? {
            '-' => flags.left_justify = true,
            '+' => flags.force_sign = true,
            '#' => flags.alt_form = true,
            '0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    // --- width ---
    let mut width = 0_usize;
    while let Some(d) = next(pos)?.to_digit(10) {
        width = width.saturating_mul(10).saturating_add(d as usize);
        pos += 1;
    }

    // --- precision ---
    let mut precision = Precision::None;
    if next(pos)? == '.' {
        pos += 1;
        if next(pos)? == '*' {
            pos += 1;
            precision = Precision::FromArg;
        } else {
            let mut limit = 0_usize;
            while let Some(d) = next(pos)?.to_digit(10) {
                limit = limit.saturating_mul(10).saturating_add(d as usize);
                pos += 1;
            }
            precision = Precision::Fixed(limit);
        }
    }

    // --- length modifier ---
    let length = match next(pos)? {
        'L' => {
            pos += 1;
            LengthMod::LongLong
        }
        'l' => {
            pos += 1;
            if next(pos)? == 'l' {
                pos += 1;
                LengthMod::LongLong
            } else {
                LengthMod::Long
            }
        }
        'h' => {
            pos += 1;
            if next(pos)? == 'h' {
                pos += 1;
            }
            LengthMod::Half
        }
        _ => LengthMod::None,
    };

    // --- conversion ---
    let Some((conversion, uppercase)) = Conversion::from_letter(next(pos)?) else {
        return Err(DirectiveError::UnknownConversion { precision });
    };
    pos += 1;

    Ok((
        FormatSpec {
            flags,
            width,
            precision,
            length,
            conversion,
            uppercase,
        },
        pos,
    ))
}

/// Split a format template into segments.
///
/// The template ends at its first NUL (or the slice end). Yields
/// `FormatSegment::Literal` for literal runs and `FormatSegment::Spec` for each
/// directive; an unknown directive yields `FormatSegment::Malformed` and its
/// text is rescanned as literals. A directive cut off by the end of the
/// template stops the scan.
pub fn parse_format_string(fmt: &[u32]) -> Vec<FormatSegment<'_>> {
    let fmt = &fmt[..wcslen(fmt)];
    let percent = u32::from(b'%');
    let mut segments = Vec::new();
    let mut pos = 0;
    let len = fmt.len();

    while pos < len {
        let start = pos;
        while pos < len && fmt[pos] != percent {
            pos += 1;
        }
        if pos > start {
            segments.push(FormatSegment::Literal(&fmt[start..pos]));
        }
        if pos >= len {
            break;
        }
        // Skip the '%'.
        pos += 1;
        match parse_format_spec(&fmt[pos..]) {
            Ok((spec, consumed)) => {
                pos += consumed;
                segments.push(FormatSegment::Spec(spec));
            }
            Err(DirectiveError::UnknownConversion { precision }) => {
                segments.push(FormatSegment::Malformed { precision });
            }
            Err(DirectiveError::Incomplete) => break,
        }
    }
    segments
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Formatting engine parameterized by its decimal decomposition service.
#[derive(Debug, Clone, Copy, Default)]
pub struct WideFormatter<D = StdDecimal> {
    decimal: D,
}

impl<D: DecimalDecompose> WideFormatter<D> {
    #[must_use]
    pub fn new(decimal: D) -> Self {
        Self { decimal }
    }

    /// Render `format` into `buffer`, pulling arguments from `args`.
    ///
    /// Returns the number of characters the full output has, whether or not
    /// it fit. `buffer` is NUL-terminated within its length unless empty.
    pub fn format(&self, buffer: &mut [u32], format: &[u32], args: &mut ArgStream<'_>) -> usize {
        let mut sink = BoundedSink::new(buffer);
        for segment in &parse_format_string(format) {
            self.render_segment(segment, args, &mut sink);
        }
        sink.finish()
    }

    fn render_segment(
        &self,
        segment: &FormatSegment<'_>,
        args: &mut ArgStream<'_>,
        sink: &mut BoundedSink<'_>,
    ) {
        match segment {
            FormatSegment::Literal(lit) => sink.put_wide(lit),
            FormatSegment::Malformed { precision } => {
                if *precision == Precision::FromArg {
                    args.next_signed();
                }
                sink.put(u32::from(b'%'));
            }
            FormatSegment::Spec(spec) => {
                let mut resolved = *spec;
                if spec.precision == Precision::FromArg {
                    // Negative precision from the stream means "unspecified".
                    resolved.precision = usize::try_from(args.next_signed())
                        .map_or(Precision::None, Precision::Fixed);
                }
                match spec.conversion {
                    Conversion::Percent => sink.put(u32::from(b'%')),
                    Conversion::Char => format_char(args.next_char(), sink),
                    Conversion::Signed => format_signed(args.next_signed(), &resolved, sink),
                    Conversion::Unsigned | Conversion::Hex => {
                        format_unsigned(args.next_unsigned(), &resolved, sink);
                    }
                    Conversion::Pointer => format_pointer(args.next_pointer(), &resolved, sink),
                    Conversion::Str => format_str(args.next_str(), &resolved, sink),
                    Conversion::Float => {
                        format_float(args.next_float(), &resolved, &self.decimal, sink);
                    }
                }
            }
        }
    }
}

/// Format into `buffer` with the arguments in `args` (C `swprintf`).
///
/// Returns the untruncated output length; compare it with `buffer.len()` to
/// detect truncation.
pub fn format_into(buffer: &mut [u32], format: &[u32], args: &[FormatArg<'_>]) -> usize {
    format_into_with_args(buffer, format, &mut ArgStream::new(args))
}

/// Format into `buffer` from an explicit argument stream (C `vswprintf`).
///
/// Arguments the template does not consume stay in `args`.
pub fn format_into_with_args(buffer: &mut [u32], format: &[u32], args: &mut ArgStream<'_>) -> usize {
    WideFormatter::new(StdDecimal).format(buffer, format, args)
}

/// Variadic front end for [`format_into`].
///
/// ```
/// use wideprintf_core::{string::{from_wide, to_wide}, swprintf};
///
/// let mut buf = [0u32; 16];
/// let n = swprintf!(&mut buf, &to_wide("%s=%d"), "x", 42);
/// assert_eq!(n, 4);
/// assert_eq!(from_wide(&buf), "x=42");
/// ```
#[macro_export]
macro_rules! swprintf {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::stdio::format_into(
            $buf,
            $fmt,
            &[$($crate::stdio::FormatArg::from($arg)),*],
        )
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::{from_wide, to_wide};

    fn spec_of(text: &str) -> Result<(FormatSpec, usize), DirectiveError> {
        let w: Vec<u32> = text.chars().map(u32::from).collect();
        parse_format_spec(&w)
    }

    fn run(fmt: &str, args: &[FormatArg<'_>]) -> (String, usize) {
        let mut buf = [0u32; 128];
        let n = format_into(&mut buf, &to_wide(fmt), args);
        (from_wide(&buf), n)
    }

    #[test]
    fn test_parse_simple_int() {
        let (spec, consumed) = spec_of("d").unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(spec.conversion, Conversion::Signed);
        assert_eq!(spec.width, 0);
        assert_eq!(spec.precision, Precision::None);
    }

    #[test]
    fn test_parse_width_precision() {
        let (spec, consumed) = spec_of("10.5f").unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(spec.conversion, Conversion::Float);
        assert_eq!(spec.width, 10);
        assert_eq!(spec.precision, Precision::Fixed(5));
    }

    #[test]
    fn test_parse_bare_dot_is_zero_precision() {
        let (spec, _) = spec_of(".f").unwrap();
        assert_eq!(spec.precision, Precision::Fixed(0));
    }

    #[test]
    fn test_parse_flags() {
        let (spec, _) = spec_of("-+#010d").unwrap();
        assert!(spec.flags.left_justify);
        assert!(spec.flags.force_sign);
        assert!(spec.flags.alt_form);
        assert!(!spec.flags.zero_pad); // overridden by '-'
        assert_eq!(spec.width, 10);
    }

    #[test]
    fn test_parse_repeated_flags() {
        let (spec, consumed) = spec_of("00+0+5d").unwrap();
        assert!(spec.flags.zero_pad);
        assert!(spec.flags.force_sign);
        assert_eq!(spec.width, 5);
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_parse_length_modifiers() {
        assert_eq!(spec_of("hs").unwrap().0.length, LengthMod::Half);
        assert_eq!(spec_of("hhs").unwrap().0.length, LengthMod::Half);
        assert_eq!(spec_of("ls").unwrap().0.length, LengthMod::Long);
        assert_eq!(spec_of("lld").unwrap().0.length, LengthMod::LongLong);
        assert_eq!(spec_of("Lx").unwrap().0.length, LengthMod::LongLong);
    }

    #[test]
    fn test_parse_star_precision() {
        let (spec, _) = spec_of(".*s").unwrap();
        assert_eq!(spec.precision, Precision::FromArg);
    }

    #[test]
    fn test_parse_uppercase_letters() {
        let (spec, _) = spec_of("X").unwrap();
        assert_eq!(spec.conversion, Conversion::Hex);
        assert!(spec.uppercase);
        let (spec, _) = spec_of("S").unwrap();
        assert_eq!(spec.conversion, Conversion::Str);
    }

    #[test]
    fn test_parse_unknown_conversion() {
        assert_eq!(
            spec_of("5k"),
            Err(DirectiveError::UnknownConversion {
                precision: Precision::None
            })
        );
        assert_eq!(
            spec_of(".*q"),
            Err(DirectiveError::UnknownConversion {
                precision: Precision::FromArg
            })
        );
        // No '*' width in this grammar.
        assert!(matches!(
            spec_of("*d"),
            Err(DirectiveError::UnknownConversion { .. })
        ));
    }

    #[test]
    fn test_parse_incomplete() {
        assert_eq!(spec_of(""), Err(DirectiveError::Incomplete));
        assert_eq!(spec_of("-5"), Err(DirectiveError::Incomplete));
        assert_eq!(spec_of("5.2l"), Err(DirectiveError::Incomplete));
        assert_eq!(spec_of(".*"), Err(DirectiveError::Incomplete));
    }

    #[test]
    fn test_parse_format_string_segments() {
        let fmt = to_wide("hello %d world %s!");
        let segments = parse_format_string(&fmt);
        assert_eq!(segments.len(), 5);
        assert!(matches!(segments[0], FormatSegment::Literal(l) if from_wide(l) == "hello "));
        assert!(matches!(&segments[1], FormatSegment::Spec(s) if s.conversion == Conversion::Signed));
        assert!(matches!(segments[2], FormatSegment::Literal(l) if from_wide(l) == " world "));
        assert!(matches!(&segments[3], FormatSegment::Spec(s) if s.conversion == Conversion::Str));
        assert!(matches!(segments[4], FormatSegment::Literal(l) if from_wide(l) == "!"));
    }

    #[test]
    fn test_parse_percent_escape() {
        let fmt = to_wide("100%%");
        let segments = parse_format_string(&fmt);
        assert_eq!(segments.len(), 2);
        assert!(matches!(&segments[1], FormatSegment::Spec(s) if s.conversion == Conversion::Percent));
    }

    #[test]
    fn test_parse_stops_at_nul() {
        let mut fmt = to_wide("ab");
        fmt.extend(to_wide("%d"));
        let segments = parse_format_string(&fmt);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_malformed_segment_rescans() {
        let fmt = to_wide("%-5k");
        let segments = parse_format_string(&fmt);
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            FormatSegment::Malformed {
                precision: Precision::None
            }
        );
        assert!(matches!(segments[1], FormatSegment::Literal(l) if from_wide(l) == "-5k"));
    }

    #[test]
    fn test_render_scenarios() {
        assert_eq!(run("%5d", &[FormatArg::from(-3)]), ("   -3".into(), 5));
        assert_eq!(run("%#x", &[FormatArg::from(255)]), ("0xff".into(), 4));
        assert_eq!(run("%.2f", &[FormatArg::from(0.0)]), ("0.00".into(), 4));
        assert_eq!(run("%s", &[FormatArg::WideStr(None)]), ("(null)".into(), 6));
        assert_eq!(run("%+d", &[FormatArg::from(5)]), ("+5".into(), 2));
    }

    #[test]
    fn test_render_percent_with_flags() {
        assert_eq!(run("%5%", &[]), ("%".into(), 1));
    }

    #[test]
    fn test_render_unknown_replays_directive_text() {
        assert_eq!(run("a%-05.3ykb", &[]), ("a%-05.3ykb".into(), 10));
        assert_eq!(run("%hq", &[]), ("%hq".into(), 3));
    }

    #[test]
    fn test_render_unknown_keeps_star_argument_consumed() {
        let args = [FormatArg::from(3), FormatArg::from(7)];
        assert_eq!(run("%.*k%d", &args), ("%.*k7".into(), 5));
    }

    #[test]
    fn test_render_truncated_directive_ends_output() {
        assert_eq!(run("abc%", &[]), ("abc".into(), 3));
        assert_eq!(run("abc%-12", &[FormatArg::from(1)]), ("abc".into(), 3));
        assert_eq!(run("x%lltail", &[FormatArg::from(1)]), ("x%lltail".into(), 8));
    }

    #[test]
    fn test_render_star_precision() {
        let args = [FormatArg::from(2), FormatArg::from("abcdef")];
        assert_eq!(run("%.*hs", &args), ("ab".into(), 2));
        let args = [FormatArg::from(-1), FormatArg::from(1.5)];
        assert_eq!(run("%.*f", &args), ("1.500000".into(), 8));
    }

    #[test]
    fn test_render_mixed() {
        let name = to_wide("disk");
        let args = [
            FormatArg::from(&name),
            FormatArg::from(87.26),
            FormatArg::from('%'),
        ];
        assert_eq!(
            run("%-6s|%6.1f%c", &args),
            ("disk  |87.3%".into(), 12)
        );
    }

    #[test]
    fn test_formatter_with_custom_decimal() {
        use crate::stdlib::dtoa::{Decimal, DecimalMode};

        struct Fixed42;
        impl DecimalDecompose for Fixed42 {
            fn decompose(&self, _value: f64, _mode: DecimalMode, _precision: usize) -> Decimal {
                Decimal {
                    digits: b"42".to_vec(),
                    exponent: 1,
                    negative: false,
                }
            }
        }

        let mut buf = [0u32; 16];
        let args = [FormatArg::from(-1.0)];
        let n = WideFormatter::new(Fixed42).format(
            &mut buf,
            &to_wide("%.1f"),
            &mut ArgStream::new(&args),
        );
        assert_eq!(n, 4);
        assert_eq!(from_wide(&buf), "-4.2");
    }

    #[test]
    fn test_swprintf_macro() {
        let mut buf = [0u32; 32];
        let n = crate::swprintf!(&mut buf, &to_wide("%c%c%05u"), 'o', 'k', 42_u32);
        assert_eq!(n, 7);
        assert_eq!(from_wide(&buf), "ok00042");
    }
}
