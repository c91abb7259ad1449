//! Standard I/O formatting.
//!
//! Implements the `swprintf`/`vswprintf` formatting engine: directive parsing,
//! typed argument streams, value converters and the bounded output sink.

pub mod args;
pub mod convert;
pub mod sink;
pub mod wprintf;

pub use args::{ArgStream, FormatArg, StrArg};
pub use sink::BoundedSink;
pub use wprintf::{
    Conversion, FormatFlags, FormatSegment, FormatSpec, LengthMod, Precision, WideFormatter,
    format_into, format_into_with_args, parse_format_spec, parse_format_string,
};
