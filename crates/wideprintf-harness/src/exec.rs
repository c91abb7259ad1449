//! Fixture execution against the formatting engine.

use serde::{Deserialize, Serialize};
use wideprintf_core::stdio::{ArgStream, FormatArg, format_into, format_into_with_args};
use wideprintf_core::string::{from_wide, to_wide, wcslen};

use crate::error::HarnessError;
use crate::fixtures::{FixtureArg, FixtureCase, FixtureInputs};

/// Fill value for fresh buffers, so unwritten slots are distinguishable.
const POISON: u32 = 0xFFFD;

/// What a single engine invocation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRun {
    /// Buffer contents up to the first terminator.
    pub output: String,
    /// Engine return value.
    pub count: usize,
    /// A terminator was found inside the buffer (vacuously true for capacity 0).
    pub terminated: bool,
}

/// Argument storage that outlives the borrowed [`FormatArg`]s.
enum OwnedArg {
    Scalar(FormatArg<'static>),
    Narrow(Option<Vec<u8>>),
    Wide(Option<Vec<u32>>),
}

impl OwnedArg {
    fn from_fixture(arg: &FixtureArg) -> Result<Self, HarnessError> {
        let owned = match arg {
            FixtureArg::Char(c) => Self::Scalar(FormatArg::from(*c)),
            FixtureArg::Signed(v) => Self::Scalar(FormatArg::SignedInt(*v)),
            FixtureArg::Unsigned(v) => Self::Scalar(FormatArg::UnsignedInt(*v)),
            FixtureArg::Pointer(p) => Self::Scalar(FormatArg::Pointer(*p)),
            FixtureArg::Float(f) => Self::Scalar(FormatArg::Float(*f)),
            FixtureArg::FloatSpecial(name) => {
                let value = match name.as_str() {
                    "inf" => f64::INFINITY,
                    "-inf" => f64::NEG_INFINITY,
                    "nan" => f64::NAN,
                    "-0" => -0.0,
                    _ => return Err(HarnessError::InvalidArgument(name.clone())),
                };
                Self::Scalar(FormatArg::Float(value))
            }
            FixtureArg::Narrow(s) => Self::Narrow(s.as_ref().map(|s| s.as_bytes().to_vec())),
            FixtureArg::Wide(s) => Self::Wide(s.as_deref().map(to_wide)),
        };
        Ok(owned)
    }

    fn as_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Scalar(arg) => *arg,
            Self::Narrow(s) => FormatArg::NarrowStr(s.as_deref()),
            Self::Wide(s) => FormatArg::WideStr(s.as_deref()),
        }
    }
}

/// Render `inputs` through `function` and capture the buffer.
pub fn execute(function: &str, inputs: &FixtureInputs) -> Result<CaseRun, HarnessError> {
    let owned = inputs
        .args
        .iter()
        .map(OwnedArg::from_fixture)
        .collect::<Result<Vec<_>, _>>()?;
    let args: Vec<FormatArg<'_>> = owned.iter().map(OwnedArg::as_arg).collect();

    let template = to_wide(&inputs.format);
    let mut buffer = vec![POISON; inputs.capacity];
    let count = match function {
        "swprintf" => format_into(&mut buffer, &template, &args),
        "vswprintf" => format_into_with_args(&mut buffer, &template, &mut ArgStream::new(&args)),
        other => return Err(HarnessError::UnsupportedFunction(other.to_string())),
    };

    Ok(CaseRun {
        output: from_wide(&buffer),
        count,
        terminated: buffer.is_empty() || wcslen(&buffer) < buffer.len(),
    })
}

/// Execute one fixture case.
pub fn execute_fixture_case(case: &FixtureCase) -> Result<CaseRun, HarnessError> {
    execute(&case.function, &case.inputs)
}
