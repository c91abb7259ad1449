//! Fixture loading and management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// One formatting argument, as written in fixture JSON.
///
/// Serialized as `{"kind": "signed", "value": -3}`. Strings use `null` for a
/// null pointer. JSON has no NaN or infinities, so those go through
/// `float_special` (`"inf"`, `"-inf"`, `"nan"`, `"-0"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FixtureArg {
    Char(char),
    Signed(i64),
    Unsigned(u64),
    Pointer(usize),
    Narrow(Option<String>),
    Wide(Option<String>),
    Float(f64),
    FloatSpecial(String),
}

impl FixtureArg {
    /// Parse the `kind:value` shorthand used on the command line.
    ///
    /// `narrow:null` and `wide:null` produce null strings.
    pub fn parse_shorthand(text: &str) -> Result<Self, HarnessError> {
        let invalid = || HarnessError::InvalidArgument(text.to_string());
        let (kind, value) = text.split_once(':').ok_or_else(invalid)?;
        let string = |v: &str| (v != "null").then(|| v.to_string());
        let arg = match kind {
            "char" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(invalid()),
                }
            }
            "signed" => Self::Signed(value.parse().map_err(|_| invalid())?),
            "unsigned" => Self::Unsigned(value.parse().map_err(|_| invalid())?),
            "pointer" => {
                let digits = value.trim_start_matches("0x");
                Self::Pointer(usize::from_str_radix(digits, 16).map_err(|_| invalid())?)
            }
            "narrow" => Self::Narrow(string(value)),
            "wide" => Self::Wide(string(value)),
            "float" => match value {
                "inf" | "-inf" | "nan" | "-0" => Self::FloatSpecial(value.to_string()),
                _ => Self::Float(value.parse().map_err(|_| invalid())?),
            },
            _ => return Err(invalid()),
        };
        Ok(arg)
    }
}

/// Inputs of one fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInputs {
    /// Format template.
    pub format: String,
    /// Destination buffer length in wide characters.
    pub capacity: usize,
    /// Arguments, consumed left to right.
    #[serde(default)]
    pub args: Vec<FixtureArg>,
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Entry point being tested (`swprintf` or `vswprintf`).
    pub function: String,
    /// Feature area the case pins down (e.g. "integer", "truncation").
    pub area: String,
    pub inputs: FixtureInputs,
    /// Expected buffer contents up to the terminator.
    pub expected_output: String,
    /// Expected return value (untruncated length).
    pub expected_count: usize,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let load = || -> Result<Self, HarnessError> {
            let content = std::fs::read_to_string(path)?;
            Ok(Self::from_json(&content)?)
        };
        load().map_err(|source| HarnessError::Fixture {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}
