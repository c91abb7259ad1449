//! Conformance testing harness for wideprintf.
//!
//! This crate provides:
//! - Fixtures: JSON case sets describing a template, arguments, a buffer
//!   capacity and the expected buffer contents and return value
//! - Execution: render a case through the engine and capture what it wrote
//! - Verification: compare runs against fixtures, with text diffs
//! - Reports: markdown + JSON summaries carrying fixture digests
//! - Structured logging: JSONL records for every verified case

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod exec;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureInputs, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
