//! Test execution engine.

use std::io::Write;
use std::time::Instant;

use crate::diff;
use crate::exec::{CaseRun, execute_fixture_case};
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all cases in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set.cases.iter().map(|case| verify_case(case).0).collect()
    }

    /// Like [`TestRunner::run`], emitting one log entry per case.
    pub fn run_logged<W: Write>(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter<W>,
    ) -> std::io::Result<Vec<VerificationResult>> {
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "fixture_set_start")
                .with_campaign(&self.campaign)
                .with_details(serde_json::json!({
                    "family": fixture_set.family,
                    "version": fixture_set.version,
                    "cases": fixture_set.cases.len(),
                })),
        )?;

        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let started = Instant::now();
            let (result, errored) = verify_case(case);
            let latency = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

            let (level, outcome) = match (result.passed, errored) {
                (true, _) => (LogLevel::Info, Outcome::Pass),
                (false, false) => (LogLevel::Warn, Outcome::Fail),
                (false, true) => (LogLevel::Error, Outcome::Error),
            };
            let mut entry = LogEntry::new("", level, "case_result")
                .with_campaign(&self.campaign)
                .with_case(&case.function, &case.name, &case.area)
                .with_outcome(outcome)
                .with_latency_ns(latency);
            if let Some(count) = result.actual_count {
                entry = entry.with_count(count);
            }
            if let Some(diff) = &result.diff {
                entry = entry.with_details(serde_json::json!({ "diff": diff }));
            }
            log.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }
}

/// Execute and compare one case. The flag is set when the case could not run.
fn verify_case(case: &FixtureCase) -> (VerificationResult, bool) {
    let (actual, actual_count, diff, errored) = match execute_fixture_case(case) {
        Ok(run) => {
            let notes = mismatch_notes(case, &run);
            let diff = (!notes.is_empty()).then(|| notes.join("\n"));
            (run.output, Some(run.count), diff, false)
        }
        Err(err) => {
            let actual = format!("error:{err}");
            let diff = diff::render_diff(&case.expected_output, &actual);
            (actual, None, Some(diff), true)
        }
    };

    let result = VerificationResult {
        case_name: case.name.clone(),
        function: case.function.clone(),
        area: case.area.clone(),
        passed: diff.is_none(),
        expected: case.expected_output.clone(),
        actual,
        expected_count: case.expected_count,
        actual_count,
        diff,
    };
    (result, errored)
}

fn mismatch_notes(case: &FixtureCase, run: &CaseRun) -> Vec<String> {
    let mut notes = Vec::new();
    if run.output != case.expected_output {
        notes.push(diff::render_diff(&case.expected_output, &run.output));
    }
    if run.count != case.expected_count {
        notes.push(format!(
            "count mismatch: expected {}, got {}",
            case.expected_count, run.count
        ));
    }
    if !run.terminated {
        notes.push(String::from("buffer not terminated"));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured_log::validate_log_line;

    fn fixture(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"stdio/swprintf","captured_at":"2026-10-19T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn passing_cases() {
        let set = fixture(
            r#"{"name":"pad","function":"swprintf","area":"integer","inputs":{"format":"%5d","capacity":10,"args":[{"kind":"signed","value":-3}]},"expected_output":"   -3","expected_count":5},
               {"name":"trunc","function":"vswprintf","area":"truncation","inputs":{"format":"Hello","capacity":3},"expected_output":"He","expected_count":5}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn count_mismatch_fails() {
        let set = fixture(
            r#"{"name":"bad_count","function":"swprintf","area":"truncation","inputs":{"format":"Hello","capacity":3},"expected_output":"He","expected_count":2}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert!(!results[0].passed);
        assert!(results[0].diff.as_deref().unwrap().contains("count mismatch"));
    }

    #[test]
    fn output_mismatch_carries_diff() {
        let set = fixture(
            r#"{"name":"bad_output","function":"swprintf","area":"hex","inputs":{"format":"%x","capacity":8,"args":[{"kind":"unsigned","value":255}]},"expected_output":"FF","expected_count":2}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, "ff");
        assert!(results[0].diff.as_deref().unwrap().contains("first difference at char 0"));
    }

    #[test]
    fn unsupported_function_fails() {
        let set = fixture(
            r#"{"name":"odd","function":"wprintf","area":"misc","inputs":{"format":"x","capacity":4},"expected_output":"x","expected_count":1}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual_count, None);
        assert!(results[0].actual.starts_with("error:"));
    }

    #[test]
    fn logged_run_emits_valid_lines() {
        let set = fixture(
            r#"{"name":"plus","function":"swprintf","area":"integer","inputs":{"format":"%+d","capacity":8,"args":[{"kind":"signed","value":5}]},"expected_output":"+5","expected_count":2},
               {"name":"odd","function":"wprintf","area":"misc","inputs":{"format":"x","capacity":4},"expected_output":"x","expected_count":1}"#,
        );
        let mut log = LogEmitter::to_buffer("test");
        let results = TestRunner::new("smoke").run_logged(&set, &mut log).unwrap();
        assert_eq!(results.len(), 2);

        let text = String::from_utf8(log.into_inner()).unwrap();
        let entries: Vec<LogEntry> = text
            .lines()
            .enumerate()
            .map(|(i, line)| validate_log_line(line, i + 1).expect("valid log line"))
            .collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].event, "fixture_set_start");
        assert_eq!(entries[1].outcome, Some(Outcome::Pass));
        assert_eq!(entries[1].count, Some(2));
        assert_eq!(entries[2].outcome, Some(Outcome::Error));
        assert_eq!(entries[2].level, LogLevel::Error);
    }
}
