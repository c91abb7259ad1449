//! Output comparison and verification.

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub case_name: String,
    /// Entry point exercised (`swprintf` or `vswprintf`).
    pub function: String,
    /// Feature area of the case.
    pub area: String,
    pub passed: bool,
    /// Expected buffer contents.
    pub expected: String,
    /// Buffer contents produced by the engine.
    pub actual: String,
    pub expected_count: usize,
    /// Engine return value, absent when the case could not run.
    pub actual_count: Option<usize>,
    /// Diff or notes if the case failed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total,
            passed,
            failed: total - passed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failing results only.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            function: "swprintf".to_string(),
            area: "integer".to_string(),
            passed,
            expected: "1".to_string(),
            actual: if passed { "1" } else { "2" }.to_string(),
            expected_count: 1,
            actual_count: Some(1),
            diff: None,
        }
    }

    #[test]
    fn summary_counts() {
        let summary =
            VerificationSummary::from_results(vec![result("a", true), result("b", false)]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.all_passed());
        let names: Vec<&str> = summary.failures().map(|r| r.case_name.as_str()).collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn empty_summary_passes() {
        assert!(VerificationSummary::from_results(Vec::new()).all_passed());
    }
}
