//! Report generation for conformance results.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::HarnessError;
use crate::verify::VerificationSummary;

/// Identity of one fixture file that fed the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub path: String,
    /// Lowercase hex SHA-256 of the file bytes.
    pub sha256: String,
    pub cases: usize,
}

impl FixtureDigest {
    /// Hash the file at `path`.
    pub fn from_file(path: &Path, cases: usize) -> Result<Self, HarnessError> {
        let data = std::fs::read(path)?;
        Ok(Self {
            path: path.display().to_string(),
            sha256: sha256_hex(&data),
            cases,
        })
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// A conformance report over one or more fixture files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub fixtures: Vec<FixtureDigest>,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(out, "- Total: {}", self.summary.total);
        let _ = writeln!(out, "- Passed: {}", self.summary.passed);
        let _ = writeln!(out, "- Failed: {}\n", self.summary.failed);

        if !self.fixtures.is_empty() {
            out.push_str("## Fixtures\n\n");
            out.push_str("| File | Cases | SHA-256 |\n");
            out.push_str("|------|-------|---------|\n");
            for f in &self.fixtures {
                let _ = writeln!(out, "| {} | {} | `{}` |", f.path, f.cases, f.sha256);
            }
            out.push('\n');
        }

        out.push_str("## Cases\n\n");
        out.push_str("| Case | Function | Area | Status |\n");
        out.push_str("|------|----------|------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                r.case_name, r.function, r.area, status
            );
        }

        let failures: Vec<_> = self.summary.failures().collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                let _ = writeln!(out, "\n### {}\n\n```", r.case_name);
                out.push_str(r.diff.as_deref().unwrap_or("(no diff)"));
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
