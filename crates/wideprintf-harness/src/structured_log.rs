//! Structured JSONL logging for conformance runs.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required + optional fields.
//! - [`LogEmitter`]: writes records to a file or an in-memory buffer.
//! - [`validate_log_line`]: checks a single line against the schema.
//! - [`validate_log_file`]: checks an entire JSONL file.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Verification outcome of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    /// Feature area of the case (`integer`, `float`, `truncation`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// Engine return value for the case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ns: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            campaign: None,
            function: None,
            case_name: None,
            area: None,
            outcome: None,
            count: None,
            latency_ns: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_campaign(mut self, campaign: impl Into<String>) -> Self {
        self.campaign = Some(campaign.into());
        self
    }

    /// Set the entry point and case identity.
    #[must_use]
    pub fn with_case(
        mut self,
        function: impl Into<String>,
        case_name: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        self.function = Some(function.into());
        self.case_name = Some(case_name.into());
        self.area = Some(area.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_latency_ns(mut self, ns: u64) -> Self {
        self.latency_ns = Some(ns);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Writes structured JSONL log entries.
pub struct LogEmitter<W: Write> {
    writer: W,
    seq: u64,
    run_id: String,
}

impl LogEmitter<std::io::BufWriter<std::fs::File>> {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(std::io::BufWriter::new(file), run_id))
    }
}

impl LogEmitter<Vec<u8>> {
    /// Create an emitter that writes to an in-memory buffer.
    #[must_use]
    pub fn to_buffer(run_id: &str) -> Self {
        Self::new(Vec::new(), run_id)
    }
}

impl<W: Write> LogEmitter<W> {
    pub fn new(writer: W, run_id: &str) -> Self {
        Self {
            writer,
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("wideprintf::{}::{:03}", self.run_id, self.seq)
    }

    /// Emit a bare entry with an auto-generated trace id.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let trace_id = self.next_trace_id();
        let entry = LogEntry::new(trace_id, level, event);
        self.write_entry(&entry)?;
        Ok(entry)
    }

    /// Emit a fully-populated entry, filling in the trace id if empty.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        self.write_entry(&entry)
    }

    fn write_entry(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Number of entries emitted with generated trace ids.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Validation error for a log line.
#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let error = |field: &str, message: String| LogValidationError {
        line_number,
        field: field.to_string(),
        message,
    };

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Err(vec![error("<json>", format!("invalid JSON: {e}"))]),
    };
    let Some(obj) = value.as_object() else {
        return Err(vec![error("<root>", "expected JSON object".to_string())]);
    };

    let mut errors = Vec::new();
    for field in ["timestamp", "trace_id", "level", "event"] {
        if !obj.contains_key(field) {
            errors.push(error(field, "required field missing".to_string()));
        }
    }

    if let Some(level) = obj.get("level").and_then(|v| v.as_str())
        && !["trace", "debug", "info", "warn", "error"].contains(&level)
    {
        errors.push(error("level", format!("invalid level: '{level}'")));
    }

    if let Some(outcome) = obj.get("outcome").and_then(|v| v.as_str())
        && !["pass", "fail", "error"].contains(&outcome)
    {
        errors.push(error("outcome", format!("invalid outcome: '{outcome}'")));
    }

    // trace ids look like `wideprintf::<run>::<seq>`
    if let Some(trace_id) = obj.get("trace_id").and_then(|v| v.as_str())
        && trace_id.split("::").count() < 3
    {
        errors.push(error(
            "trace_id",
            format!("expected '<crate>::<run>::<seq>', got '{trace_id}'"),
        ));
    }

    if obj.get("outcome").is_some() && obj.get("case_name").is_none() {
        errors.push(error("case_name", "outcome requires case_name".to_string()));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value)
        .map_err(|e| vec![error("<deserialization>", format!("failed to deserialize: {e}"))])
}

/// Validate an entire JSONL file.
///
/// Returns the non-empty line count and any validation errors found.
pub fn validate_log_file(path: &Path) -> Result<(usize, Vec<LogValidationError>), std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    let mut all_errors = Vec::new();
    let mut line_count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line_count += 1;
        if let Err(errs) = validate_log_line(line, i + 1) {
            all_errors.extend(errs);
        }
    }

    Ok((line_count, all_errors))
}

/// Approximate UTC timestamp, without a calendar dependency.
pub fn now_utc() -> String {
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        duration.subsec_millis(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_serializes_required_fields() {
        let entry = LogEntry::new("wideprintf::run-1::001", LogLevel::Info, "verify_start");
        let parsed: serde_json::Value =
            serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["trace_id"], "wideprintf::run-1::001");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "verify_start");
        assert!(parsed.get("case_name").is_none());
        assert!(parsed.get("outcome").is_none());
    }

    #[test]
    fn case_entry_carries_optional_fields() {
        let entry = LogEntry::new("wideprintf::run-1::002", LogLevel::Error, "case_result")
            .with_campaign("fixture-verify")
            .with_case("swprintf", "pad_negative", "integer")
            .with_outcome(Outcome::Fail)
            .with_count(5)
            .with_latency_ns(120)
            .with_details(serde_json::json!({"expected": "   -3"}));
        let parsed: serde_json::Value =
            serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert_eq!(parsed["campaign"], "fixture-verify");
        assert_eq!(parsed["function"], "swprintf");
        assert_eq!(parsed["case_name"], "pad_negative");
        assert_eq!(parsed["area"], "integer");
        assert_eq!(parsed["outcome"], "fail");
        assert_eq!(parsed["count"], 5);
        assert_eq!(parsed["latency_ns"], 120);
        assert!(parsed["details"].is_object());
    }

    #[test]
    fn validate_valid_line() {
        let entry = LogEntry::new("wideprintf::run-1::001", LogLevel::Info, "verify_start");
        let result = validate_log_line(&entry.to_jsonl().unwrap(), 1);
        assert!(result.is_ok(), "valid line should pass: {result:?}");
    }

    #[test]
    fn validate_missing_required_field() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","level":"info","event":"x"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "trace_id"));
    }

    #[test]
    fn validate_invalid_level_and_outcome() {
        let json = r#"{"timestamp":"t","trace_id":"a::b::c","level":"critical","event":"x","case_name":"c","outcome":"maybe"}"#;
        let errors = validate_log_line(json, 3).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "level"));
        assert!(errors.iter().any(|e| e.field == "outcome"));
        assert!(errors.iter().all(|e| e.line_number == 3));
    }

    #[test]
    fn validate_outcome_without_case() {
        let json = r#"{"timestamp":"t","trace_id":"a::b::c","level":"info","event":"x","outcome":"pass"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "case_name"));
    }

    #[test]
    fn validate_invalid_json() {
        let errors = validate_log_line("not json at all", 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "<json>"));
        let errors = validate_log_line("[1,2]", 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "<root>"));
    }

    #[test]
    fn validate_bad_trace_id_format() {
        let json = r#"{"timestamp":"t","trace_id":"no-separator","level":"info","event":"x"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "trace_id"));
    }

    #[test]
    fn emitter_generates_sequential_trace_ids() {
        let mut emitter = LogEmitter::to_buffer("run-42");
        let e1 = emitter.emit(LogLevel::Info, "start").unwrap();
        let e2 = emitter.emit(LogLevel::Info, "end").unwrap();
        assert_eq!(e1.trace_id, "wideprintf::run-42::001");
        assert_eq!(e2.trace_id, "wideprintf::run-42::002");
        assert_eq!(emitter.sequence(), 2);
    }

    #[test]
    fn emitted_lines_validate() {
        let mut emitter = LogEmitter::to_buffer("run-7");
        emitter.emit(LogLevel::Info, "verify_start").unwrap();
        emitter
            .emit_entry(
                LogEntry::new("", LogLevel::Info, "case_result")
                    .with_case("swprintf", "c1", "string")
                    .with_outcome(Outcome::Pass),
            )
            .unwrap();
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for (i, line) in lines.iter().enumerate() {
            let entry = validate_log_line(line, i + 1).unwrap();
            assert!(entry.trace_id.starts_with("wideprintf::run-7::"));
        }
    }

    #[test]
    fn roundtrip_deserialization() {
        let entry = LogEntry::new("wideprintf::run-1::001", LogLevel::Warn, "slow_case")
            .with_latency_ns(25_000);
        let restored: LogEntry = serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert_eq!(restored.level, LogLevel::Warn);
        assert_eq!(restored.event, "slow_case");
        assert_eq!(restored.latency_ns, Some(25_000));
    }
}
