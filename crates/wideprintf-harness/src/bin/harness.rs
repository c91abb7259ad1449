//! CLI entrypoint for the wideprintf conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wideprintf_harness::exec::execute;
use wideprintf_harness::report::FixtureDigest;
use wideprintf_harness::structured_log::{LogEmitter, LogLevel, now_utc};
use wideprintf_harness::verify::VerificationSummary;
use wideprintf_harness::{
    ConformanceReport, FixtureArg, FixtureInputs, FixtureSet, HarnessError, TestRunner,
};

/// Conformance tooling for wideprintf.
#[derive(Debug, Parser)]
#[command(name = "wideprintf-harness")]
#[command(about = "Conformance testing harness for wideprintf")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON). Defaults to the markdown path with a `.json` extension.
        #[arg(long)]
        json: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Render one template and print the buffer and return value.
    Render {
        /// Format template.
        #[arg(long)]
        format: String,
        /// Destination buffer length in wide characters.
        #[arg(long, default_value_t = 256)]
        capacity: usize,
        /// Argument as `kind:value` (char, signed, unsigned, pointer, narrow, wide, float).
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Use the explicit argument stream entry point.
        #[arg(long)]
        stream: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            json,
            log,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixture_paths: Vec<PathBuf> = std::fs::read_dir(&fixture)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
                .collect();
            fixture_paths.sort();

            let mut loaded = Vec::new();
            for path in fixture_paths {
                // A fixture that does not parse fails the run.
                let set = FixtureSet::from_file(&path)?;
                let digest = FixtureDigest::from_file(&path, set.cases.len())?;
                loaded.push((set, digest));
            }
            if loaded.is_empty() {
                return Err(HarnessError::NoFixtures(fixture).into());
            }

            let runner = TestRunner::new("fixture-verify");
            let mut results = Vec::new();
            match log {
                Some(log_path) => {
                    let mut emitter = LogEmitter::to_file(&log_path, "fixture-verify")?;
                    emitter.emit(LogLevel::Info, "verify_start")?;
                    for (set, _) in &loaded {
                        results.extend(runner.run_logged(set, &mut emitter)?);
                    }
                    emitter.emit(LogLevel::Info, "verify_end")?;
                    emitter.flush()?;
                    eprintln!("Wrote structured log to {}", log_path.display());
                }
                None => {
                    for (set, _) in &loaded {
                        results.extend(runner.run(set));
                    }
                }
            }

            let report_doc = ConformanceReport {
                title: String::from("wideprintf Conformance Report"),
                timestamp: now_utc(),
                fixtures: loaded.into_iter().map(|(_, digest)| digest).collect(),
                summary: VerificationSummary::from_results(results),
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {}", failure.case_name);
            }

            let json = json.or_else(|| report.as_ref().map(|p| p.with_extension("json")));
            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
            }
            if let Some(json_path) = json {
                std::fs::write(&json_path, report_doc.to_json())?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            capacity,
            args,
            stream,
        } => {
            let inputs = FixtureInputs {
                format,
                capacity,
                args: args
                    .iter()
                    .map(|a| FixtureArg::parse_shorthand(a))
                    .collect::<Result<Vec<_>, HarnessError>>()?,
            };
            let function = if stream { "vswprintf" } else { "swprintf" };
            let run = execute(function, &inputs)?;
            println!("{}", run.output);
            eprintln!(
                "count={} truncated={}",
                run.count,
                run.count >= capacity
            );
        }
    }

    Ok(())
}
