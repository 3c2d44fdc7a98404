//! statusprobe -- black-box integration checks for status-check HTTP APIs.
//!
//! This crate provides the HTTP client, the declared test cases, the runner
//! that executes them in order, and the summary/report output.

pub mod cases;
pub mod client;
pub mod config;
pub mod report;
pub mod result;
pub mod runner;

use anyhow::Result;

use crate::config::ProbeConfig;
use crate::report::Report;
use crate::result::RunSummary;
use crate::runner::Runner;

/// Run every test case against the configured target, print the summary,
/// and write the JSON report. With `json` set, the report document goes to
/// stdout instead of the per-test lines and summary.
pub async fn run(config: &ProbeConfig, json: bool) -> Result<RunSummary> {
    tracing::info!(base_url = %config.target.base_url, "Starting test run");
    let mut runner = Runner::from_config(&config.target)?.quiet(json);
    let summary = runner.run_all_tests().await;

    let log = runner.into_log();
    let report = Report::new(&log);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report::format_summary(&log));
    }
    report.write(&config.report.path)?;

    Ok(summary)
}
