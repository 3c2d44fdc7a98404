//! Sequential test runner.

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::cases::Case;
use crate::client::ApiClient;
use crate::config::TargetConfig;
use crate::result::{ResultLog, RunSummary, TestResult, TestStatus};

/// Runs the declared cases one after another against a single API and owns
/// the log their outcomes are recorded in.
pub struct Runner {
    api: ApiClient,
    log: ResultLog,
    quiet: bool,
}

impl Runner {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            log: ResultLog::new(),
            quiet: false,
        }
    }

    pub fn from_config(target: &TargetConfig) -> Result<Self> {
        let api = ApiClient::new(&target.base_url, target.timeout())
            .context("failed to build HTTP client")?;
        Ok(Self::new(api))
    }

    /// Suppress per-test lines on stdout. Results are still recorded.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    pub fn into_log(self) -> ResultLog {
        self.log
    }

    /// Record one outcome and echo it.
    pub fn log_result(
        &mut self,
        test_name: &str,
        status: TestStatus,
        details: &str,
        response_data: Option<Value>,
    ) -> &TestResult {
        info!(test = test_name, %status, "test finished");
        let quiet = self.quiet;
        let result = self.log.record(TestResult {
            test_name: test_name.to_string(),
            status,
            details: details.to_string(),
            response_data,
            timestamp: Utc::now(),
        });

        if !quiet {
            let icon = match status {
                TestStatus::Pass => "✅",
                TestStatus::Partial => "⚠️ ",
                TestStatus::Fail => "❌",
            };
            println!("{} {}: {}", icon, result.test_name, result.status);
            if !status.is_pass() && !result.details.is_empty() {
                println!("   Details: {}", result.details);
            }
        }
        result
    }

    pub async fn run_case(&mut self, case: Case) -> &TestResult {
        info!(test = case.name(), "running test");
        let outcome = case.execute(&self.api).await;
        self.log_result(
            case.name(),
            outcome.status,
            &outcome.details,
            outcome.response_data,
        )
    }

    /// Execute every declared case exactly once, in order, whatever the
    /// earlier outcomes were.
    pub async fn run_all_tests(&mut self) -> RunSummary {
        if !self.quiet {
            println!("🚀 Starting backend status checks");
            println!("🔗 Testing API at: {}", self.api.base_url());
            println!("{}", "-".repeat(60));
        }

        for case in Case::ALL {
            self.run_case(case).await;
        }

        let summary = self.log.summary();
        info!(
            total = summary.total_tests,
            passed = summary.passed,
            failed = summary.failed,
            "run complete"
        );
        summary
    }
}
