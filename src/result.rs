//! Test outcomes and the append-only log that collects them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    /// Some, but not all, of a multi-part check succeeded.
    Partial,
}

impl TestStatus {
    pub fn is_pass(self) -> bool {
        self == TestStatus::Pass
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Partial => write!(f, "PARTIAL"),
        }
    }
}

/// Outcome of one test case invocation.
#[derive(Debug, Serialize, Clone)]
pub struct TestResult {
    pub test_name: String,
    pub status: TestStatus,
    pub details: String,
    pub response_data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Counts derived from a result log at report time.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub success: bool,
}

/// Ordered, append-only collection of results. Entries are never mutated or
/// removed once recorded; iteration order is recording order.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<TestResult>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: TestResult) -> &TestResult {
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn passed(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| r.status.is_pass())
    }

    /// Everything that did not pass, PARTIAL included.
    pub fn failed(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.status.is_pass())
    }

    pub fn summary(&self) -> RunSummary {
        let passed = self.passed().count();
        let failed = self.results.len() - passed;
        RunSummary {
            total_tests: self.results.len(),
            passed,
            failed,
            success: failed == 0,
        }
    }
}
