//! Run summary printing and the JSON result document.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::result::{ResultLog, RunSummary, TestResult};

/// The document written after a run: summary first, then every result in
/// execution order.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub summary: RunSummary,
    pub results: &'a [TestResult],
}

impl<'a> Report<'a> {
    pub fn new(log: &'a ResultLog) -> Self {
        Self {
            summary: log.summary(),
            results: log.results(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create report directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}

/// Human-readable summary: counts, then test names bucketed by outcome.
pub fn format_summary(log: &ResultLog) -> String {
    let summary = log.summary();
    let rule = "=".repeat(60);
    let mut out = format!("\n{rule}\n📊 TEST SUMMARY\n{rule}\n");
    out.push_str(&format!("✅ Passed: {} tests\n", summary.passed));
    out.push_str(&format!("❌ Failed: {} tests\n", summary.failed));

    let passed: Vec<&TestResult> = log.passed().collect();
    if !passed.is_empty() {
        out.push_str("\n🟢 PASSED TESTS:\n");
        for r in passed {
            out.push_str(&format!("   • {}\n", r.test_name));
        }
    }

    let failed: Vec<&TestResult> = log.failed().collect();
    if !failed.is_empty() {
        out.push_str("\n🔴 FAILED TESTS:\n");
        for r in failed {
            out.push_str(&format!("   • {} ({})\n", r.test_name, r.status));
        }
    }

    out.push_str(if summary.success {
        "\n🎉 ALL TESTS PASSED\n"
    } else {
        "\n⚠️  SOME TESTS FAILED\n"
    });
    out
}
