//! TOML configuration for the status-check runner.
//!
//! Every field has a compiled-in default, so running with no config file at
//! all targets the stock API and writes the report to the stock path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "STATUSPROBE_CONFIG";

/// Config file picked up from the working directory when present.
pub const LOCAL_CONFIG: &str = "statusprobe.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for a runner process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded runner configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.timeout_secs == 0 {
            bail!("target.timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Try to load configuration from, in order:
    /// 1. The path specified by the `STATUSPROBE_CONFIG` environment variable.
    /// 2. `./statusprobe.toml`.
    /// 3. Fall back to compiled-in defaults.
    pub fn load_or_default() -> Self {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "STATUSPROBE_CONFIG set but file could not be loaded, trying fallback"
                    );
                }
            }
        }

        let local_path = Path::new(LOCAL_CONFIG);
        if local_path.exists() {
            match Self::load(local_path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %local_path.display(),
                        error = %e,
                        "local config file exists but could not be loaded, using defaults"
                    );
                }
            }
        }

        debug!("no config file found, using compiled-in defaults");
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// The API under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL every endpoint path is appended to, e.g. `https://host/api`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pdf-export-hub-1.preview.emergentagent.com/api".to_string(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where the JSON result document is written after a run.
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/app/backend_test_results.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum tracing level (`trace`, `debug`, `info`, `warn`, `error`).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit log lines as JSON objects instead of plain text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let cfg = ProbeConfig::default();

        assert_eq!(
            cfg.target.base_url,
            "https://pdf-export-hub-1.preview.emergentagent.com/api"
        );
        assert_eq!(cfg.target.timeout(), Duration::from_secs(10));
        assert_eq!(
            cfg.report.path,
            PathBuf::from("/app/backend_test_results.json")
        );
        assert_eq!(cfg.logging.level, "warn");
        assert!(!cfg.logging.json);
    }

    #[test]
    fn test_parse_example_toml() {
        let toml_str = r#"
[target]
base_url = "http://127.0.0.1:8001/api"
timeout_secs = 3

[report]
path = "/tmp/results.json"

[logging]
level = "debug"
json = true
"#;

        let cfg: ProbeConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(cfg.target.base_url, "http://127.0.0.1:8001/api");
        assert_eq!(cfg.target.timeout_secs, 3);
        assert_eq!(cfg.report.path, PathBuf::from("/tmp/results.json"));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[target]
base_url = "http://localhost:9000/api"
"#;

        let cfg: ProbeConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(cfg.target.base_url, "http://localhost:9000/api");
        assert_eq!(cfg.target.timeout_secs, 10);
        assert_eq!(
            cfg.report.path,
            PathBuf::from("/app/backend_test_results.json")
        );
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("statusprobe.toml");
        std::fs::write(
            &path,
            r#"
[report]
path = "out/results.json"
"#,
        )
        .unwrap();

        let cfg = ProbeConfig::load(&path).unwrap();
        assert_eq!(cfg.report.path, PathBuf::from("out/results.json"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = ProbeConfig::load(Path::new("/nonexistent/path/statusprobe.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("statusprobe.toml");
        std::fs::write(&path, "[target]\ntimeout_secs = 0\n").unwrap();

        let err = ProbeConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
        assert!(format!("{:#}", err).contains("timeout_secs must be at least 1"));
        assert!(ProbeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[target\nbase_url = ").unwrap();

        let err = ProbeConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}
