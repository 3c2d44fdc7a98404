use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use statusprobe::config::{LoggingConfig, ProbeConfig};

#[derive(Parser)]
#[command(
    name = "statusprobe",
    about = "Black-box integration checks for status-check HTTP APIs",
    version,
    long_about = None
)]
struct Cli {
    /// TOML config file (default: $STATUSPROBE_CONFIG, then ./statusprobe.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the API under test, e.g. https://host/api
    #[arg(long)]
    base_url: Option<String>,

    /// Path the JSON report is written to
    #[arg(long)]
    output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Print the JSON report to stdout instead of the human summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ProbeConfig> {
        let mut config = match &self.config {
            Some(path) => ProbeConfig::load(path)?,
            None => ProbeConfig::load_or_default(),
        };
        if let Some(base_url) = &self.base_url {
            config.target.base_url = base_url.clone();
        }
        if let Some(output) = &self.output {
            config.report.path = output.clone();
        }
        if let Some(timeout) = self.timeout {
            config.target.timeout_secs = timeout;
        }
        Ok(config)
    }
}

fn env_filter(default_level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
}

/// Scoped subscriber for config loading, before the configured one exists.
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&LoggingConfig::default().level))
        .with_writer(std::io::stderr)
        .finish()
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = env_filter(&logging.level);
    // stdout carries the test lines and summary; logs go to stderr.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || cli.load_config())?;
    init_tracing(&config.logging);

    let summary = statusprobe::run(&config, cli.json).await?;

    Ok(if summary.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
