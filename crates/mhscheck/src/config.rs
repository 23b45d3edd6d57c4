//! Application configuration from CLI flags and environment.

use std::path::{Path, PathBuf};

use clap::Parser;

use mhscheck_core::error::HarnessError;
use mhscheck_core::options::RunOptions;

/// mhscheck — correctness harness for minimal-hitting-set algorithm services.
#[derive(Parser, Debug)]
#[command(name = "mhscheck", version, about)]
pub struct AppConfig {
    /// JSON file listing candidate algorithms and their capabilities.
    #[arg(value_name = "ALGORITHM_LIST", required_unless_present = "completion")]
    pub algorithms: Option<PathBuf>,

    /// JSON test input containing both sets and transversals.
    #[arg(value_name = "TEST_DATA", required_unless_present = "completion")]
    pub test_data: Option<PathBuf>,

    /// Destination for the JSON discrepancy report (written only on failure).
    #[arg(value_name = "ERRORS_FILE", required_unless_present = "completion")]
    pub errors_file: Option<PathBuf>,

    /// Thread counts to request from supporting algorithms.
    #[arg(short = 'j', long = "threads", value_name = "N", num_args = 0..)]
    pub thread_counts: Vec<usize>,

    /// Include slow algorithms (be careful!).
    #[arg(short, long)]
    pub slow: bool,

    /// Print verbose logs (may be used multiple times).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (summary only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Base URL for the service runtime; endpoints default to BASE_URL/name.
    #[arg(long, env = "MHSCHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout (e.g., "30s", "5m", "1h").
    #[arg(long, default_value = "5m")]
    pub timeout: String,

    /// Run invocations concurrently (reporting order is unchanged).
    #[arg(long)]
    pub parallel: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The three required input paths, present unless completion mode.
    pub fn input_paths(&self) -> Result<(&Path, &Path, &Path), HarnessError> {
        match (&self.algorithms, &self.test_data, &self.errors_file) {
            (Some(a), Some(t), Some(e)) => Ok((a, t, e)),
            _ => Err(HarnessError::Config(
                "algorithm list, test data, and errors file paths are required".to_string(),
            )),
        }
    }

    /// Run options derived from the flags.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            thread_counts: self.thread_counts.clone(),
            include_slow: self.slow,
            parallel: self.parallel,
            verbose: self.verbose > 0,
            quiet: self.quiet,
        }
    }

    /// Parse timeout string into Duration.
    #[must_use]
    pub fn timeout_duration(&self) -> std::time::Duration {
        parse_duration(&self.timeout).unwrap_or(std::time::Duration::from_secs(300))
    }
}

/// Map the `-v` count to a tracing level: warnings by default, info once,
/// debug twice or more.
#[must_use]
pub fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    }
}

/// Parse a duration string like "5m", "1h", "30s".
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 3600))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(std::time::Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_formats() {
        assert_eq!(
            parse_duration("5m"),
            Some(std::time::Duration::from_secs(300))
        );
        assert_eq!(
            parse_duration("1h"),
            Some(std::time::Duration::from_secs(3600))
        );
        assert_eq!(
            parse_duration("30s"),
            Some(std::time::Duration::from_secs(30))
        );
        assert_eq!(
            parse_duration("500ms"),
            Some(std::time::Duration::from_millis(500))
        );
        assert_eq!(parse_duration("nope"), None);
    }

    #[test]
    fn log_level_ladder() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(1), tracing::Level::INFO);
        assert_eq!(log_level(2), tracing::Level::DEBUG);
        assert_eq!(log_level(9), tracing::Level::DEBUG);
    }

    #[test]
    fn run_options_from_flags() {
        let config = <AppConfig as Parser>::try_parse_from([
            "mhscheck",
            "algs.json",
            "data.json",
            "errors.json",
            "-j",
            "1",
            "4",
            "--slow",
        ])
        .unwrap();
        let opts = config.run_options();
        assert_eq!(opts.thread_counts, vec![1, 4]);
        assert!(opts.include_slow);
        assert!(!opts.parallel);
    }

    #[test]
    fn input_paths_required_without_completion() {
        let config = <AppConfig as Parser>::try_parse_from(["mhscheck", "--completion", "bash"]);
        assert!(config.unwrap().input_paths().is_err());
    }

    #[test]
    fn positionals_required_otherwise() {
        let result = <AppConfig as Parser>::try_parse_from(["mhscheck", "algs.json"]);
        assert!(result.is_err());
    }
}
