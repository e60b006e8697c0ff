//! Command-line interface definition

use clap::{ArgAction, Parser};
use std::time::Duration;

/// Service Load Tester - drives virtual users against a service health endpoint
#[derive(Parser, Debug, Clone)]
#[command(name = "service-load-tester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the target service (overrides the SERVICE_URL environment variable)
    #[arg(long)]
    pub url: Option<String>,

    /// Number of concurrent virtual users
    #[arg(short = 'n', long = "vus")]
    pub virtual_users: Option<u32>,

    /// Run duration, e.g. "1m", "90s", or plain seconds
    #[arg(short, long, value_parser = parse_time_span)]
    pub duration: Option<Duration>,

    /// Pause between a virtual user's successive requests, e.g. "1s", "500ms"
    #[arg(long, value_parser = parse_time_span)]
    pub think_time: Option<Duration>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Pass/fail threshold, e.g. "p95<1000" or "fail_rate<0.1" (repeatable; replaces defaults)
    #[arg(long = "threshold", action = ArgAction::Append)]
    pub thresholds: Vec<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output (per-threshold detail, latency spread)
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print the run result as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.json && self.color {
            return Err("--json output is never colored; drop --color".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color || self.json {
            false
        } else {
            supports_color()
        }
    }
}

/// clap value parser for duration flags
fn parse_time_span(raw: &str) -> Result<Duration, String> {
    crate::models::config::parse_time_span(raw).map_err(|e| e.to_string())
}

/// Detect whether the terminal supports colored output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_from(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("slt").chain(args.iter().copied()))
    }

    #[test]
    fn test_parses_full_flag_set() {
        let cli = cli_from(&[
            "--url",
            "http://localhost:8080",
            "--vus",
            "10",
            "--duration",
            "1m",
            "--think-time",
            "1s",
            "--timeout",
            "10",
            "--threshold",
            "p95<1000",
            "--threshold",
            "fail_rate<0.1",
            "--verbose",
        ]);

        assert_eq!(cli.url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.virtual_users, Some(10));
        assert_eq!(cli.duration, Some(Duration::from_secs(60)));
        assert_eq!(cli.think_time, Some(Duration::from_secs(1)));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.thresholds.len(), 2);
        assert!(cli.verbose);
    }

    #[test]
    fn test_conflicting_color_flags_rejected() {
        let cli = cli_from(&["--color", "--no-color"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_json_with_color_rejected() {
        let cli = cli_from(&["--json", "--color"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_json_disables_colors() {
        let cli = cli_from(&["--json"]);
        assert!(!cli.use_colors());
    }

    #[test]
    fn test_short_flags() {
        let cli = cli_from(&["-n", "5", "-d", "30s", "-t", "3"]);
        assert_eq!(cli.virtual_users, Some(5));
        assert_eq!(cli.duration, Some(Duration::from_secs(30)));
        assert_eq!(cli.timeout, Some(3));
    }

    #[test]
    fn test_invalid_duration_rejected_at_parse() {
        let result = Cli::try_parse_from(["slt", "--duration", "whenever"]);
        assert!(result.is_err());
    }
}
