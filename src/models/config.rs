//! Run configuration data model and validation

use crate::error::{AppError, Result};
use crate::models::threshold::{Comparison, Metric, Threshold};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Full configuration for one load-test run
///
/// Built once from defaults, environment, and CLI flags, then treated as
/// immutable for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Base URL of the target service (the `/health` path is appended)
    pub base_url: String,

    /// Number of concurrent virtual users
    #[serde(default = "default_virtual_users")]
    pub virtual_users: u32,

    /// Wall-clock duration of the run
    #[serde(default = "default_duration")]
    pub duration: Duration,

    /// Pause between a virtual user's successive requests
    #[serde(default = "default_think_time")]
    pub think_time: Duration,

    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Pass/fail thresholds, evaluated in order after the run
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<Threshold>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Emit the run result as JSON instead of the text report
    #[serde(default)]
    pub json_output: bool,
}

impl RunConfig {
    /// Create a configuration for the given target with default settings
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            virtual_users: default_virtual_users(),
            duration: default_duration(),
            think_time: default_think_time(),
            request_timeout: default_request_timeout(),
            thresholds: default_thresholds(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            json_output: false,
        }
    }

    /// Validate the configuration and return any errors
    ///
    /// Violations abort before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(AppError::config(
                "Target URL is required: set SERVICE_URL or pass --url",
            ));
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Target URL must use http or https: {}",
                        self.base_url
                    )));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "Invalid target URL '{}': {}",
                    self.base_url, e
                )));
            }
        }

        if self.virtual_users == 0 {
            return Err(AppError::config("Virtual user count must be at least 1"));
        }

        if self.duration.is_zero() {
            return Err(AppError::config("Run duration must be greater than zero"));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::config("Request timeout must be greater than zero"));
        }

        if self.thresholds.is_empty() {
            return Err(AppError::config(
                "At least one threshold is required (e.g. p95<1000)",
            ));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    ///
    /// `SERVICE_URL` carries the target base URL; the remaining variables
    /// mirror the CLI flags. CLI flags take precedence and are applied
    /// afterwards by the config parser.
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var("SERVICE_URL") {
            self.base_url = base_url.trim().to_string();
        }

        if let Ok(virtual_users) = std::env::var("VIRTUAL_USERS") {
            self.virtual_users = virtual_users.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid VIRTUAL_USERS value '{}': {}",
                    virtual_users, e
                ))
            })?;
        }

        if let Ok(duration) = std::env::var("DURATION") {
            self.duration = parse_time_span(&duration)
                .map_err(|e| AppError::config(format!("Invalid DURATION value '{}': {}", duration, e)))?;
        }

        if let Ok(think_time) = std::env::var("THINK_TIME") {
            self.think_time = parse_time_span(&think_time).map_err(|e| {
                AppError::config(format!("Invalid THINK_TIME value '{}': {}", think_time, e))
            })?;
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_SECONDS") {
            let secs: u64 = timeout.parse().map_err(|e| {
                AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(thresholds) = std::env::var("THRESHOLDS") {
            self.thresholds = crate::models::threshold::parse_threshold_list(&thresholds)?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid ENABLE_COLOR value '{}': {}",
                    enable_color, e
                ))
            })?;
        }

        Ok(())
    }

    /// URL of the health endpoint derived from the base URL
    pub fn health_url(&self) -> Result<url::Url> {
        let mut base = url::Url::parse(&self.base_url)?;
        // Keep any base path intact: "/svc" joins to "/svc/health", not "/health"
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let joined = base.join("health")?;
        Ok(joined)
    }
}

/// Parse a human-readable time span, accepting a bare number as seconds
///
/// `"1m"`, `"90s"`, and `"500ms"` parse via humantime; a plain `"60"` is
/// treated as 60 seconds for parity with the original script options.
pub fn parse_time_span(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    Ok(humantime::parse_duration(raw)?)
}

// Default value functions for serde
fn default_virtual_users() -> u32 {
    crate::defaults::DEFAULT_VIRTUAL_USERS
}

fn default_duration() -> Duration {
    crate::defaults::DEFAULT_DURATION
}

fn default_think_time() -> Duration {
    crate::defaults::DEFAULT_THINK_TIME
}

fn default_request_timeout() -> Duration {
    crate::defaults::DEFAULT_REQUEST_TIMEOUT
}

// Defaults match the original health-check script: 95% of requests under
// one second, fewer than 10% errors.
fn default_thresholds() -> Vec<Threshold> {
    vec![
        Threshold::new(Metric::P95, Comparison::LessThan, 1000.0),
        Threshold::new(Metric::FailRate, Comparison::LessThan, 0.1),
    ]
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
