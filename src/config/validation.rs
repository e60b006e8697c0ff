//! Configuration validation rules and soft warnings

use crate::{
    error::Result,
    models::RunConfig,
};
use std::time::Duration;

/// Severity of a configuration warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "INFO",
            ValidationLevel::Warning => "WARNING",
        }
    }
}

/// A non-fatal configuration concern surfaced before the run starts
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            match self.level {
                ValidationLevel::Info => {
                    format!("[{}] {}", self.level.as_str().cyan(), self.message)
                }
                ValidationLevel::Warning => {
                    format!("[{}] {}", self.level.as_str().yellow().bold(), self.message)
                }
            }
        } else {
            format!("[{}] {}", self.level.as_str(), self.message)
        }
    }
}

/// Validate a configuration and collect soft warnings
///
/// Hard violations (zero virtual users, zero duration, missing target) are
/// returned as errors via `RunConfig::validate`; everything else that is
/// legal but suspicious becomes a warning for the operator.
pub fn validate_config(config: &RunConfig) -> Result<Vec<ValidationWarning>> {
    config.validate()?;

    let mut warnings = Vec::new();

    let cpu_count = num_cpus::get() as u32;
    if config.virtual_users > cpu_count * 4 {
        warnings.push(ValidationWarning::new(
            ValidationLevel::Warning,
            format!(
                "{} virtual users on {} CPUs may saturate the generator itself; results could understate target performance",
                config.virtual_users, cpu_count
            ),
        ));
    }

    if config.think_time.is_zero() {
        warnings.push(ValidationWarning::new(
            ValidationLevel::Warning,
            "Think-time is zero: virtual users will hammer the target back-to-back".to_string(),
        ));
    }

    if config.duration < Duration::from_secs(1) {
        warnings.push(ValidationWarning::new(
            ValidationLevel::Info,
            format!(
                "Very short run duration ({:?}); latency percentiles may be noisy",
                config.duration
            ),
        ));
    }

    if config.request_timeout > config.duration {
        warnings.push(ValidationWarning::new(
            ValidationLevel::Info,
            "Request timeout exceeds the run duration; slow requests can outlive the run".to_string(),
        ));
    }

    Ok(warnings)
}
