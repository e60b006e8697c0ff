//! Error handling for the service load tester

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Custom error types for the service load tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid RunConfig, missing SERVICE_URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (malformed thresholds, bad CLI combinations)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (URLs, durations, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// HTTP request errors (network failures, transport errors)
    #[error("Request error: {0}")]
    Request(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// One or more thresholds failed after the run completed
    #[error("Threshold violation: {0}")]
    ThresholdViolation(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new request error
    pub fn request<S: Into<String>>(message: S) -> Self {
        Self::Request(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new threshold violation error
    pub fn threshold_violation<S: Into<String>>(message: S) -> Self {
        Self::ThresholdViolation(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Request(_) => "REQUEST",
            Self::Timeout(_) => "TIMEOUT",
            Self::Io(_) => "IO",
            Self::ThresholdViolation(_) => "THRESHOLD",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::Request(_) => 2,                                       // Network issues
            Self::Timeout(_) => 3,                                       // Timeout issues
            Self::Io(_) => 5,                                            // I/O issues
            Self::ThresholdViolation(_) => 6,                            // Run completed but thresholds failed
            Self::Internal(_) => 99,                                     // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Request(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::ThresholdViolation(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else {
            Self::request(error.to_string())
        }
    }
}

impl From<humantime::DurationError> for AppError {
    fn from(error: humantime::DurationError) -> Self {
        Self::parse(format!("Duration parse error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("x").category(), "CONFIG");
        assert_eq!(AppError::request("x").category(), "REQUEST");
        assert_eq!(AppError::threshold_violation("x").category(), "THRESHOLD");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("bad").exit_code(), 1);
        assert_eq!(AppError::validation("bad").exit_code(), 1);
        assert_eq!(AppError::request("down").exit_code(), 2);
        assert_eq!(AppError::timeout("slow").exit_code(), 3);
        assert_eq!(AppError::threshold_violation("p95").exit_code(), 6);
        assert_eq!(AppError::internal("bug").exit_code(), 99);
    }

    #[test]
    fn test_plain_console_format() {
        let err = AppError::config("missing SERVICE_URL");
        let formatted = err.format_for_console(false);
        assert!(formatted.starts_with("[CONFIG]"));
        assert!(formatted.contains("missing SERVICE_URL"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
