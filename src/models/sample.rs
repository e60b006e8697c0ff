//! Per-request sample data models

use serde::{Deserialize, Serialize};
use std::time::Duration;
use chrono::{DateTime, Utc};

/// Outcome reported by a single invocation of the request function
///
/// The driver wraps this with timing information to build a [`RequestSample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A response was received; status class decides success vs failure
    Response { http_status: u16 },
    /// The request timed out before a response arrived
    TimedOut,
    /// The request failed at the transport level (connection refused, DNS, etc.)
    Error { message: String },
}

impl RequestOutcome {
    /// Whether this outcome counts as a successful request (2xx response)
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Response { http_status } if (200..300).contains(http_status))
    }
}

/// Request execution status recorded on a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleStatus {
    /// Request completed with a 2xx response
    Success,
    /// Request failed (non-2xx response or transport error)
    Failed,
    /// Request timed out
    Timeout,
}

/// A single request measurement taken by one virtual user
///
/// Created once per request, immutable, and appended to the run's shared
/// result log. Every sample belongs to exactly one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSample {
    /// Index of the virtual user that issued the request (0-based)
    pub vu: u32,

    /// Timestamp when the request was issued
    pub started_at: DateTime<Utc>,

    /// Wall-clock time from issuing the request to completion
    pub duration: Duration,

    /// Execution status
    pub status: SampleStatus,

    /// HTTP status code received, if a response arrived
    pub http_status: Option<u16>,

    /// Error message if the request failed
    pub error_message: Option<String>,
}

impl RequestSample {
    /// Build a sample from a request outcome and its measured duration
    pub fn from_outcome(
        vu: u32,
        started_at: DateTime<Utc>,
        duration: Duration,
        outcome: RequestOutcome,
    ) -> Self {
        match outcome {
            RequestOutcome::Response { http_status } => {
                let status = if (200..300).contains(&http_status) {
                    SampleStatus::Success
                } else {
                    SampleStatus::Failed
                };
                let error_message = if status == SampleStatus::Failed {
                    Some(format!("HTTP status {}", http_status))
                } else {
                    None
                };
                Self {
                    vu,
                    started_at,
                    duration,
                    status,
                    http_status: Some(http_status),
                    error_message,
                }
            }
            RequestOutcome::TimedOut => Self {
                vu,
                started_at,
                duration,
                status: SampleStatus::Timeout,
                http_status: None,
                error_message: Some(format!(
                    "Request timed out after {:.1}s",
                    duration.as_secs_f64()
                )),
            },
            RequestOutcome::Error { message } => Self {
                vu,
                started_at,
                duration,
                status: SampleStatus::Failed,
                http_status: None,
                error_message: Some(message),
            },
        }
    }

    /// Check if this request was successful
    pub fn is_successful(&self) -> bool {
        self.status == SampleStatus::Success
    }

    /// Request duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_for(outcome: RequestOutcome) -> RequestSample {
        RequestSample::from_outcome(0, Utc::now(), Duration::from_millis(50), outcome)
    }

    #[test]
    fn test_2xx_response_is_success() {
        let sample = sample_for(RequestOutcome::Response { http_status: 200 });
        assert!(sample.is_successful());
        assert_eq!(sample.http_status, Some(200));
        assert!(sample.error_message.is_none());
    }

    #[test]
    fn test_204_counts_as_success() {
        let sample = sample_for(RequestOutcome::Response { http_status: 204 });
        assert!(sample.is_successful());
    }

    #[test]
    fn test_non_2xx_response_is_failure() {
        let sample = sample_for(RequestOutcome::Response { http_status: 500 });
        assert!(!sample.is_successful());
        assert_eq!(sample.status, SampleStatus::Failed);
        assert_eq!(sample.error_message.as_deref(), Some("HTTP status 500"));
    }

    #[test]
    fn test_3xx_response_is_failure() {
        let sample = sample_for(RequestOutcome::Response { http_status: 301 });
        assert!(!sample.is_successful());
    }

    #[test]
    fn test_transport_error_is_failure() {
        let sample = sample_for(RequestOutcome::Error {
            message: "connection refused".to_string(),
        });
        assert_eq!(sample.status, SampleStatus::Failed);
        assert_eq!(sample.http_status, None);
        assert_eq!(sample.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_timeout_status() {
        let sample = sample_for(RequestOutcome::TimedOut);
        assert_eq!(sample.status, SampleStatus::Timeout);
        assert!(!sample.is_successful());
    }

    #[test]
    fn test_duration_ms() {
        let sample = sample_for(RequestOutcome::Response { http_status: 200 });
        assert_eq!(sample.duration_ms(), 50.0);
    }
}
