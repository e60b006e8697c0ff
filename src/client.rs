//! HTTP health-check client and the request execution seam

use crate::error::Result;
use crate::models::config::RunConfig;
use crate::models::sample::RequestOutcome;
use async_trait::async_trait;

/// One unit of load-test work
///
/// The driver is generic over this trait: the production implementation is
/// [`HealthCheckClient`], tests substitute scripted executors. A single
/// invocation performs one request and reports its outcome; it must never
/// panic on request failure.
#[async_trait]
pub trait RequestExecutor: Send + Sync + 'static {
    /// Perform one request and report the outcome
    async fn execute(&self) -> RequestOutcome;
}

/// Health-endpoint client backed by a shared reqwest connection pool
///
/// Issues `GET {base_url}/health` with the configured per-request timeout.
/// Any received response counts as a completed work unit; the status class
/// decides success (2xx) versus failure.
#[derive(Debug, Clone)]
pub struct HealthCheckClient {
    client: reqwest::Client,
    health_url: url::Url,
}

impl HealthCheckClient {
    /// Build a client for the configured target
    pub fn new(config: &RunConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            health_url: config.health_url()?,
        })
    }

    /// The endpoint this client targets
    pub fn endpoint(&self) -> &url::Url {
        &self.health_url
    }
}

#[async_trait]
impl RequestExecutor for HealthCheckClient {
    async fn execute(&self) -> RequestOutcome {
        match self.client.get(self.health_url.clone()).send().await {
            Ok(response) => RequestOutcome::Response {
                http_status: response.status().as_u16(),
            },
            Err(e) if e.is_timeout() => RequestOutcome::TimedOut,
            Err(e) => RequestOutcome::Error {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_targets_health_endpoint() {
        let config = RunConfig::new("http://localhost:9000");
        let client = HealthCheckClient::new(&config).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:9000/health");
    }

    #[tokio::test]
    async fn test_unreachable_target_reports_error_outcome() {
        // Port 9 on localhost is expected to refuse connections
        let config = RunConfig::new("http://127.0.0.1:9");
        let client = HealthCheckClient::new(&config).unwrap();

        let outcome = client.execute().await;
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome,
            RequestOutcome::Error { .. } | RequestOutcome::TimedOut
        ));
    }
}
