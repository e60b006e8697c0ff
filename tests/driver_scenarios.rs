//! End-to-end driver scenarios against a mock HTTP target
//!
//! These tests exercise the full request path (driver, reqwest client,
//! sample collection, threshold evaluation) against a wiremock server.

use service_load_tester::{
    client::HealthCheckClient,
    driver::LoadDriver,
    models::{RunConfig, RunStatus, SampleStatus},
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Short-run configuration pointed at the mock server
fn quick_config(base_url: &str) -> RunConfig {
    let mut config = RunConfig::new(base_url);
    config.virtual_users = 5;
    config.duration = Duration::from_millis(600);
    config.think_time = Duration::from_millis(100);
    config.request_timeout = Duration::from_secs(2);
    config
}

async fn mock_health(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn healthy_target_passes_default_thresholds() {
    let server = MockServer::start().await;
    mock_health(&server, ResponseTemplate::new(200).set_body_string("OK")).await;

    let config = quick_config(&server.uri());
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    assert_eq!(result.status, RunStatus::Passed);
    assert!(result.stats.total_requests > 0);
    assert_eq!(result.stats.failure_rate, 0.0);
    assert!(result.violated_thresholds().is_empty());
}

#[tokio::test]
async fn server_errors_fail_the_fail_rate_threshold() {
    let server = MockServer::start().await;
    mock_health(&server, ResponseTemplate::new(500)).await;

    let config = quick_config(&server.uri());
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.stats.failure_rate, 1.0);

    let violated: Vec<String> = result
        .violated_thresholds()
        .iter()
        .map(|o| o.threshold.to_string())
        .collect();
    assert!(violated.contains(&"fail_rate<0.1".to_string()));
}

#[tokio::test]
async fn unreachable_target_fails_every_threshold() {
    // Bind a server and immediately drop it so the port refuses connections
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let config = quick_config(&dead_uri);
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    assert_eq!(result.status, RunStatus::Failed);
    assert_eq!(result.stats.successful_requests, 0);
    assert!(result
        .samples
        .iter()
        .all(|s| s.status != SampleStatus::Success));

    // The p95 threshold is still evaluated: no successful samples means
    // infinite latency, so it is reported as violated alongside fail_rate
    assert_eq!(result.violated_thresholds().len(), 2);
    assert!(result.stats.p95_ms.is_infinite());
}

#[tokio::test]
async fn all_virtual_users_issue_requests() {
    let server = MockServer::start().await;
    mock_health(&server, ResponseTemplate::new(200)).await;

    let config = quick_config(&server.uri());
    let expected_vus = config.virtual_users;
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    let distinct: std::collections::HashSet<u32> = result.samples.iter().map(|s| s.vu).collect();
    assert_eq!(distinct.len() as u32, expected_vus);
}

#[tokio::test]
async fn slow_responses_trip_a_tight_latency_threshold() {
    let server = MockServer::start().await;
    mock_health(
        &server,
        ResponseTemplate::new(200).set_delay(Duration::from_millis(80)),
    )
    .await;

    let mut config = quick_config(&server.uri());
    config.thresholds = vec!["p95<10".parse().unwrap(), "fail_rate<0.1".parse().unwrap()];
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    assert_eq!(result.status, RunStatus::Failed);
    let violated: Vec<String> = result
        .violated_thresholds()
        .iter()
        .map(|o| o.threshold.to_string())
        .collect();
    assert_eq!(violated, vec!["p95<10".to_string()]);
}

#[tokio::test]
async fn timed_out_requests_are_failed_samples_not_aborts() {
    let server = MockServer::start().await;
    mock_health(
        &server,
        ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
    )
    .await;

    let mut config = quick_config(&server.uri());
    config.virtual_users = 2;
    config.request_timeout = Duration::from_millis(100);
    let client = Arc::new(HealthCheckClient::new(&config).unwrap());
    let driver = LoadDriver::new(config).unwrap();

    let result = driver.run(client).await.unwrap();

    assert_eq!(result.status, RunStatus::Failed);
    assert!(result.stats.total_requests > 0);
    assert!(result
        .samples
        .iter()
        .all(|s| s.status == SampleStatus::Timeout));
}

#[tokio::test]
async fn boundary_configs_are_rejected_before_any_request() {
    let mut zero_vus = RunConfig::new("http://localhost:1");
    zero_vus.virtual_users = 0;
    assert!(LoadDriver::new(zero_vus).is_err());

    let mut zero_duration = RunConfig::new("http://localhost:1");
    zero_duration.duration = Duration::ZERO;
    assert!(LoadDriver::new(zero_duration).is_err());
}

#[tokio::test]
async fn repeated_runs_agree_on_a_stable_target() {
    let server = MockServer::start().await;
    mock_health(&server, ResponseTemplate::new(200)).await;

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let config = quick_config(&server.uri());
        let client = Arc::new(HealthCheckClient::new(&config).unwrap());
        let driver = LoadDriver::new(config).unwrap();
        let result = driver.run(client).await.unwrap();
        assert_eq!(result.stats.failure_rate, 0.0);
        statuses.push(result.status);
    }

    assert_eq!(statuses, vec![RunStatus::Passed, RunStatus::Passed]);
}
