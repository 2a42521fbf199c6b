//! Connectivity probe tests

use std::time::Duration;

use gradia_smoke_scenarios::{ProbeError, SmokeConfig, SmokeTest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    HEALTH, LOGIN, closed_port_url, mount_health, output, smoke_for, stalled_server, start_backend,
};

#[tokio::test]
async fn healthy_server_skips_login_probe() {
    let server = start_backend().await;
    mount_health(&server).await;
    Mock::given(method("GET"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(405))
        .expect(0)
        .mount(&server)
        .await;

    let mut smoke = smoke_for(&server);
    smoke.check_connectivity().await.expect("server is reachable");
    assert!(output(smoke).is_empty());
}

#[tokio::test]
async fn health_error_status_still_counts_as_reachable() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path(HEALTH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut smoke = smoke_for(&server);
    assert!(smoke.check_connectivity().await.is_ok());
}

#[tokio::test]
async fn slow_health_falls_back_to_login_endpoint() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path(HEALTH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;

    let mut smoke = smoke_for(&server);
    assert!(smoke.check_connectivity().await.is_ok());
}

#[tokio::test]
async fn unreachable_server_prints_guidance() {
    let server_url = closed_port_url();
    let config = SmokeConfig::default().with_server_url(server_url.clone());
    let mut smoke = SmokeTest::new(config, Vec::new());

    let err = smoke.check_connectivity().await.unwrap_err();
    assert!(matches!(err, ProbeError::Unreachable { .. }), "got {err:?}");
    assert_eq!(err.to_string(), format!("cannot connect to server at {server_url}"));

    let out = output(smoke);
    assert!(out.contains(&format!("❌ Cannot connect to server at {server_url}")));
    assert!(out.contains("ℹ️  Please make sure:"));
    assert!(out.contains("1. PostgreSQL is installed and running"));
    assert!(out.contains("2. Database 'gradia_db' is created"));
    assert!(out.contains("3. Spring Boot server is running (mvn spring-boot:run)"));
}

#[tokio::test]
async fn stalled_connect_counts_as_unreachable() {
    let server = stalled_server().await;
    let mut config = SmokeConfig::default().with_server_url(server.url.clone());
    config.probe_timeout = Duration::from_millis(300);
    let mut smoke = SmokeTest::new(config, Vec::new());

    let err = smoke.check_connectivity().await.unwrap_err();
    assert!(matches!(err, ProbeError::Unreachable { .. }), "got {err:?}");

    let out = output(smoke);
    assert!(out.contains(&format!("❌ Cannot connect to server at {}", server.url)));
    assert!(out.contains("ℹ️  Please make sure:"));
}
