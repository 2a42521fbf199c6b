//! End-to-end runs of the fixed sequence against a mock backend

use gradia_smoke_scenarios::{ProbeError, SmokeConfig, SmokeTest};
use gradia_smoke_types::{Outcome, Scenario};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    LOGIN, PROFILE, REGISTER, auth_body, closed_port_url, error_body, mount_health, mount_login,
    mount_register, mount_wrong_login, output, profile_body, smoke_for, start_backend,
};

async fn mount_profile_endpoints(server: &MockServer, token: &str, expected_calls: u64) {
    let bearer = format!("Bearer {token}");
    Mock::given(method("POST"))
        .and(path(PROFILE))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(PROFILE))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_rejecting_wrong_login(server: &MockServer) {
    mount_wrong_login(
        server,
        ResponseTemplate::new(401).set_body_json(error_body("Invalid email or password")),
    )
    .await;
}

#[tokio::test]
async fn fresh_account_runs_every_scenario_but_login() {
    let server = start_backend().await;
    mount_health(&server).await;
    mount_register(&server, ResponseTemplate::new(200).set_body_json(auth_body("abc", false))).await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(auth_body("unused", false))).await;
    mount_profile_endpoints(&server, "abc", 1).await;
    mount_rejecting_wrong_login(&server).await;

    let mut smoke = smoke_for(&server);
    let report = smoke.run().await.expect("run completes");

    assert_eq!(
        report.entries(),
        &[
            (Scenario::Registration, Outcome::Passed),
            (Scenario::CreateProfile, Outcome::Passed),
            (Scenario::GetProfile, Outcome::Passed),
            (Scenario::InvalidLogin, Outcome::Passed),
        ]
    );
    assert_eq!(report.outcome(Scenario::Login), None);

    let out = output(smoke);
    assert!(out.starts_with(&format!("\n{}\n  Gradia Backend API Testing\n", "=".repeat(60))));
    assert!(!out.contains("Test 2: Candidate Login"));
    assert!(out.contains("Testing Complete"));
    assert!(out.trim_end().ends_with("✅ All tests executed!"));
}

#[tokio::test]
async fn existing_account_falls_back_to_login() {
    let server = start_backend().await;
    mount_health(&server).await;
    mount_register(
        &server,
        ResponseTemplate::new(400).set_body_json(error_body("Email already registered")),
    )
    .await;
    mount_login(&server, ResponseTemplate::new(200).set_body_json(auth_body("from-login", true))).await;
    mount_profile_endpoints(&server, "from-login", 1).await;
    mount_rejecting_wrong_login(&server).await;

    let mut smoke = smoke_for(&server);
    let report = smoke.run().await.expect("run completes");

    assert_eq!(report.outcome(Scenario::Registration), Some(Outcome::Failed));
    assert_eq!(report.outcome(Scenario::Login), Some(Outcome::Passed));
    assert_eq!(report.outcome(Scenario::CreateProfile), Some(Outcome::Passed));
    assert_eq!(report.outcome(Scenario::GetProfile), Some(Outcome::Passed));
    assert_eq!(report.outcome(Scenario::InvalidLogin), Some(Outcome::Passed));

    let out = output(smoke);
    let register_at = out.find("Test 1: Candidate Registration").unwrap();
    let login_at = out.find("Test 2: Candidate Login").unwrap();
    let profile_at = out.find("Test 3: Create/Update Profile").unwrap();
    assert!(register_at < login_at && login_at < profile_at);
}

#[tokio::test]
async fn no_token_skips_profile_scenarios() {
    let server = start_backend().await;
    mount_health(&server).await;
    mount_register(&server, ResponseTemplate::new(500).set_body_string("boom")).await;
    mount_login(&server, ResponseTemplate::new(401).set_body_json(error_body("nope"))).await;
    Mock::given(path(PROFILE))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_rejecting_wrong_login(&server).await;

    let mut smoke = smoke_for(&server);
    let report = smoke.run().await.expect("failed scenarios do not abort the run");

    assert_eq!(report.outcome(Scenario::CreateProfile), Some(Outcome::Skipped));
    assert_eq!(report.outcome(Scenario::GetProfile), Some(Outcome::Skipped));
    assert_eq!(report.outcome(Scenario::InvalidLogin), Some(Outcome::Passed));
    assert_eq!(report.count(Outcome::Failed), 2);

    let out = output(smoke);
    assert!(out.contains("❌ Cannot proceed with profile tests without authentication token"));
    assert!(!out.contains("Test 3: Create/Update Profile"));
    assert!(out.contains("Test 5: Invalid Login (Negative Test)"));
    assert!(out.contains("All tests executed!"));
}

#[tokio::test]
async fn accepted_wrong_password_is_flagged_but_run_completes() {
    let server = start_backend().await;
    mount_health(&server).await;
    mount_register(&server, ResponseTemplate::new(200).set_body_json(auth_body("abc", false))).await;
    mount_profile_endpoints(&server, "abc", 1).await;
    mount_wrong_login(&server, ResponseTemplate::new(200).set_body_json(auth_body("leak", false))).await;

    let mut smoke = smoke_for(&server);
    let report = smoke.run().await.expect("run completes");

    assert_eq!(report.outcome(Scenario::InvalidLogin), Some(Outcome::Failed));
    assert!(output(smoke).contains("❌ Unexpected response (HTTP 200)"));
}

#[tokio::test]
async fn unreachable_server_stops_before_any_scenario() {
    let config = SmokeConfig::default().with_server_url(closed_port_url());
    let mut smoke = SmokeTest::new(config, Vec::new());

    let err = smoke.run().await.unwrap_err();
    assert!(matches!(err, ProbeError::Unreachable { .. }));

    let out = output(smoke);
    assert!(out.contains("Gradia Backend API Testing"));
    assert!(out.contains("Please make sure:"));
    assert!(!out.contains("Test 1"));
    assert!(!out.contains("Testing Complete"));
}

#[tokio::test]
async fn registration_and_login_hit_expected_paths() {
    let server = start_backend().await;
    mount_health(&server).await;
    Mock::given(method("POST"))
        .and(path(REGISTER))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let mut smoke = smoke_for(&server);
    let report = smoke.run().await.expect("run completes");
    assert_eq!(report.outcome(Scenario::InvalidLogin), Some(Outcome::Passed));
}
