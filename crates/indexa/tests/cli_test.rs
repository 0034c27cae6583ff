//! Integration tests for the `indexa` CLI binary.
//!
//! Argument parsing, config handling and error exits run without a backend;
//! the resource commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `indexa` binary with env isolation.
///
/// Clears all `INDEXA_*` env vars and points the config file at `config`
/// so tests never touch the user's real configuration.
fn indexa_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("indexa");
    cmd.env("HOME", "/tmp/indexa-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/indexa-cli-test-nonexistent")
        .env("INDEXA_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("INDEXA_PROFILE")
        .env_remove("INDEXA_API_URL")
        .env_remove("INDEXA_ENVIRONMENT")
        .env_remove("INDEXA_TOKEN")
        .env_remove("INDEXA_OUTPUT")
        .env_remove("INDEXA_INSECURE")
        .env_remove("INDEXA_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn scratch() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

/// Command already pointed at `server` with a token.
fn backed_cmd(config: &Path, server: &MockServer) -> assert_cmd::Command {
    let uri = server.uri();
    let mut cmd = indexa_cmd(config);
    cmd.args(["--api-url", uri.as_str(), "--token", "s3cret", "-e", "staging"]);
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, config) = scratch();
    let output = indexa_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_resources() {
    let (_dir, config) = scratch();
    indexa_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("domain-services")
            .and(predicate::str::contains("reindex-jobs"))
            .and(predicate::str::contains("events"))
            .and(predicate::str::contains("providers")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("indexa"));
}

#[test]
fn test_completions_bash() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_list_rejects_zero_page() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["ds", "list", "--page", "0"])
        .assert()
        .code(2);
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show_masks_token() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["-p", "prod", "config", "set", "api_url", "https://indexa.example.com/api"])
        .assert()
        .success();
    indexa_cmd(&config)
        .args(["-p", "prod", "config", "set", "token", "s3cret"])
        .assert()
        .success();

    indexa_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.prod]")
                .and(predicate::str::contains("https://indexa.example.com/api"))
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("s3cret").not()),
        );
}

#[test]
fn test_config_set_help_lists_flat_keys() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["config", "set", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("stale_time_secs")
                .and(predicate::str::contains("profiles.prod").not()),
        );
}

#[test]
fn test_config_use_unknown_profile_fails() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["config", "use", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_missing_api_url_points_at_init() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["ds", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No API URL configured"));
}

#[test]
fn test_explicit_unknown_profile_fails() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["-p", "ghost", "--api-url", "http://127.0.0.1:9", "ds", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'ghost' not found"));
}

#[test]
fn test_invalid_environment_is_usage_error() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args(["--api-url", "http://127.0.0.1:9", "-e", "moon", "ds", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("environment"));
}

// ── Token handling ──────────────────────────────────────────────────

#[test]
fn test_missing_token_exits_with_auth_code() {
    let (_dir, config) = scratch();
    // Port 9 is never contacted: the token check comes first.
    indexa_cmd(&config)
        .args(["--api-url", "http://127.0.0.1:9", "reindex-jobs", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("bearer token is required"));
}

#[test]
fn test_delete_without_terminal_requires_yes() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "--token",
            "s3cret",
            "ds",
            "delete",
            "ds-1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}

#[test]
fn test_create_with_missing_fields_reports_form_errors() {
    let (_dir, config) = scratch();
    indexa_cmd(&config)
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "--token",
            "s3cret",
            "ds",
            "create",
            "--name",
            "orders",
            "--base-url",
            "https://orders.internal",
            "--indexes-path-prefix",
            "orders_",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("At least one domain is required"));
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_domain_services_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(bearer_token("s3cret"))
        .and(header("X-Environment", "staging"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "ds-1", "name": "orders", "domains": ["orders.example.com"] }],
            "page": 2, "pages": 2, "size": 10, "total": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    let output = backed_cmd(&config, &server)
        .args(["-o", "json", "ds", "list", "--page", "2", "-n", "10"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["id"], "ds-1");
    assert_eq!(items[0]["domains"][0], "orders.example.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_job_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reindex-jobs/rj-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "no such job" })))
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    backed_cmd(&config, &server)
        .args(["rj", "get", "rj-404"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("reindex job 'rj-404' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_index_event_notifies_on_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/ev-1/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "queued": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    backed_cmd(&config, &server)
        .args(["events", "index", "ev-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Event indexed successfully!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_run_notifies_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reindex-jobs/rj-1/run"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "job already running" })),
        )
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    backed_cmd(&config, &server)
        .args(["rj", "run", "rj-1"])
        .assert()
        .code(6)
        .stderr(
            predicate::str::contains("Failed to run reindex job.")
                .and(predicate::str::contains("job already running")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_from_flags_prints_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/domain-services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ds-new", "name": "orders", "domains": ["a.com"], "enabled": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    backed_cmd(&config, &server)
        .args([
            "-o",
            "plain",
            "ds",
            "create",
            "--name",
            "orders",
            "-d",
            "a.com",
            "-d",
            "a.com",
            "--base-url",
            "https://orders.internal",
            "--indexes-path-prefix",
            "orders_",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("ds-new\n"))
        .stderr(predicate::str::contains("Domain service created successfully!"));

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["domains"], json!(["a.com"]));
    assert_eq!(body["enabled"], json!(true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_event_data_prints_payload_from_listed_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "ev-1", "event_type": "order.created", "event_data": { "order_id": 42 } },
                { "id": "ev-2", "event_type": "order.deleted", "event_data": { "order_id": 7 } }
            ],
            "page": 1, "pages": 1, "size": 25, "total": 2
        })))
        .expect(2)
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    let output = backed_cmd(&config, &server)
        .args(["events", "data", "ev-2"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let data: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(data, json!({ "order_id": 7 }));

    backed_cmd(&config, &server)
        .args(["events", "data", "ev-9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("event 'ev-9' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reserved_characters_in_id_stay_in_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reindex-jobs/job%23frag/run"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "job#frag", "status": "running" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = scratch();
    backed_cmd(&config, &server)
        .args(["-o", "plain", "rj", "run", "job#frag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("job#frag"));
}
