//! End-to-end tests for the userdesk binary
//!
//! These tests run the real binary against a mock backend:
//! - users and profile subcommands
//! - --field / --data payload building
//! - avatar upload as multipart
//! - exit codes and error output

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_json, body_string_contains, header_regex, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Helper to create a mock user response
fn mock_user(id: u64, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "email": null,
        "first_name": "",
        "last_name": "",
        "date_joined": "2026-01-18T10:00:00Z",
        "is_staff": false,
        "userprofile": null
    })
}

fn userdesk(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("userdesk").unwrap();
    cmd.arg("--server-url")
        .arg(server.uri())
        .env("LOG_LEVEL", "error")
        .env_remove("USERDESK_API_PREFIX")
        .env_remove("USERDESK_NORMALIZE_EMPTY");
    cmd
}

#[tokio::test]
async fn test_users_list_prints_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .and(query_param("search", "ali"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mock_user(1, "alice")])))
        .mount(&server)
        .await;

    userdesk(&server)
        .args(["users", "list", "--param", "search=ali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"alice\""));
}

#[tokio::test]
async fn test_users_get_missing_fails_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/999/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "user not found"})))
        .mount(&server)
        .await;

    userdesk(&server)
        .args(["users", "get", "999"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("404"))
        .stderr(predicate::str::contains("user not found"));
}

#[tokio::test]
async fn test_users_create_normalizes_empty_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/"))
        .and(body_json(json!({
            "username": "alice",
            "password": "s3cretpass",
            "email": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(mock_user(1, "alice")))
        .expect(1)
        .mount(&server)
        .await;

    userdesk(&server)
        .args([
            "users",
            "create",
            "--data",
            r#"{"username": "alice", "password": "s3cretpass"}"#,
            "--field",
            "email=",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_users_create_no_normalize_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/"))
        .and(body_json(json!({"username": "alice", "email": ""})))
        .respond_with(ResponseTemplate::new(201).set_body_json(mock_user(1, "alice")))
        .expect(1)
        .mount(&server)
        .await;

    userdesk(&server)
        .args([
            "--no-normalize",
            "users",
            "create",
            "--field",
            "username=alice",
            "--field",
            "email=",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_users_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    userdesk(&server)
        .args(["users", "delete", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted user 4"));
}

#[tokio::test]
async fn test_profile_update_with_avatar_uploads_multipart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let avatar = dir.path().join("me.jpg");
    fs::write(&avatar, "jpeg-bytes").unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/users/1/profile/"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(r#"filename="me.jpg""#))
        .and(body_string_contains("Content-Type: image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "bio": "hi",
            "avatar": "/media/avatars/me.jpg",
            "user_id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    userdesk(&server)
        .args(["profile", "update", "1", "--field", "bio=hi", "--avatar"])
        .arg(&avatar)
        .assert()
        .success()
        .stdout(predicate::str::contains("/media/avatars/me.jpg"));
}

#[tokio::test]
async fn test_profile_update_missing_avatar_file() {
    let server = MockServer::start().await;

    userdesk(&server)
        .args([
            "profile",
            "update",
            "1",
            "--avatar",
            "/no/such/dir/avatar.png",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read attachment"));
}

#[tokio::test]
async fn test_unreachable_server() {
    let mut cmd = Command::cargo_bin("userdesk").unwrap();
    cmd.args(["--server-url", "http://127.0.0.1:9", "users", "list"])
        .env("LOG_LEVEL", "error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ensure the server is running"));
}

#[test]
fn test_server_url_without_scheme() {
    let mut cmd = Command::cargo_bin("userdesk").unwrap();
    cmd.args(["--server-url", "localhost:8000", "users", "list"])
        .env("LOG_LEVEL", "error")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid server URL 'localhost:8000'"))
        .stderr(predicate::str::contains("Ensure the server is running").not());
}

#[tokio::test]
async fn test_unusable_log_dir_warns_and_still_runs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("logs");
    fs::write(&not_a_dir, "occupied").unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/users/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    userdesk(&server)
        .env("LOG_OUTPUT", "file")
        .env("LOG_DIR", &not_a_dir)
        .args(["users", "delete", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted user 4"))
        .stderr(predicate::str::contains(
            "Warning: Failed to create log directory; continuing without logging",
        ));
}

#[test]
fn test_bad_field_syntax() {
    let mut cmd = Command::cargo_bin("userdesk").unwrap();
    cmd.args([
        "--server-url",
        "http://127.0.0.1:9",
        "users",
        "create",
        "--field",
        "nokey",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected KEY=VALUE"));
}
