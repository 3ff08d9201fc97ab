//! Integration tests for login/logout commands.

use std::fs;
use std::io::Write;
use std::process::Stdio;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pokedex() -> std::process::Command {
    std::process::Command::cargo_bin("pokedex").unwrap()
}

/// Test: login posts the credentials and stores both tokens.
#[tokio::test]
async fn test_login_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({
            "userEmail": "ash@example.com",
            "password": "pikachu"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();
    let tokens_path = temp.path().join("tokens.json");

    // Password arrives via stdin.
    let mut child = pokedex()
        .env("POKEDEX_HOME", temp.path())
        .env("POKEDEX_BASE_URL", server.uri())
        .arg("login")
        .arg("--email")
        .arg("ash@example.com")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin
            .write_all(b"pikachu\n")
            .expect("Failed to write to stdin");
    }

    let output = child.wait_with_output().expect("Failed to read output");
    assert!(output.status.success(), "Command failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Logged in as ash@example.com"),
        "Should show success message"
    );

    assert!(tokens_path.exists(), "tokens.json should exist");
    let contents = fs::read_to_string(&tokens_path).unwrap();
    assert!(contents.contains("access-1"));
    assert!(contents.contains("refresh-1"));
}

/// Test: rejected credentials fail with the login error message and store
/// nothing.
#[tokio::test]
async fn test_login_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .env("POKEDEX_BASE_URL", server.uri())
        .arg("login")
        .arg("--email")
        .arg("ash@example.com")
        .arg("--password")
        .arg("wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));

    let contents = fs::read_to_string(temp.path().join("tokens.json")).unwrap_or_default();
    assert!(!contents.contains("access"), "No tokens should be stored");
}

/// Test: login rejects an empty password without touching the network.
#[test]
fn test_login_rejects_empty_password() {
    let temp = tempdir().unwrap();

    let mut child = pokedex()
        .env("POKEDEX_HOME", temp.path())
        .arg("login")
        .arg("--email")
        .arg("ash@example.com")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin.write_all(b"\n").expect("Failed to write to stdin");
    }

    let output = child.wait_with_output().expect("Failed to read output");
    assert!(!output.status.success(), "Should fail with empty password");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Password must not be empty"),
        "Should mention the empty password"
    );
}

/// Test: logout removes the access token but keeps the refresh token.
#[test]
fn test_logout_keeps_refresh_token() {
    let temp = tempdir().unwrap();
    let tokens_path = temp.path().join("tokens.json");
    fs::write(
        &tokens_path,
        r#"{"access_token": "access-1", "refresh_token": "refresh-1"}"#,
    )
    .unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    let contents = fs::read_to_string(&tokens_path).unwrap();
    assert!(
        !contents.contains("access-1"),
        "Access token should be removed"
    );
    assert!(
        contents.contains("refresh-1"),
        "Refresh token should survive logout"
    );
}

/// Test: logout without a session reports it.
#[test]
fn test_logout_when_not_logged_in() {
    let temp = tempdir().unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session."));
}

/// Test: tokens.json has restricted permissions on Unix.
#[cfg(unix)]
#[tokio::test]
async fn test_token_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1"
        })))
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .env("POKEDEX_BASE_URL", server.uri())
        .arg("login")
        .arg("--email")
        .arg("ash@example.com")
        .arg("--password")
        .arg("pikachu")
        .assert()
        .success();

    let metadata = fs::metadata(temp.path().join("tokens.json")).unwrap();
    assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
}

/// Test: config set-url persists and config show reads it back.
#[test]
fn test_config_set_url_roundtrip() {
    let temp = tempdir().unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .args(["config", "set-url", "https://api.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url set to"));

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .env_remove("POKEDEX_BASE_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.example.com"));
}

/// Test: an invalid URL is rejected.
#[test]
fn test_config_set_url_rejects_garbage() {
    let temp = tempdir().unwrap();

    pokedex()
        .env("POKEDEX_HOME", temp.path())
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
