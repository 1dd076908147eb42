//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a client from it.

use std::io::Write;

use serde_json::json;
use storefront_core::CredentialStore;
use storefront_domain::LoginRequest;
use storefront_infra::{config, StorefrontClient};
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "api": {
                "base_url": "https://shop.example",
                "timeout_ms": 7000,
                "route_prefix": "/api/v3",
                "refresh_path": "/oauth/refresh"
            },
            "credentials": { "path": "/tmp/storefront-integration.json" },
            "logging": { "level": "storefront=debug", "json": true }
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file: {:?}", result.err());
    let config = result.unwrap();

    assert_eq!(config.api.base_url, "https://shop.example");
    assert_eq!(config.api.timeout_ms, 7000);
    assert_eq!(config.api.login_path(), "/api/v3/auth/login");
    assert_eq!(config.api.refresh_path(), "/oauth/refresh");
    assert_eq!(config.credentials.path.as_deref(), Some("/tmp/storefront-integration.json"));
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
[api]
base_url = "http://localhost:4000"
max_attempts = 2
user_agent = "storefront-tests"

[logging]
level = "warn"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");

    assert_eq!(config.api.base_url, "http://localhost:4000");
    assert_eq!(config.api.max_attempts, 2);
    assert_eq!(config.api.user_agent.as_deref(), Some("storefront-tests"));
    assert_eq!(config.api.refresh_path(), "/api/tiktak/auth/refresh");
    assert!(config.credentials.path.is_none());
    assert_eq!(config.logging.level, "warn");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_rejects_non_http_base_url() {
    let path = write_config(r#"{ "api": { "base_url": "shop.example" } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "base_url without a scheme must be rejected");

    std::fs::remove_file(path).ok();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_backed_session_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tiktak/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": { "access_token": "T1", "refresh_token": "R1" },
            "user": { "id": 9, "full_name": "Nigar", "phone": "+994551112233" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir should be created");
    let session_file = dir.path().join("session.json");
    let config_file = dir.path().join("storefront.json");
    std::fs::write(
        &config_file,
        json!({
            "api": { "base_url": server.uri() },
            "credentials": { "path": session_file.display().to_string() }
        })
        .to_string(),
    )
    .expect("config should be written");

    let config = config::load_from_file(Some(config_file)).expect("config should load");

    let first = StorefrontClient::from_config(&config).expect("client should build");
    assert!(!first.auth().restore());
    let credentials = LoginRequest { phone: "+994551112233".into(), password: "secret".into() };
    first.auth().login(&credentials).await.expect("login should succeed");
    assert!(session_file.exists());

    let second = StorefrontClient::from_config(&config).expect("client should build");
    assert!(second.auth().restore());
    assert_eq!(second.credentials().access_token().as_deref(), Some("T1"));
    assert_eq!(second.credentials().user().map(|u| u.full_name), Some("Nigar".to_string()));
}
