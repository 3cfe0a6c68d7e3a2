//! Registry fetcher tests against a mock HTTP server

mod common;

use common::*;
use extreg_core::types::{FetchPolicy, RegistryConfig};
use extreg_net::{FetchError, RegistryFetcher};
use wiremock::MockServer;

fn config_for(server: &MockServer) -> RegistryConfig {
    let mut config = RegistryConfig::default();
    config.github.api_url = format!("{}/api", server.uri());
    config.fetch.retry_delay_ms = 10;
    config
}

fn fetcher(config: &RegistryConfig) -> RegistryFetcher {
    RegistryFetcher::new(config).unwrap().with_token(None)
}

#[tokio::test]
async fn test_fetch_registry() {
    let server = MockServer::start().await;
    mock_registry(&server, "/registry.json", registry_json(&["a.b", "c.d"])).await;

    let registry = fetcher(&config_for(&server))
        .fetch(&format!("{}/registry.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(registry.extensions.len(), 2);
    assert_eq!(registry.extensions[0].id, "a.b");
}

#[tokio::test]
async fn test_fetch_non_2xx_fails() {
    let server = MockServer::start().await;
    mock_status(&server, "/registry.json", 404).await;

    let err = fetcher(&config_for(&server))
        .fetch(&format!("{}/registry.json", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404));
}

#[tokio::test]
async fn test_fetch_invalid_json_fails() {
    let server = MockServer::start().await;
    mock_registry(&server, "/registry.json", "<html>not json</html>".to_string()).await;

    let err = fetcher(&config_for(&server))
        .fetch(&format!("{}/registry.json", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_single_attempt_by_default() {
    let server = MockServer::start().await;
    mock_flaky_registry(&server, "/registry.json", 1, registry_json(&["a.b"])).await;

    let err = fetcher(&config_for(&server))
        .fetch(&format!("{}/registry.json", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_retry_when_configured() {
    let server = MockServer::start().await;
    mock_flaky_registry(&server, "/registry.json", 2, registry_json(&["a.b"])).await;

    let mut config = config_for(&server);
    config.fetch.max_attempts = 3;

    let registry = fetcher(&config)
        .fetch(&format!("{}/registry.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(registry.extensions.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_all_or_nothing_aborts_on_first_failure() {
    let server = MockServer::start().await;
    mock_registry(&server, "/one.json", registry_json(&["a.b"])).await;
    mock_status(&server, "/two.json", 500).await;
    mock_registry(&server, "/three.json", registry_json(&["c.d"])).await;

    let urls = vec![
        format!("{}/one.json", server.uri()),
        format!("{}/two.json", server.uri()),
        format!("{}/three.json", server.uri()),
    ];

    let err = fetcher(&config_for(&server))
        .fetch_all(&urls)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("/two.json"));
    // the third source is never requested
    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert!(!requested.contains(&"/three.json".to_string()));
}

#[tokio::test]
async fn test_best_effort_skips_failed_sources() {
    let server = MockServer::start().await;
    mock_registry(&server, "/one.json", registry_json(&["a.b"])).await;
    mock_status(&server, "/two.json", 500).await;
    mock_registry(&server, "/three.json", registry_json(&["c.d"])).await;

    let urls = vec![
        format!("{}/one.json", server.uri()),
        format!("{}/two.json", server.uri()),
        format!("{}/three.json", server.uri()),
    ];

    let fetched = fetcher(&config_for(&server))
        .with_policy(FetchPolicy::BestEffort)
        .fetch_all(&urls)
        .await
        .unwrap();

    assert_eq!(fetched.registries.len(), 2);
    assert_eq!(fetched.failures.len(), 1);
    assert!(fetched.failures[0].url.ends_with("/two.json"));

    let registries = fetched.into_registries();
    assert_eq!(registries[0].extensions[0].id, "a.b");
    assert_eq!(registries[1].extensions[0].id, "c.d");
}

#[tokio::test]
async fn test_token_only_sent_to_api_url() {
    let server = MockServer::start().await;
    mock_registry(&server, "/api/contents/registry.json", registry_json(&["a.b"])).await;
    mock_registry(&server, "/raw/registry.json", registry_json(&["c.d"])).await;

    let fetcher = RegistryFetcher::new(&config_for(&server))
        .unwrap()
        .with_token(Some("secret-token".to_string()));

    fetcher
        .fetch(&format!("{}/api/contents/registry.json", server.uri()))
        .await
        .unwrap();
    fetcher
        .fetch(&format!("{}/raw/registry.json", server.uri()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth_for = |route: &str| {
        requests
            .iter()
            .find(|r| r.url.path() == route)
            .and_then(|r| r.headers.get("authorization"))
            .map(|v| v.to_str().unwrap().to_string())
    };

    assert_eq!(
        auth_for("/api/contents/registry.json"),
        Some("Bearer secret-token".to_string())
    );
    assert_eq!(auth_for("/raw/registry.json"), None);
}
