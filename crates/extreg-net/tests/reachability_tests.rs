//! Reachability checker and pool tests against a mock HTTP server

mod common;

use common::*;
use extreg_net::{ReachabilityChecker, ReachabilityError, ReachabilityJob, ReachabilityPool};
use std::time::Duration;
use wiremock::MockServer;

fn checker() -> ReachabilityChecker {
    ReachabilityChecker::with_limits(TEST_USER_AGENT, DEFAULT_TIMEOUT, MAX_REDIRECTS).unwrap()
}

#[tokio::test]
async fn test_direct_200() {
    let server = MockServer::start().await;
    mock_head(&server, "/a.zip", 200).await;

    let probe = checker()
        .check(&format!("{}/a.zip", server.uri()))
        .await
        .unwrap();

    assert_eq!(probe.status, 200);
    assert_eq!(probe.redirects, 0);
    assert!(probe.is_reachable());
}

#[tokio::test]
async fn test_302_then_200_reports_200() {
    let server = MockServer::start().await;
    let final_url = format!("{}/final.zip", server.uri());
    mock_redirect(&server, "/start.zip", 302, &final_url).await;
    mock_head(&server, "/final.zip", 200).await;

    let probe = checker()
        .check(&format!("{}/start.zip", server.uri()))
        .await
        .unwrap();

    assert_eq!(probe.status, 200);
    assert_eq!(probe.redirects, 1);
    assert_eq!(probe.final_url, final_url);
}

#[tokio::test]
async fn test_relative_location_is_resolved() {
    let server = MockServer::start().await;
    mock_redirect(&server, "/releases/latest", 301, "/releases/v2/a.zip").await;
    mock_head(&server, "/releases/v2/a.zip", 200).await;

    let probe = checker()
        .check(&format!("{}/releases/latest", server.uri()))
        .await
        .unwrap();

    assert_eq!(probe.status, 200);
    assert!(probe.final_url.ends_with("/releases/v2/a.zip"));
}

#[tokio::test]
async fn test_every_redirect_status_is_followed() {
    for status in [301u16, 302, 303, 307, 308] {
        let server = MockServer::start().await;
        let target = format!("{}/target", server.uri());
        mock_redirect(&server, "/source", status, &target).await;
        mock_head(&server, "/target", 200).await;

        let probe = checker()
            .check(&format!("{}/source", server.uri()))
            .await
            .unwrap();
        assert_eq!(probe.status, 200, "status {} was not followed", status);
    }
}

#[tokio::test]
async fn test_redirect_without_location_is_final() {
    let server = MockServer::start().await;
    mock_head(&server, "/moved", 302).await;

    let probe = checker()
        .check(&format!("{}/moved", server.uri()))
        .await
        .unwrap();

    assert_eq!(probe.status, 302);
    assert!(!probe.is_reachable());
}

#[tokio::test]
async fn test_not_found_is_a_status_not_an_error() {
    let server = MockServer::start().await;
    mock_head(&server, "/gone.zip", 404).await;

    let probe = checker()
        .check(&format!("{}/gone.zip", server.uri()))
        .await
        .unwrap();

    assert_eq!(probe.status, 404);
    assert!(!probe.is_reachable());
}

#[tokio::test]
async fn test_exactly_max_redirects_succeeds() {
    let server = MockServer::start().await;
    let start = mock_redirect_chain(&server, MAX_REDIRECTS).await;

    let probe = checker().check(&start).await.unwrap();
    assert_eq!(probe.status, 200);
    assert_eq!(probe.redirects, MAX_REDIRECTS);
}

#[tokio::test]
async fn test_too_many_redirects() {
    let server = MockServer::start().await;
    let start = mock_redirect_chain(&server, MAX_REDIRECTS + 1).await;

    let err = checker().check(&start).await.unwrap_err();
    assert_eq!(
        err,
        ReachabilityError::TooManyRedirects {
            url: start,
            limit: MAX_REDIRECTS
        }
    );
}

#[tokio::test]
async fn test_redirect_loop() {
    let server = MockServer::start().await;
    let loop_url = format!("{}/loop", server.uri());
    mock_redirect(&server, "/loop", 307, &loop_url).await;

    let err = checker().check(&loop_url).await.unwrap_err();
    assert!(matches!(err, ReachabilityError::TooManyRedirects { .. }));
}

#[tokio::test]
async fn test_timeout_is_distinguishable() {
    let server = MockServer::start().await;
    mock_slow_head(&server, "/slow.zip", Duration::from_secs(3)).await;

    let checker =
        ReachabilityChecker::with_limits(TEST_USER_AGENT, SHORT_TIMEOUT, MAX_REDIRECTS).unwrap();
    let err = checker
        .check(&format!("{}/slow.zip", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ReachabilityError::Timeout { after, .. } if after == SHORT_TIMEOUT),
        "expected timeout, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let err = checker().check(&closed_port_url()).await.unwrap_err();
    assert!(
        matches!(err, ReachabilityError::Network { .. }),
        "expected network error, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_pool_keeps_job_order() {
    let server = MockServer::start().await;
    mock_slow_head(&server, "/slow", Duration::from_millis(300)).await;
    mock_head(&server, "/fast", 200).await;
    mock_head(&server, "/missing", 404).await;

    let jobs = vec![
        ReachabilityJob::new(("a.b", "1.0.0"), format!("{}/slow", server.uri())),
        ReachabilityJob::new(("a.b", "2.0.0"), format!("{}/fast", server.uri())),
        ReachabilityJob::new(("c.d", "0.1.0"), format!("{}/missing", server.uri())),
        ReachabilityJob::new(("c.d", "0.2.0"), closed_port_url()),
    ];

    let pool = ReachabilityPool::new(checker(), 2);
    let results = pool.run(jobs).await;

    let keys: Vec<_> = results.iter().map(|r| r.key).collect();
    assert_eq!(
        keys,
        vec![
            ("a.b", "1.0.0"),
            ("a.b", "2.0.0"),
            ("c.d", "0.1.0"),
            ("c.d", "0.2.0")
        ]
    );
    assert!(results[0].is_reachable());
    assert!(results[1].is_reachable());
    assert!(!results[2].is_reachable());
    assert!(matches!(
        results[3].outcome,
        Err(ReachabilityError::Network { .. })
    ));
}

#[tokio::test]
async fn test_pool_empty() {
    let pool = ReachabilityPool::new(checker(), 8);
    let results = pool.run(Vec::<ReachabilityJob<usize>>::new()).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_pool_zero_concurrency_still_runs() {
    let server = MockServer::start().await;
    mock_head(&server, "/a", 200).await;

    let pool = ReachabilityPool::new(checker(), 0);
    assert_eq!(pool.concurrency(), 1);

    let results = pool
        .run(vec![ReachabilityJob::new(0usize, format!("{}/a", server.uri()))])
        .await;
    assert!(results[0].is_reachable());
}
