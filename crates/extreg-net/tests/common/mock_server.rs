//! Wiremock setup helpers for fetch and reachability tests

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// GET endpoint serving a registry document
pub async fn mock_registry(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// GET endpoint that fails `fail_count` times with 500, then serves `body`
pub async fn mock_flaky_registry(server: &MockServer, route: &str, fail_count: u64, body: String) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(fail_count)
        .mount(server)
        .await;

    mock_registry(server, route, body).await;
}

/// Endpoint returning a bare status for any method
pub async fn mock_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(path(route.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// HEAD endpoint answering with a fixed status
pub async fn mock_head(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// HEAD endpoint answering 200 after a delay
pub async fn mock_slow_head(server: &MockServer, route: &str, delay: Duration) {
    Mock::given(method("HEAD"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(200).set_delay(delay))
        .mount(server)
        .await;
}

/// HEAD endpoint redirecting to `location`
pub async fn mock_redirect(server: &MockServer, route: &str, status: u16, location: &str) {
    Mock::given(method("HEAD"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(status).insert_header("location", location))
        .mount(server)
        .await;
}

/// Chain `/hop/0 -> /hop/1 -> ... -> /hop/{hops}` where the last hop
/// answers 200. Returns the URL of the first hop.
pub async fn mock_redirect_chain(server: &MockServer, hops: u32) -> String {
    for i in 0..hops {
        let location = format!("{}/hop/{}", server.uri(), i + 1);
        mock_redirect(server, &format!("/hop/{}", i), 302, &location).await;
    }
    mock_head(server, &format!("/hop/{}", hops), 200).await;
    format!("{}/hop/0", server.uri())
}

/// URL on a local port nothing listens on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/artifact.zip", port)
}
