//! Wiremock setup helpers

use extreg_core::Registry;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// GET endpoint serving a registry document
pub async fn mock_registry(server: &MockServer, route: &str, registry: &Registry) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry))
        .mount(server)
        .await;
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

/// HEAD endpoint redirecting to `location`
pub async fn mock_redirect(server: &MockServer, route: &str, status: u16, location: &str) {
    Mock::given(method("HEAD"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(status).insert_header("location", location))
        .mount(server)
        .await;
}
