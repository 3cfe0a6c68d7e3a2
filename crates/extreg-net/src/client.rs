//! HTTP client construction

use extreg_core::types::NetworkConfig;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

/// Client for fetching registry documents; follows redirects itself
pub fn fetch_client(network: &NetworkConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(&network.user_agent)
        .timeout(network.timeout())
        .redirect(Policy::limited(network.max_redirects as usize))
        .build()
}

/// Client for reachability probes
///
/// Redirects are never followed by the client so every hop gets its own
/// timeout and the redirect limit can be reported precisely.
pub fn probe_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none())
        .build()
}

/// Render an error with its source chain, e.g.
/// `error sending request: connection refused`
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
