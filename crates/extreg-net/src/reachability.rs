//! Live artifact reachability
//!
//! A check issues `HEAD` and follows 301/302/303/307/308 responses that carry
//! a `Location` header, up to a fixed number of hops. Only a final status of
//! exactly 200 counts as reachable. Timeouts, transport errors and an
//! exhausted redirect budget are reported as distinct errors.

use extreg_core::types::NetworkConfig;
use reqwest::header::LOCATION;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::client::{error_chain, probe_client};

/// Status codes treated as redirects when a `Location` header is present
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// Why a reachability check produced no final status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReachabilityError {
    #[error("Too many redirects (more than {limit}) for {url}")]
    TooManyRedirects { url: String, limit: u32 },

    #[error("Timeout after {}ms for {url}", .after.as_millis())]
    Timeout { url: String, after: Duration },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Invalid redirect location '{location}' from {url}")]
    InvalidLocation { url: String, location: String },
}

/// Final answer of a completed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Status of the last hop
    pub status: u16,

    /// URL that produced `status`
    pub final_url: String,

    /// Redirects followed to get there
    pub redirects: u32,
}

impl Probe {
    /// Reachable means exactly 200 after redirects
    pub fn is_reachable(&self) -> bool {
        self.status == 200
    }
}

/// Issues HEAD requests and follows redirects by hand
pub struct ReachabilityChecker {
    client: Client,
    timeout: Duration,
    max_redirects: u32,
}

impl ReachabilityChecker {
    /// Create a checker using the configured timeout and redirect limit
    pub fn new(network: &NetworkConfig) -> reqwest::Result<Self> {
        Self::with_limits(&network.user_agent, network.timeout(), network.max_redirects)
    }

    /// Create a checker with explicit limits
    pub fn with_limits(
        user_agent: &str,
        timeout: Duration,
        max_redirects: u32,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: probe_client(user_agent, timeout)?,
            timeout,
            max_redirects,
        })
    }

    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Check one URL and return the final status
    pub async fn check(&self, url: &str) -> Result<Probe, ReachabilityError> {
        let mut current = Url::parse(url).map_err(|_| ReachabilityError::InvalidUrl {
            url: url.to_string(),
        })?;
        let mut redirects = 0;

        loop {
            trace!("HEAD {}", current);
            let response = self
                .client
                .head(current.clone())
                .send()
                .await
                .map_err(|e| self.classify(url, &e))?;

            let status = response.status().as_u16();
            let location = if REDIRECT_STATUSES.contains(&status) {
                response.headers().get(LOCATION).cloned()
            } else {
                None
            };

            let Some(location) = location else {
                debug!("{} -> {} after {} redirect(s)", url, status, redirects);
                return Ok(Probe {
                    status,
                    final_url: current.to_string(),
                    redirects,
                });
            };

            if redirects >= self.max_redirects {
                return Err(ReachabilityError::TooManyRedirects {
                    url: url.to_string(),
                    limit: self.max_redirects,
                });
            }

            let invalid_location = || ReachabilityError::InvalidLocation {
                url: current.to_string(),
                location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
            };
            let target = location.to_str().map_err(|_| invalid_location())?;
            let next = current.join(target).map_err(|_| invalid_location())?;

            debug!("{} redirected ({}) to {}", current, status, next);
            current = next;
            redirects += 1;
        }
    }

    fn classify(&self, url: &str, error: &reqwest::Error) -> ReachabilityError {
        if error.is_timeout() {
            ReachabilityError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }
        } else {
            ReachabilityError::Network {
                url: url.to_string(),
                message: error_chain(error),
            }
        }
    }
}
