//! Source registry fetching
//!
//! Sources are fetched one after another. With the default
//! `all-or-nothing` policy the first failing source aborts the run before
//! anything is merged; `best-effort` records the failure and moves on.

use extreg_core::types::{FetchPolicy, RegistryConfig};
use extreg_core::Registry;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::{error_chain, fetch_client};

/// Errors raised while fetching a source registry
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Failed to fetch {url}: {message}")]
    Request { url: String, message: String },

    #[error("Invalid registry JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Request { .. } => true,
            FetchError::Decode { .. } | FetchError::Client(_) => false,
        }
    }
}

/// A fetched source document
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    pub url: String,
    pub registry: Registry,
}

/// A source skipped under the best-effort policy
#[derive(Debug)]
pub struct SourceFailure {
    pub url: String,
    pub error: FetchError,
}

/// Result of fetching every configured source
#[derive(Debug, Default)]
pub struct FetchedRegistries {
    /// Successfully fetched sources, in configured order
    pub registries: Vec<SourceRegistry>,

    /// Skipped sources (always empty under all-or-nothing)
    pub failures: Vec<SourceFailure>,
}

impl FetchedRegistries {
    /// Registries in source order, ready to merge
    pub fn into_registries(self) -> Vec<Registry> {
        self.registries.into_iter().map(|s| s.registry).collect()
    }
}

/// Fetches registry documents over HTTP(S)
pub struct RegistryFetcher {
    client: Client,
    policy: FetchPolicy,
    max_attempts: u32,
    retry_delay: Duration,
    api_url: Option<Url>,
    token: Option<String>,
}

impl RegistryFetcher {
    /// Create a fetcher from configuration
    ///
    /// The bearer token is read from the environment variable named by
    /// `github.token-env`.
    pub fn new(config: &RegistryConfig) -> Result<Self, FetchError> {
        let client = fetch_client(&config.network).map_err(FetchError::Client)?;
        let token = std::env::var(&config.github.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        let api_url = Url::parse(&config.github.api_url)
            .map_err(|e| warn!("Ignoring invalid github.api-url {}: {}", config.github.api_url, e))
            .ok();

        Ok(Self {
            client,
            policy: config.fetch.policy,
            max_attempts: config.fetch.max_attempts.max(1),
            retry_delay: config.fetch.retry_delay(),
            api_url,
            token,
        })
    }

    /// Override the failure policy
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the API token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// The token is only sent under the configured GitHub API URL: same
    /// scheme, host and port, and a path below the API path on a segment
    /// boundary.
    fn wants_token(&self, url: &str) -> bool {
        let (Some(api), Ok(target)) = (&self.api_url, Url::parse(url)) else {
            return false;
        };
        if target.scheme() != api.scheme()
            || target.host_str() != api.host_str()
            || target.port_or_known_default() != api.port_or_known_default()
        {
            return false;
        }

        let base = api.path().trim_end_matches('/');
        let path = target.path();
        base.is_empty()
            || path == base
            || path
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Fetch one registry, retrying up to `fetch.max-attempts`
    pub async fn fetch(&self, url: &str) -> Result<Registry, FetchError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(url).await {
                Ok(registry) => return Ok(registry),
                Err(e) if attempt < self.max_attempts && e.is_retryable() => {
                    warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt, self.max_attempts, url, e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<Registry, FetchError> {
        info!("Fetching {}...", url);

        let mut request = self.client.get(url);
        if let Some(token) = self.token.as_deref().filter(|_| self.wants_token(url)) {
            debug!("Using bearer token for {}", url);
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: error_chain(&e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: error_chain(&e),
        })?;

        let registry: Registry = serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            source: e,
        })?;

        debug!(
            "Fetched {} extension(s) from {}",
            registry.extensions.len(),
            url
        );
        Ok(registry)
    }

    /// Fetch every source in order, honouring the failure policy
    pub async fn fetch_all(&self, urls: &[String]) -> Result<FetchedRegistries, FetchError> {
        let mut fetched = FetchedRegistries::default();

        for url in urls {
            match self.fetch(url).await {
                Ok(registry) => fetched.registries.push(SourceRegistry {
                    url: url.clone(),
                    registry,
                }),
                Err(e) => match self.policy {
                    FetchPolicy::AllOrNothing => return Err(e),
                    FetchPolicy::BestEffort => {
                        warn!("Skipping source {}: {}", url, e);
                        fetched.failures.push(SourceFailure {
                            url: url.clone(),
                            error: e,
                        });
                    }
                },
            }
        }

        Ok(fetched)
    }
}
