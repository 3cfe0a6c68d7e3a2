//! Configuration types (extreg.yaml)
//!
//! A single `RegistryConfig` value is threaded through every entry point;
//! nothing reads source URLs, timeouts or platform lists from globals.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Complete extreg configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    /// Source registry URLs, fetched in order
    #[serde(default)]
    pub sources: Vec<String>,

    /// Aggregated registry path
    #[serde(default = "default_output")]
    pub output: Utf8PathBuf,

    /// README rewritten by `extreg readme`
    #[serde(default = "default_readme")]
    pub readme: Utf8PathBuf,

    #[serde(default)]
    pub platforms: PlatformsConfig,

    #[serde(default)]
    pub aggregate: AggregateConfig,

    #[serde(default)]
    pub validate: ValidateConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            output: default_output(),
            readme: default_readme(),
            platforms: PlatformsConfig::default(),
            aggregate: AggregateConfig::default(),
            validate: ValidateConfig::default(),
            fetch: FetchConfig::default(),
            network: NetworkConfig::default(),
            github: GitHubConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Platforms every version must ship when aggregating
    pub fn aggregate_platforms(&self) -> Vec<String> {
        self.platforms.required_for(self.aggregate.profile)
    }

    /// Platforms the latest version must ship when validating
    pub fn validate_platforms(&self) -> Vec<String> {
        self.platforms.required_for(self.validate.profile)
    }
}

fn default_output() -> Utf8PathBuf {
    Utf8PathBuf::from("public/registry.json")
}

fn default_readme() -> Utf8PathBuf {
    Utf8PathBuf::from("README.md")
}

/// Which platform set a version must cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformProfile {
    /// windows/amd64, darwin/amd64, linux/amd64
    #[default]
    Baseline,
    /// Baseline plus darwin/arm64 and linux/arm64
    Strict,
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformProfile::Baseline => write!(f, "baseline"),
            PlatformProfile::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for PlatformProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(PlatformProfile::Baseline),
            "strict" => Ok(PlatformProfile::Strict),
            other => Err(format!(
                "unknown platform profile '{}' (expected 'baseline' or 'strict')",
                other
            )),
        }
    }
}

/// Platform key lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformsConfig {
    /// Baseline platforms
    #[serde(default = "default_required_platforms")]
    pub required: Vec<String>,

    /// Added on top of `required` by the strict profile
    #[serde(default = "default_strict_extra_platforms")]
    pub strict_extra: Vec<String>,

    /// Reported as optional, never required
    #[serde(default = "default_optional_platforms")]
    pub optional: Vec<String>,
}

impl Default for PlatformsConfig {
    fn default() -> Self {
        Self {
            required: default_required_platforms(),
            strict_extra: default_strict_extra_platforms(),
            optional: default_optional_platforms(),
        }
    }
}

impl PlatformsConfig {
    /// Resolve the required platform set for a profile
    ///
    /// Optional platforms are removed even if a list names them.
    pub fn required_for(&self, profile: PlatformProfile) -> Vec<String> {
        let mut platforms = self.required.clone();
        if profile == PlatformProfile::Strict {
            for platform in &self.strict_extra {
                if !platforms.contains(platform) {
                    platforms.push(platform.clone());
                }
            }
        }
        platforms.retain(|p| !self.optional.contains(p));
        platforms
    }
}

fn default_required_platforms() -> Vec<String> {
    vec![
        "windows/amd64".to_string(),
        "darwin/amd64".to_string(),
        "linux/amd64".to_string(),
    ]
}

fn default_strict_extra_platforms() -> Vec<String> {
    vec!["darwin/arm64".to_string(), "linux/arm64".to_string()]
}

fn default_optional_platforms() -> Vec<String> {
    vec!["windows/arm64".to_string()]
}

/// Aggregator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AggregateConfig {
    #[serde(default)]
    pub profile: PlatformProfile,

    /// Drop versions whose artifact URLs are not live
    #[serde(default)]
    pub check_urls: bool,
}

/// Validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidateConfig {
    #[serde(default = "default_validate_profile")]
    pub profile: PlatformProfile,

    /// Issue HEAD requests against artifact URLs
    #[serde(default = "default_true")]
    pub check_urls: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            profile: default_validate_profile(),
            check_urls: true,
        }
    }
}

fn default_validate_profile() -> PlatformProfile {
    PlatformProfile::Strict
}

fn default_true() -> bool {
    true
}

/// What happens when one source registry cannot be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Any failed source aborts the run; nothing is written
    #[default]
    AllOrNothing,
    /// Failed sources are logged and skipped
    BestEffort,
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPolicy::AllOrNothing => write!(f, "all-or-nothing"),
            FetchPolicy::BestEffort => write!(f, "best-effort"),
        }
    }
}

impl FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all-or-nothing" => Ok(FetchPolicy::AllOrNothing),
            "best-effort" => Ok(FetchPolicy::BestEffort),
            other => Err(format!(
                "unknown fetch policy '{}' (expected 'all-or-nothing' or 'best-effort')",
                other
            )),
        }
    }
}

/// Source fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FetchConfig {
    #[serde(default)]
    pub policy: FetchPolicy,

    /// Attempts per source; 1 means no retry
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            policy: FetchPolicy::default(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl FetchConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Per-request (per redirect hop) timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Redirects followed before a reachability check gives up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Reachability checks in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            concurrency: default_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> u32 {
    5
}

fn default_concurrency() -> usize {
    8
}

fn default_user_agent() -> String {
    format!(
        "extreg/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// GitHub API settings for the authenticated release-fetching variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Requests to URLs under this prefix carry the bearer token
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}
