//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file (`--config`, or `./extreg.yaml` when present)
//! 3. Environment variables (EXTREG_* prefix)
//! 4. CLI flags (handled by caller)
//!
//! Layers are deep-merged as YAML documents before deserializing, so a
//! config file only needs the keys it changes.

use crate::error::{Error, Result};
use crate::types::RegistryConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "extreg-defaults.yaml";
const LOCAL_CONFIG_FILE: &str = "extreg.yaml";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Explicit config file; must exist
    config_file: Option<Utf8PathBuf>,

    /// Directory searched for `extreg.yaml` when no file is given
    search_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Loader that picks up `./extreg.yaml` if it exists
    pub fn new() -> Self {
        Self {
            config_file: None,
            search_dir: Utf8PathBuf::from("."),
        }
    }

    /// Loader for an explicit config file
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
            search_dir: Utf8PathBuf::from("."),
        }
    }

    /// Loader that searches a custom directory for `extreg.yaml`
    pub fn with_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: None,
            search_dir: dir.into(),
        }
    }

    /// Load the configuration with hierarchical precedence
    pub fn load(&self) -> Result<RegistryConfig> {
        let mut merged = Self::load_embedded()?;

        if let Some(path) = self.config_path()? {
            debug!("Loading config overlay from {}", path);
            let overlay = Self::load_yaml_file(&path)?;
            merge_values(&mut merged, overlay);
        }

        let config: RegistryConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to parse configuration: {}", e)))?;

        let config = Self::apply_env_overrides(config)?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Resolve which config file (if any) participates
    fn config_path(&self) -> Result<Option<Utf8PathBuf>> {
        match &self.config_file {
            Some(path) if path.exists() => Ok(Some(path.clone())),
            Some(path) => Err(Error::config_not_found(path.as_str())),
            None => {
                let local = self.search_dir.join(LOCAL_CONFIG_FILE);
                Ok(local.exists().then_some(local))
            }
        }
    }

    /// Load the embedded defaults document
    fn load_embedded() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    /// Load a YAML file as an untyped document
    fn load_yaml_file(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: RegistryConfig) -> Result<RegistryConfig> {
        if let Ok(val) = env::var("EXTREG_SOURCES") {
            config.sources = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(val) = env::var("EXTREG_OUTPUT") {
            config.output = Utf8PathBuf::from(val);
        }

        if let Ok(val) = env::var("EXTREG_HTTP_TIMEOUT_SECS") {
            config.network.timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("EXTREG_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("EXTREG_MAX_REDIRECTS") {
            config.network.max_redirects = val.parse().map_err(|_| {
                Error::invalid_config("EXTREG_MAX_REDIRECTS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("EXTREG_CONCURRENCY") {
            config.network.concurrency = val
                .parse()
                .map_err(|_| Error::invalid_config("EXTREG_CONCURRENCY must be a valid number"))?;
        }

        if let Ok(val) = env::var("EXTREG_PLATFORM_PROFILE") {
            let profile = val.parse().map_err(Error::invalid_config)?;
            config.aggregate.profile = profile;
            config.validate.profile = profile;
        }

        if let Ok(val) = env::var("EXTREG_FETCH_POLICY") {
            config.fetch.policy = val.parse().map_err(Error::invalid_config)?;
        }

        Ok(config)
    }

    /// Reject values no run can work with
    fn check(config: &RegistryConfig) -> Result<()> {
        if config.network.timeout_secs == 0 {
            return Err(Error::invalid_config("network.timeout-secs must be at least 1"));
        }
        if config.network.concurrency == 0 {
            return Err(Error::invalid_config("network.concurrency must be at least 1"));
        }
        if config.fetch.max_attempts == 0 {
            return Err(Error::invalid_config("fetch.max-attempts must be at least 1"));
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep-merge `overlay` into `base`: mappings merge key by key, anything
/// else is replaced wholesale
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}
