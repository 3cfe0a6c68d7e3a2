//! Fluent builders for registry fixtures

use camino::Utf8PathBuf;
use extreg_core::{Artifact, Extension, ExtensionVersion, Registry, RegistryConfig};

use super::constants::VALID_SHA256;

/// Builds an extension whose artifacts live under `base_url`
pub struct ExtensionBuilder {
    extension: Extension,
    base_url: String,
}

impl ExtensionBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            extension: Extension::new(id),
            base_url: format!("https://github.com/{}/releases/download", id),
        }
    }

    /// Serve artifacts from a different host (e.g. a mock server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.extension.display_name = Some(name.to_string());
        self
    }

    /// Add a version with a valid artifact for each platform
    pub fn version(mut self, version: &str, platforms: &[&str]) -> Self {
        let built = platforms
            .iter()
            .fold(ExtensionVersion::new(version), |v, platform| {
                v.with_artifact(
                    *platform,
                    Artifact::new(artifact_url(&self.base_url, version, platform), VALID_SHA256),
                )
            });
        self.extension.versions.push(built);
        self
    }

    /// Add a hand-built version
    pub fn version_with(mut self, version: ExtensionVersion) -> Self {
        self.extension.versions.push(version);
        self
    }

    pub fn build(self) -> Extension {
        self.extension
    }
}

/// `{base}/v{version}/{os}-{arch}.zip`
pub fn artifact_url(base_url: &str, version: &str, platform: &str) -> String {
    format!("{}/v{}/{}.zip", base_url, version, platform.replace('/', "-"))
}

/// URL path of an artifact built against a mock server
pub fn artifact_path(version: &str, platform: &str) -> String {
    format!("/v{}/{}.zip", version, platform.replace('/', "-"))
}

pub fn registry(extensions: Vec<Extension>) -> Registry {
    Registry {
        extensions,
        ..Default::default()
    }
}

/// Configuration writing to `output` and fetching `sources`
pub fn test_config(sources: Vec<String>, output: Utf8PathBuf) -> RegistryConfig {
    let mut config = RegistryConfig::default();
    config.sources = sources;
    config.output = output;
    config.network.timeout_secs = 5;
    config.fetch.retry_delay_ms = 10;
    config
}
