//! Registry document types (registry.json)
//!
//! Every object keeps the fields this model does not name in an `extra`
//! map, so a registry that passes through the aggregator unmodified
//! serializes back with the same content.

use camino::Utf8Path;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Platform key for Windows on x86_64
pub const WINDOWS_AMD64: &str = "windows/amd64";
/// Platform key for Windows on ARM64
pub const WINDOWS_ARM64: &str = "windows/arm64";
/// Platform key for macOS on x86_64
pub const DARWIN_AMD64: &str = "darwin/amd64";
/// Platform key for macOS on Apple silicon
pub const DARWIN_ARM64: &str = "darwin/arm64";
/// Platform key for Linux on x86_64
pub const LINUX_AMD64: &str = "linux/amd64";
/// Platform key for Linux on ARM64
pub const LINUX_ARM64: &str = "linux/arm64";

/// Explicit `null` reads the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Registry document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Extensions in insertion order
    #[serde(default, deserialize_with = "null_as_default")]
    pub extensions: Vec<Extension>,

    /// Unmodelled top-level fields (e.g. `$schema`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a registry file for validation
    ///
    /// Unreadable files, invalid JSON and registries without extensions are
    /// all fatal.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::registry_read(path.as_str(), e))?;
        let registry =
            Self::from_json(&content).map_err(|e| Error::registry_read(path.as_str(), e))?;

        if registry.extensions.is_empty() {
            return Err(Error::empty_registry(path.as_str()));
        }

        Ok(registry)
    }

    /// Serialize as pretty-printed JSON with a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Look up an extension by id
    pub fn get(&self, id: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.id == id)
    }

    /// Total number of versions across all extensions
    pub fn version_count(&self) -> usize {
        self.extensions.iter().map(|e| e.versions.len()).sum()
    }
}

/// One installable extension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Dotted identity, e.g. `publisher.product.component`
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Source repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Published versions, expected ascending
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<ExtensionVersion>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Extension {
    /// Create an extension with the given id and no versions
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Id for display, `(unknown)` when the document omits it
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            "(unknown)"
        } else {
            &self.id
        }
    }

    /// The last listed version, which is the latest once sorted
    pub fn latest_version(&self) -> Option<&ExtensionVersion> {
        self.versions.last()
    }
}

/// One published release of an extension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionVersion {
    /// `major.minor.patch` version string
    #[serde(default)]
    pub version: String,

    /// Platform key (`<os>/<arch>`) to artifact
    #[serde(default, deserialize_with = "null_as_default")]
    pub artifacts: BTreeMap<String, Artifact>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtensionVersion {
    /// Create a version with no artifacts
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Builder-style artifact insertion
    pub fn with_artifact(mut self, platform: impl Into<String>, artifact: Artifact) -> Self {
        self.artifacts.insert(platform.into(), artifact);
        self
    }

    /// Whether an artifact exists for the platform key
    pub fn has_platform(&self, platform: &str) -> bool {
        self.artifacts.contains_key(platform)
    }

    /// Platform used to probe a version with a single request:
    /// `windows/amd64` when present, otherwise the first key.
    pub fn representative_platform(&self) -> Option<&str> {
        if self.has_platform(WINDOWS_AMD64) {
            Some(WINDOWS_AMD64)
        } else {
            self.artifacts.keys().next().map(String::as_str)
        }
    }
}

/// Downloadable binary for one platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Artifact {
    /// Create an artifact with a sha256 checksum
    pub fn new(url: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            checksum: Some(Checksum::sha256(sha256)),
            extra: Map::new(),
        }
    }

    /// Non-empty URL, if any
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Artifact checksum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Checksum {
    /// Create a sha256 checksum
    pub fn sha256(value: impl Into<String>) -> Self {
        Self {
            algorithm: Some("sha256".to_string()),
            value: Some(value.into()),
            extra: Map::new(),
        }
    }

    /// Non-empty algorithm name, if any
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref().filter(|a| !a.is_empty())
    }

    /// Non-empty checksum value, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}
