//! Structural filter chain
//!
//! Each version runs through three predicates in a fixed order:
//! required platforms, HTTPS URLs, checksums. The first failure drops the
//! version and the remaining predicates are skipped for it.

use extreg_core::checks::{check_checksums, check_required_platforms, check_urls};
use extreg_core::{Defect, ExtensionVersion, Registry, RegistryConfig, Report};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Why a version was removed from the aggregated registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    #[error(transparent)]
    Defect(#[from] Defect),

    #[error("{platform}: {detail}")]
    Unreachable { platform: String, detail: String },
}

/// A version removed by a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedVersion {
    pub id: String,
    pub version: String,
    pub reason: DropReason,
}

impl fmt::Display for DroppedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}: {}", self.id, self.version, self.reason)
    }
}

/// Ordered structural predicates over versions
#[derive(Debug, Clone)]
pub struct FilterChain {
    required_platforms: Vec<String>,
}

impl FilterChain {
    pub fn new(required_platforms: Vec<String>) -> Self {
        Self { required_platforms }
    }

    /// Chain using the aggregate platform profile
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.aggregate_platforms())
    }

    pub fn required_platforms(&self) -> &[String] {
        &self.required_platforms
    }

    /// Run the predicates in order, stopping at the first defect
    pub fn check(&self, version: &ExtensionVersion) -> Result<(), Defect> {
        check_required_platforms(version, &self.required_platforms)?;
        check_urls(version)?;
        check_checksums(version)
    }

    /// Drop every failing version in place
    ///
    /// Kept versions stay in their existing order. One report line is
    /// recorded per version, in a section per extension.
    pub fn apply(&self, registry: &mut Registry, report: &mut Report) -> Vec<DroppedVersion> {
        let mut dropped = Vec::new();

        for extension in &mut registry.extensions {
            let id = extension.display_id().to_string();
            let section = report.section_named(&id);
            let before = extension.versions.len();

            extension.versions.retain(|version| match self.check(version) {
                Ok(()) => {
                    section.pass(format!(
                        "[{}@{}] Passed platform, URL and checksum checks",
                        id, version.version
                    ));
                    true
                }
                Err(defect) => {
                    warn!("Dropping {}@{}: {}", id, version.version, defect);
                    section.fail(format!("[{}@{}] Dropped: {}", id, version.version, defect));
                    dropped.push(DroppedVersion {
                        id: id.clone(),
                        version: version.version.clone(),
                        reason: defect.into(),
                    });
                    false
                }
            });

            let after = extension.versions.len();
            if after < before {
                info!("Filtered {}: {} → {} versions", id, before, after);
            }
        }

        dropped
    }
}
