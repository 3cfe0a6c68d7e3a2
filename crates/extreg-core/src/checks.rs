//! Structural predicates on extension versions
//!
//! These are pure functions over the registry model. The aggregator chains
//! them to drop broken versions; the validator reports each one.

use thiserror::Error;

use crate::types::{Artifact, ExtensionVersion};

/// Only scheme accepted for artifact downloads
pub const HTTPS_PREFIX: &str = "https://";

/// Why a version (or one of its artifacts) is unpublishable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    #[error("missing required platforms: {}", .0.join(", "))]
    MissingPlatforms(Vec<String>),

    #[error("{platform}: missing URL")]
    MissingUrl { platform: String },

    #[error("{platform}: non-HTTPS URL {url}")]
    InsecureUrl { platform: String, url: String },

    #[error("{platform}: missing checksum")]
    MissingChecksum { platform: String },

    #[error("{platform}: checksum missing algorithm")]
    MissingAlgorithm { platform: String },

    #[error("{platform}: checksum missing value")]
    MissingChecksumValue { platform: String },

    #[error("{platform}: placeholder checksum (all zeros)")]
    PlaceholderChecksum { platform: String },
}

/// A checksum made only of `0` characters marks an incomplete build
pub fn is_placeholder_checksum(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b == b'0')
}

/// Required platform keys the version has no artifact for, in config order
pub fn missing_platforms(version: &ExtensionVersion, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|p| !version.has_platform(p))
        .cloned()
        .collect()
}

/// Fails when any required platform is absent
pub fn check_required_platforms(
    version: &ExtensionVersion,
    required: &[String],
) -> Result<(), Defect> {
    let missing = missing_platforms(version, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Defect::MissingPlatforms(missing))
    }
}

/// URL defect of one artifact, if any
pub fn url_defect(platform: &str, artifact: &Artifact) -> Option<Defect> {
    match artifact.url() {
        None => Some(Defect::MissingUrl {
            platform: platform.to_string(),
        }),
        Some(url) if !url.starts_with(HTTPS_PREFIX) => Some(Defect::InsecureUrl {
            platform: platform.to_string(),
            url: url.to_string(),
        }),
        Some(_) => None,
    }
}

/// Checksum defect of one artifact, if any
pub fn checksum_defect(platform: &str, artifact: &Artifact) -> Option<Defect> {
    let platform = platform.to_string();
    let Some(checksum) = &artifact.checksum else {
        return Some(Defect::MissingChecksum { platform });
    };

    if checksum.algorithm().is_none() {
        return Some(Defect::MissingAlgorithm { platform });
    }

    match checksum.value() {
        None => Some(Defect::MissingChecksumValue { platform }),
        Some(value) if is_placeholder_checksum(value) => {
            Some(Defect::PlaceholderChecksum { platform })
        }
        Some(_) => None,
    }
}

/// Fails on the first artifact whose URL is absent or not HTTPS
pub fn check_urls(version: &ExtensionVersion) -> Result<(), Defect> {
    match version
        .artifacts
        .iter()
        .find_map(|(platform, artifact)| url_defect(platform, artifact))
    {
        Some(defect) => Err(defect),
        None => Ok(()),
    }
}

/// Fails on the first artifact with an absent, incomplete or placeholder
/// checksum
pub fn check_checksums(version: &ExtensionVersion) -> Result<(), Defect> {
    match version
        .artifacts
        .iter()
        .find_map(|(platform, artifact)| checksum_defect(platform, artifact))
    {
        Some(defect) => Err(defect),
        None => Ok(()),
    }
}
