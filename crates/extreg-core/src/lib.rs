//! # extreg-core
//!
//! Core library for the extreg registry tooling providing:
//! - The registry document model (registry.json)
//! - Numeric `major.minor.patch` ordering of extension versions
//! - Structural predicates shared by the aggregator and the validator
//! - Hierarchical configuration loading
//! - Pass/fail reporting

pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod types;
pub mod version;

pub use checks::Defect;
pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use report::{Report, ReportPrinter, ReportSection, Verdict};
pub use types::{
    Artifact, Checksum, Extension, ExtensionVersion, FetchPolicy, PlatformProfile, Registry,
    RegistryConfig,
};
pub use version::{compare_versions, VersionKey};
