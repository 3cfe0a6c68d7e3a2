//! # extreg-registry
//!
//! The two batch processes built on the registry model:
//! - [`Aggregator`] fetches source registries, merges them first-source-wins,
//!   drops broken versions and writes the result
//! - [`RegistryValidator`] runs the full check battery over a written
//!   registry and reports pass/fail per check
//!
//! Plus the README version updater that runs after aggregation.

pub mod aggregate;
pub mod filter;
pub mod merge;
pub mod readme;
pub mod validate;
pub mod writer;

pub use aggregate::{drop_unreachable, AggregateSummary, Aggregator, Assembled};
pub use filter::{DropReason, DroppedVersion, FilterChain};
pub use merge::merge_registries;
pub use readme::{update_readme, ReadmeUpdate};
pub use validate::RegistryValidator;
pub use writer::write_registry;
