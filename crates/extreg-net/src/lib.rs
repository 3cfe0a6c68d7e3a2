//! HTTP plumbing for extreg
//!
//! Provides:
//! - Source registry fetching with an explicit failure policy
//! - HEAD-based artifact reachability checks with manual redirect following
//! - A bounded-concurrency pool that runs reachability checks and keeps
//!   results attributed to the job that asked for them

pub mod client;
pub mod fetch;
pub mod pool;
pub mod reachability;

pub use fetch::{FetchError, FetchedRegistries, RegistryFetcher, SourceFailure, SourceRegistry};
pub use pool::{ReachabilityJob, ReachabilityPool, ReachabilityResult};
pub use reachability::{Probe, ReachabilityChecker, ReachabilityError, REDIRECT_STATUSES};
