//! Common test infrastructure for extreg-registry tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: platform sets and checksums
//! - `builders`: fluent builders for extensions and registries
//! - `mock_server`: wiremock helpers for sources and artifact URLs

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod constants;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use mock_server::*;
