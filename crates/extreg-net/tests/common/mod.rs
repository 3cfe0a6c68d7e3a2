//! Common test infrastructure for extreg-net tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod constants;
pub mod mock_server;

pub use constants::*;
pub use mock_server::*;
