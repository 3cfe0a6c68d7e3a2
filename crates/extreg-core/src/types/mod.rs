//! Type definitions for extreg

mod config_types;
mod registry_types;

pub use config_types::*;
pub use registry_types::*;
