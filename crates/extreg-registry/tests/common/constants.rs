//! Shared test constants

use extreg_core::types::{DARWIN_AMD64, DARWIN_ARM64, LINUX_AMD64, LINUX_ARM64, WINDOWS_AMD64};

pub const BASELINE: [&str; 3] = [WINDOWS_AMD64, DARWIN_AMD64, LINUX_AMD64];
pub const STRICT: [&str; 5] = [WINDOWS_AMD64, DARWIN_AMD64, DARWIN_ARM64, LINUX_AMD64, LINUX_ARM64];

pub const VALID_SHA256: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";
pub const ZERO_SHA256: &str = "0000000000000000000000000000000000000000000000000000000000000000";
