//! Command implementations

pub mod aggregate;
pub mod config;
pub mod readme;
pub mod validate;

use anyhow::Result;
use camino::Utf8Path;
use extreg_core::{ConfigLoader, RegistryConfig};

/// Load configuration from `--config`, or `./extreg.yaml` when present
pub fn load_config(config_path: Option<&Utf8Path>) -> Result<RegistryConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::with_file(path.to_path_buf()),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Whether report output should be colored
pub fn use_color(no_color: bool) -> bool {
    !no_color && console::colors_enabled()
}
