//! Registry output

use anyhow::{Context, Result};
use camino::Utf8Path;
use extreg_core::Registry;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write a registry as pretty JSON, replacing `path` atomically
///
/// The document goes to a temporary file next to the destination and is
/// renamed over it, so readers never see a partial file.
pub fn write_registry(registry: &Registry, path: &Utf8Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir))?;

    let json = registry
        .to_pretty_json()
        .context("Failed to serialize registry")?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write {}", path))?;
    file.flush()?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path))?;

    debug!("Wrote {} bytes to {}", json.len(), path);
    Ok(())
}
