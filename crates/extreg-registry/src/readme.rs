//! README version table maintenance
//!
//! After aggregation the README's extension table is brought in line with
//! the registry: for each extension, table rows naming its repository get
//! their trailing version cell replaced with the highest published version.

use anyhow::{Context, Result};
use camino::Utf8Path;
use extreg_core::version::highest;
use extreg_core::Registry;
use regex::{Captures, Regex};
use tracing::{debug, info};

/// Result of a README update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeUpdate {
    /// `(repository name, version)` pairs that were applied
    pub versions: Vec<(String, String)>,

    /// Whether the file was rewritten
    pub changed: bool,
}

/// Repository name for an extension id: `jongio.azd.app` → `azd-app`
pub fn repo_name(id: &str) -> String {
    id.split('.').skip(1).collect::<Vec<_>>().join("-")
}

/// Highest version per repository name, in registry order
pub fn latest_versions(registry: &Registry) -> Vec<(String, String)> {
    registry
        .extensions
        .iter()
        .filter_map(|extension| {
            let name = repo_name(&extension.id);
            if name.is_empty() {
                return None;
            }
            let latest = highest(extension.versions.iter().map(|v| v.version.as_str()))?;
            Some((name, latest.to_string()))
        })
        .collect()
}

/// Row pattern for a repository name; `-` in the name also matches `.`
fn row_pattern(name: &str) -> Result<Regex> {
    let name = name
        .split('-')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("[-.]");
    let pattern = format!(
        r"(\|[^|\n]*{}[^|\n]*\|[^|\n]*\|)[ \t]*v?[0-9]+\.[0-9]+\.[0-9]+[ \t]*(\|)",
        name
    );
    Regex::new(&pattern).with_context(|| format!("Invalid README pattern for {}", name))
}

/// Rewrite version cells in `content`
pub fn rewrite_versions(content: &str, versions: &[(String, String)]) -> Result<String> {
    let mut updated = content.to_string();
    for (name, version) in versions {
        let pattern = row_pattern(name)?;
        updated = pattern
            .replace_all(&updated, |caps: &Captures| {
                format!("{} v{} {}", &caps[1], version, &caps[2])
            })
            .into_owned();
    }
    Ok(updated)
}

/// Update the README at `path` from `registry`, writing only on change
pub fn update_readme(registry: &Registry, path: &Utf8Path) -> Result<ReadmeUpdate> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let versions = latest_versions(registry);
    let updated = rewrite_versions(&content, &versions)?;

    if updated == content {
        info!("{} versions are already up to date", path);
        return Ok(ReadmeUpdate {
            versions,
            changed: false,
        });
    }

    std::fs::write(path, &updated).with_context(|| format!("Failed to write {}", path))?;
    info!("{} updated with latest versions:", path);
    for (name, version) in &versions {
        info!("  {}: v{}", name, version);
    }
    debug!("Rewrote {} bytes", updated.len());

    Ok(ReadmeUpdate {
        versions,
        changed: true,
    })
}
