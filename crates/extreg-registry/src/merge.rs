//! First-source-wins merge

use extreg_core::version::sort_versions;
use extreg_core::Registry;
use std::collections::HashSet;
use tracing::{debug, info};

/// Merge source registries into one
///
/// Each extension id appears once in the result. When several sources list
/// the same id, the object from the earliest source is kept whole and later
/// ones are dropped, never merged field by field. Every extension's
/// versions are then sorted ascending.
pub fn merge_registries<I>(sources: I) -> Registry
where
    I: IntoIterator<Item = Registry>,
{
    let mut merged = Registry::new();
    let mut seen: HashSet<String> = HashSet::new();

    for source in sources {
        for extension in source.extensions {
            if seen.contains(&extension.id) {
                info!(
                    "Extension {} already exists, keeping existing",
                    extension.display_id()
                );
                continue;
            }

            info!("Added extension: {}", extension.display_id());
            seen.insert(extension.id.clone());
            merged.extensions.push(extension);
        }
    }

    for extension in &mut merged.extensions {
        sort_versions(&mut extension.versions);
    }

    debug!(
        "Merged {} extension(s) with {} version(s)",
        merged.extensions.len(),
        merged.version_count()
    );
    merged
}
