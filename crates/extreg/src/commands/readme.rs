//! Readme command

use anyhow::Result;
use camino::Utf8Path;
use extreg_core::Registry;
use extreg_registry::update_readme;

use crate::cli::ReadmeArgs;
use crate::commands::load_config;
use crate::output;

pub fn run(args: ReadmeArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let registry_path = args.registry.unwrap_or(config.output);
    let readme_path = args.readme.unwrap_or(config.readme);

    let registry = Registry::load(&registry_path)?;
    let update = update_readme(&registry, &readme_path)?;

    if update.changed {
        output::success(&format!("{} updated with latest versions", readme_path));
        let rows: Vec<(String, String)> = update
            .versions
            .iter()
            .map(|(name, version)| (name.clone(), format!("v{}", version)))
            .collect();
        output::versions("README versions", &rows);
    } else {
        output::info(&format!("{} versions are already up to date", readme_path));
    }

    Ok(())
}
