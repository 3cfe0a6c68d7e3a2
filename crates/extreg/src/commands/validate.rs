//! Validate command

use anyhow::Result;
use camino::Utf8Path;
use extreg_core::ReportPrinter;
use extreg_registry::RegistryValidator;

use crate::cli::ValidateArgs;
use crate::commands::{load_config, use_color};
use crate::output;

pub async fn run(args: ValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(profile) = args.profile {
        config.validate.profile = profile;
    }
    if let Some(concurrency) = args.concurrency {
        config.network.concurrency = concurrency;
    }
    let registry_path = args.registry.unwrap_or_else(|| config.output.clone());
    let check_urls = config.validate.check_urls && !args.skip_urls;
    let color = use_color(args.no_color);
    output::set_color(color);

    println!("\nValidating registry: {}\n", registry_path);

    let validator = RegistryValidator::new(config).with_url_checks(check_urls);
    let spinner = output::spinner("Running registry checks...");
    let result = validator.validate_file(&registry_path).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            output::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    ReportPrinter::new(color).print(&report);

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
