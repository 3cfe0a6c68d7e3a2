//! Aggregate command

use anyhow::Result;
use camino::Utf8Path;
use extreg_core::{FetchPolicy, ReportPrinter};
use extreg_registry::Aggregator;

use crate::cli::AggregateArgs;
use crate::commands::{load_config, use_color};
use crate::output;

pub async fn run(args: AggregateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let mut config = load_config(config_path)?;

    if !args.sources.is_empty() {
        config.sources = args.sources;
    }
    if let Some(path) = args.output {
        config.output = path;
    }
    if args.best_effort {
        config.fetch.policy = FetchPolicy::BestEffort;
    }
    if args.check_urls {
        config.aggregate.check_urls = true;
    }
    if let Some(profile) = args.profile {
        config.aggregate.profile = profile;
    }
    if let Some(concurrency) = args.concurrency {
        config.network.concurrency = concurrency;
    }

    let summary = Aggregator::new(config).run().await?;

    let color = use_color(false);
    output::set_color(color);
    ReportPrinter::new(color).print(&summary.report);

    for source in &summary.skipped_sources {
        output::warning(&format!("Skipped source {}", source));
    }
    if !summary.dropped.is_empty() {
        output::info(&format!(
            "{} version(s) dropped by validation filters",
            summary.dropped.len()
        ));
    }

    output::success(&format!(
        "Wrote {} with {} extension(s)",
        summary.output,
        summary.registry.extensions.len()
    ));
    output::versions("Extensions in registry", &summary.latest_versions());

    Ok(())
}
