//! Aggregator: fetch → merge → filter → write
//!
//! The exit status of an aggregation depends only on whether the output was
//! written. Dropped versions are reported, never fatal.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use extreg_core::{Registry, RegistryConfig, Report};
use extreg_net::{ReachabilityChecker, ReachabilityJob, ReachabilityPool, RegistryFetcher};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::filter::{DropReason, DroppedVersion, FilterChain};
use crate::merge::merge_registries;
use crate::writer::write_registry;

/// Merged and filtered registry, not yet written
#[derive(Debug)]
pub struct Assembled {
    pub registry: Registry,
    pub report: Report,
    pub dropped: Vec<DroppedVersion>,
}

/// Outcome of a completed aggregation
#[derive(Debug)]
pub struct AggregateSummary {
    pub output: Utf8PathBuf,
    pub registry: Registry,
    pub report: Report,
    pub dropped: Vec<DroppedVersion>,

    /// Sources skipped under the best-effort policy
    pub skipped_sources: Vec<String>,
}

impl AggregateSummary {
    /// `(id, latest version)` per extension; `unknown` when none is left
    pub fn latest_versions(&self) -> Vec<(String, String)> {
        self.registry
            .extensions
            .iter()
            .map(|e| {
                let latest = e
                    .latest_version()
                    .map(|v| v.version.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                (e.display_id().to_string(), latest)
            })
            .collect()
    }
}

/// Builds the aggregated registry
pub struct Aggregator {
    config: RegistryConfig,
}

impl Aggregator {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Fetch every configured source, then assemble and write
    pub async fn run(&self) -> Result<AggregateSummary> {
        if self.config.sources.is_empty() {
            anyhow::bail!("No source registries configured");
        }

        let fetcher = RegistryFetcher::new(&self.config)?;
        info!(
            "Fetching {} source registr{} ({})",
            self.config.sources.len(),
            if self.config.sources.len() == 1 { "y" } else { "ies" },
            fetcher.policy()
        );

        let fetched = fetcher
            .fetch_all(&self.config.sources)
            .await
            .context("Error updating registry")?;
        let skipped_sources = fetched.failures.iter().map(|f| f.url.clone()).collect();

        let mut summary = self.run_with(fetched.into_registries()).await?;
        summary.skipped_sources = skipped_sources;
        Ok(summary)
    }

    /// Assemble already-fetched registries and write the result
    pub async fn run_with(&self, registries: Vec<Registry>) -> Result<AggregateSummary> {
        let assembled = self.assemble(registries).await?;
        let output = self.config.output.clone();

        info!("Writing {}...", output);
        write_registry(&assembled.registry, &output)?;
        info!(
            "Registry updated successfully with {} extensions!",
            assembled.registry.extensions.len()
        );

        let summary = AggregateSummary {
            output,
            registry: assembled.registry,
            report: assembled.report,
            dropped: assembled.dropped,
            skipped_sources: Vec::new(),
        };

        info!("Extensions in registry:");
        for (id, latest) in summary.latest_versions() {
            info!("  - {} (latest: {})", id, latest);
        }

        Ok(summary)
    }

    /// Merge, sort and filter without touching the filesystem
    pub async fn assemble(&self, registries: Vec<Registry>) -> Result<Assembled> {
        let mut registry = merge_registries(registries);
        let mut report = Report::new();

        let chain = FilterChain::from_config(&self.config);
        let mut dropped = chain.apply(&mut registry, &mut report);

        if self.config.aggregate.check_urls {
            let checker = ReachabilityChecker::new(&self.config.network)
                .context("Failed to create HTTP client")?;
            let pool = ReachabilityPool::new(checker, self.config.network.concurrency);
            dropped.extend(drop_unreachable(&mut registry, &pool, &mut report).await);
        }

        Ok(Assembled {
            registry,
            report,
            dropped,
        })
    }
}

/// Drop versions with any artifact whose URL does not end in a 200
///
/// Every artifact of every remaining version is probed through the pool.
pub async fn drop_unreachable(
    registry: &mut Registry,
    pool: &ReachabilityPool,
    report: &mut Report,
) -> Vec<DroppedVersion> {
    let mut jobs = Vec::new();
    for (ext_index, extension) in registry.extensions.iter().enumerate() {
        for (ver_index, version) in extension.versions.iter().enumerate() {
            for (platform, artifact) in &version.artifacts {
                if let Some(url) = artifact.url() {
                    jobs.push(ReachabilityJob::new(
                        (ext_index, ver_index, platform.clone()),
                        url,
                    ));
                }
            }
        }
    }

    debug!("Probing {} artifact URL(s)", jobs.len());
    let results = pool.run(jobs).await;

    let mut dropped = Vec::new();
    let mut failed: HashSet<(usize, usize)> = HashSet::new();
    for result in results {
        let (ext_index, ver_index, platform) = result.key;
        if failed.contains(&(ext_index, ver_index)) {
            continue;
        }

        let detail = match &result.outcome {
            Ok(probe) if probe.is_reachable() => continue,
            Ok(probe) => format!("URL returned {}: {}", probe.status, result.url),
            Err(e) => format!("URL error: {}", e),
        };

        let extension = &registry.extensions[ext_index];
        let version = &extension.versions[ver_index];
        let drop = DroppedVersion {
            id: extension.display_id().to_string(),
            version: version.version.clone(),
            reason: DropReason::Unreachable { platform, detail },
        };
        info!("Dropping {}", drop);
        report
            .section_named(&drop.id)
            .fail(format!("[{}@{}] Dropped: {}", drop.id, drop.version, drop.reason));

        failed.insert((ext_index, ver_index));
        dropped.push(drop);
    }

    for (ext_index, extension) in registry.extensions.iter_mut().enumerate() {
        let before = extension.versions.len();
        let mut ver_index = 0;
        extension.versions.retain(|_| {
            let keep = !failed.contains(&(ext_index, ver_index));
            ver_index += 1;
            keep
        });
        if extension.versions.len() < before {
            info!(
                "Filtered {}: {} → {} versions",
                extension.display_id(),
                before,
                extension.versions.len()
            );
        }
    }

    dropped
}
