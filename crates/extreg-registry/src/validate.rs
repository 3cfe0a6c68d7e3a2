//! Registry validator
//!
//! Runs the full check battery over a written registry and records one
//! pass/fail line per check. Per extension, in order:
//!
//! 1. at least one version (otherwise nothing else runs for it)
//! 2. versions strictly ascending
//! 3. every version: baseline platforms, HTTPS URLs, no placeholder checksums
//! 4. latest version: each required platform of the validation profile
//! 5. latest version: each artifact's checksum
//! 6. every version: one representative artifact URL is live
//! 7. latest version: every artifact URL is live
//!
//! Checks 6 and 7 go through the reachability pool for the whole registry
//! at once; their lines are slotted back into each extension's section in
//! the order above.

use anyhow::{Context, Result};
use camino::Utf8Path;
use extreg_core::checks::{checksum_defect, is_placeholder_checksum, HTTPS_PREFIX};
use extreg_core::version::first_order_violation;
use extreg_core::{
    Extension, ExtensionVersion, PlatformProfile, Registry, RegistryConfig, Report, Verdict,
};
use extreg_net::{ReachabilityChecker, ReachabilityJob, ReachabilityPool, ReachabilityResult};
use tracing::debug;

/// A report line, or a live check whose line depends on a probe
enum Planned {
    Line(Verdict, String),
    Probe(ProbeCheck),
}

struct ProbeCheck {
    /// `[id@version] platform`
    label: String,
    url: String,
    kind: ProbeKind,
}

#[derive(Clone, Copy)]
enum ProbeKind {
    /// Check 6
    Representative,
    /// Check 7
    Latest,
}

/// Validates an aggregated registry
pub struct RegistryValidator {
    config: RegistryConfig,
    check_urls: bool,
}

impl RegistryValidator {
    pub fn new(config: RegistryConfig) -> Self {
        let check_urls = config.validate.check_urls;
        Self { config, check_urls }
    }

    /// Enable or disable the live URL checks
    pub fn with_url_checks(mut self, enabled: bool) -> Self {
        self.check_urls = enabled;
        self
    }

    /// Load `path` and validate it
    ///
    /// Unreadable, unparsable or empty registries are errors rather than
    /// report failures.
    pub async fn validate_file(&self, path: &Utf8Path) -> Result<Report> {
        let registry = Registry::load(path)?;
        self.validate(&registry).await
    }

    /// Run every check and return the report
    pub async fn validate(&self, registry: &Registry) -> Result<Report> {
        let mut report = Report::new();
        report.note(format!("Found {} extension(s).", registry.extensions.len()));
        for platform in &self.config.platforms.optional {
            report.note(format!(
                "Note: {} is optional; not all extensions provide it yet.",
                platform
            ));
        }

        let plans: Vec<(String, Vec<Planned>)> = registry
            .extensions
            .iter()
            .map(|e| (e.display_id().to_string(), self.plan_extension(e)))
            .collect();

        let jobs: Vec<ReachabilityJob<usize>> = plans
            .iter()
            .flat_map(|(_, planned)| planned.iter())
            .filter_map(|p| match p {
                Planned::Probe(check) => Some(check.url.clone()),
                Planned::Line(..) => None,
            })
            .enumerate()
            .map(|(index, url)| ReachabilityJob::new(index, url))
            .collect();

        let results = if jobs.is_empty() {
            Vec::new()
        } else {
            let checker = ReachabilityChecker::new(&self.config.network)
                .context("Failed to create HTTP client")?;
            let pool = ReachabilityPool::new(checker, self.config.network.concurrency);
            pool.run(jobs).await
        };
        let mut results = results.into_iter();

        for (title, planned) in plans {
            let section = report.section(title);
            for item in planned {
                match item {
                    Planned::Line(verdict, message) => section.push(verdict, message),
                    Planned::Probe(check) => match results.next() {
                        Some(result) => {
                            let (verdict, message) = probe_line(&check, &result);
                            section.push(verdict, message);
                        }
                        None => section.fail(format!("{}: URL was not checked", check.label)),
                    },
                }
            }
        }

        debug!(
            "Validation finished: {} passed, {} failed",
            report.passed(),
            report.failed()
        );
        Ok(report)
    }

    /// Checks 1-5 only, without network access
    pub fn validate_structure(&self, registry: &Registry) -> Report {
        let mut report = Report::new();
        for extension in &registry.extensions {
            let section = report.section(extension.display_id());
            for item in self.plan_structure(extension) {
                if let Planned::Line(verdict, message) = item {
                    section.push(verdict, message);
                }
            }
        }
        report
    }

    fn plan_extension(&self, extension: &Extension) -> Vec<Planned> {
        let mut planned = self.plan_structure(extension);
        if self.check_urls && !extension.versions.is_empty() {
            plan_representative_urls(extension, &mut planned);
            plan_latest_urls(extension, &mut planned);
        }
        planned
    }

    fn plan_structure(&self, extension: &Extension) -> Vec<Planned> {
        let id = extension.display_id();
        let mut planned = Vec::new();

        let Some(latest) = extension.latest_version() else {
            planned.push(fail(format!("[{}] No versions defined", id)));
            return planned;
        };

        check_order(id, &extension.versions, &mut planned);
        self.check_all_versions(id, &extension.versions, &mut planned);
        self.check_latest_platforms(id, latest, &mut planned);
        check_latest_checksums(id, latest, &mut planned);
        planned
    }

    fn check_all_versions(&self, id: &str, versions: &[ExtensionVersion], out: &mut Vec<Planned>) {
        let baseline = self.config.platforms.required_for(PlatformProfile::Baseline);
        let before = out.len();

        for version in versions {
            let tag = format!("[{}@{}]", id, version.version);
            for platform in &baseline {
                if !version.has_platform(platform) {
                    out.push(fail(format!(
                        "{} Missing platform {}: will break installs on that OS",
                        tag, platform
                    )));
                }
            }
            for (platform, artifact) in &version.artifacts {
                match artifact.url() {
                    Some(url) if url.starts_with(HTTPS_PREFIX) => {}
                    url => out.push(fail(format!(
                        "{} {}: non-HTTPS or missing URL: {}",
                        tag,
                        platform,
                        url.unwrap_or("(none)")
                    ))),
                }
                let value = artifact
                    .checksum
                    .as_ref()
                    .and_then(|c| c.value())
                    .unwrap_or_default();
                if is_placeholder_checksum(value) {
                    out.push(fail(format!(
                        "{} {}: placeholder checksum (all zeros)",
                        tag, platform
                    )));
                }
            }
        }

        if out.len() == before {
            out.push(pass(format!(
                "[{}] All {} version(s) have valid platforms, URLs, and checksums",
                id,
                versions.len()
            )));
        }
    }

    fn check_latest_platforms(&self, id: &str, latest: &ExtensionVersion, out: &mut Vec<Planned>) {
        let tag = format!("[{}@{}]", id, latest.version);
        for platform in self.config.validate_platforms() {
            if latest.has_platform(&platform) {
                out.push(pass(format!("{} Has required platform: {}", tag, platform)));
            } else {
                out.push(fail(format!("{} Missing required platform: {}", tag, platform)));
            }
        }
    }
}

fn pass(message: String) -> Planned {
    Planned::Line(Verdict::Pass, message)
}

fn fail(message: String) -> Planned {
    Planned::Line(Verdict::Fail, message)
}

fn check_order(id: &str, versions: &[ExtensionVersion], out: &mut Vec<Planned>) {
    match first_order_violation(versions) {
        Some(index) => out.push(fail(format!(
            "[{}] Versions not in ascending semver order: {} is listed before {}",
            id,
            versions[index - 1].version,
            versions[index].version
        ))),
        None => out.push(pass(format!("[{}] Versions are in ascending semver order", id))),
    }
}

fn check_latest_checksums(id: &str, latest: &ExtensionVersion, out: &mut Vec<Planned>) {
    let tag = format!("[{}@{}]", id, latest.version);
    for (platform, artifact) in &latest.artifacts {
        match checksum_defect(platform, artifact) {
            Some(defect) => out.push(fail(format!("{} {}", tag, defect))),
            None => {
                let algorithm = artifact
                    .checksum
                    .as_ref()
                    .and_then(|c| c.algorithm())
                    .unwrap_or_default();
                out.push(pass(format!(
                    "{} {}: checksum OK ({})",
                    tag, platform, algorithm
                )));
            }
        }
    }
}

/// One probe per version, on `windows/amd64` when it exists
fn plan_representative_urls(extension: &Extension, out: &mut Vec<Planned>) {
    for version in &extension.versions {
        let Some(platform) = version.representative_platform() else {
            continue;
        };
        let Some(url) = version.artifacts.get(platform).and_then(|a| a.url()) else {
            continue;
        };
        out.push(Planned::Probe(ProbeCheck {
            label: format!("[{}@{}] {}", extension.display_id(), version.version, platform),
            url: url.to_string(),
            kind: ProbeKind::Representative,
        }));
    }
}

/// Every platform of the latest version; bad URLs fail without a request
fn plan_latest_urls(extension: &Extension, out: &mut Vec<Planned>) {
    let Some(latest) = extension.latest_version() else {
        return;
    };
    for (platform, artifact) in &latest.artifacts {
        let label = format!("[{}@{}] {}", extension.display_id(), latest.version, platform);
        match artifact.url() {
            None => out.push(fail(format!("{}: missing URL", label))),
            Some(url) if !url.starts_with("http://") && !url.starts_with(HTTPS_PREFIX) => {
                out.push(fail(format!("{}: URL is not HTTP(S): {}", label, url)))
            }
            Some(url) => out.push(Planned::Probe(ProbeCheck {
                label,
                url: url.to_string(),
                kind: ProbeKind::Latest,
            })),
        }
    }
}

fn probe_line(check: &ProbeCheck, result: &ReachabilityResult<usize>) -> (Verdict, String) {
    match &result.outcome {
        Ok(probe) if probe.is_reachable() => {
            let message = match check.kind {
                ProbeKind::Representative => format!("{}: URL reachable", check.label),
                ProbeKind::Latest => format!("{}: URL returned 200", check.label),
            };
            (Verdict::Pass, message)
        }
        Ok(probe) => (
            Verdict::Fail,
            format!("{}: URL returned {}: {}", check.label, probe.status, check.url),
        ),
        Err(e) => (Verdict::Fail, format!("{}: URL error: {}", check.label, e)),
    }
}
