//! Bounded-concurrency reachability pool
//!
//! Jobs run with at most `concurrency` requests in flight. Each result is
//! slotted back by job index, so the returned list is in submission order
//! no matter which request finishes first.

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::reachability::{Probe, ReachabilityChecker, ReachabilityError};

/// One URL to check, tagged with caller-defined attribution
#[derive(Debug, Clone)]
pub struct ReachabilityJob<K> {
    pub key: K,
    pub url: String,
}

impl<K> ReachabilityJob<K> {
    pub fn new(key: K, url: impl Into<String>) -> Self {
        Self {
            key,
            url: url.into(),
        }
    }
}

/// Outcome of a job, still carrying its key
#[derive(Debug, Clone)]
pub struct ReachabilityResult<K> {
    pub key: K,
    pub url: String,
    pub outcome: Result<Probe, ReachabilityError>,
}

impl<K> ReachabilityResult<K> {
    /// Final status was 200
    pub fn is_reachable(&self) -> bool {
        matches!(&self.outcome, Ok(probe) if probe.is_reachable())
    }
}

/// Runs reachability jobs with fixed parallelism
pub struct ReachabilityPool {
    checker: ReachabilityChecker,
    concurrency: usize,
}

impl ReachabilityPool {
    pub fn new(checker: ReachabilityChecker, concurrency: usize) -> Self {
        Self {
            checker,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run every job; results come back in job order
    pub async fn run<K>(&self, jobs: Vec<ReachabilityJob<K>>) -> Vec<ReachabilityResult<K>> {
        let total = jobs.len();
        debug!(
            "Checking {} URL(s) with up to {} in flight",
            total, self.concurrency
        );

        let semaphore = Semaphore::new(self.concurrency);
        let checker = &self.checker;
        let semaphore = &semaphore;

        let mut futures = FuturesUnordered::new();
        for (index, job) in jobs.into_iter().enumerate() {
            futures.push(async move {
                let _permit = semaphore.acquire().await.ok();
                let outcome = checker.check(&job.url).await;
                (
                    index,
                    ReachabilityResult {
                        key: job.key,
                        url: job.url,
                        outcome,
                    },
                )
            });
        }

        let mut slots: Vec<Option<ReachabilityResult<K>>> = (0..total).map(|_| None).collect();
        while let Some((index, result)) = futures.next().await {
            slots[index] = Some(result);
        }

        slots.into_iter().flatten().collect()
    }
}
