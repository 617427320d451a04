//! Scatter-gather dispatcher
//!
//! Spawns one tokio task per job, lets every job run concurrently, and waits
//! for all of them before handing back the gathered outcomes. Jobs run exactly
//! once; there is no retry, no backoff and no cap on jobs in flight.

use crate::fetch::worker::{fetch_one, FetchJob, FetchOutcome, DEFAULT_TIMEOUT, TRANSPORT_ERROR_SENTINEL};
use crate::fetch::Transport;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcomes keyed by the literal URL string
///
/// A URL submitted twice occupies one entry holding whichever outcome was
/// merged last.
pub type ScrapeResultSet = BTreeMap<String, FetchOutcome>;

/// Fans fetch jobs out across the runtime and gathers their outcomes
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher with the given transport and per-job timeout
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Creates a dispatcher using the default five second timeout
    pub fn with_default_timeout(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, DEFAULT_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs every job and returns the outcome recorded for each URL
    ///
    /// Resolves only once every job has an outcome; partial results are never
    /// visible to the caller.
    pub async fn dispatch(&self, jobs: Vec<FetchJob>) -> ScrapeResultSet {
        let mut results = ScrapeResultSet::new();
        for (url, outcome) in self.run_all(jobs).await {
            results.insert(url, outcome);
        }
        results
    }

    /// Runs every job and returns the URLs whose outcome was HTTP 200
    ///
    /// URLs come back in completion order, not submission order.
    pub async fn dispatch_probe(&self, jobs: Vec<FetchJob>) -> Vec<String> {
        self.run_all(jobs)
            .await
            .into_iter()
            .filter(|(_, outcome)| outcome.status() == Some(200))
            .map(|(url, _)| url)
            .collect()
    }

    /// Spawns all jobs and collects `(url, outcome)` pairs as they complete
    async fn run_all(&self, jobs: Vec<FetchJob>) -> Vec<(String, FetchOutcome)> {
        let total = jobs.len();
        let start = Instant::now();
        tracing::debug!("Dispatching {} jobs", total);

        let mut pending: FuturesUnordered<_> = jobs
            .into_iter()
            .map(|job| {
                let transport = Arc::clone(&self.transport);
                let timeout = self.timeout;
                let url = job.url.clone();
                let handle =
                    tokio::spawn(async move { fetch_one(transport.as_ref(), &job, timeout).await });

                async move {
                    let outcome = match handle.await {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            // The job still owes an outcome even if its task died.
                            tracing::warn!("Fetch task for {} failed: {}", url, err);
                            FetchOutcome::Error(format!(
                                "{}worker task failed: {}",
                                TRANSPORT_ERROR_SENTINEL, err
                            ))
                        }
                    };
                    (url, outcome)
                }
            })
            .collect();

        let mut completed = Vec::with_capacity(total);
        while let Some(entry) = pending.next().await {
            completed.push(entry);
        }

        let failed = completed.iter().filter(|(_, o)| o.is_error()).count();
        tracing::info!(
            "Dispatch complete: {} jobs, {} transport errors, {:?}",
            total,
            failed,
            start.elapsed()
        );

        completed
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
