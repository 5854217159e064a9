use super::{Progress, Sources};
use crate::fetch::{FetchOutcome, PageFetcher, PageRequest, fetch_guarded, panic_reason};
use crate::records::{NodeRecord, Record, Snapshot};
use crate::sources::{SourceKind, community, follower, node, price, repository};
use chrono::Utc;
use compact_str::CompactString;
use core::panic::AssertUnwindSafe;
use core::sync::atomic::{AtomicU64, Ordering};
use futures_util::{StreamExt, stream};
use std::sync::Arc;

const LOG_TARGET: &str = "aggregator";

/// Reason recorded for a source whose fetch produced no outcome at all.
pub const NOT_FETCHED: &str = "page was not fetched";

/// The default number of pages fetched at the same time.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 1;

/// Runs every source strategy and assembles their records into a [`Snapshot`].
pub struct Aggregator<F> {
    fetcher: F,
    progress: Arc<dyn Progress>,
    max_concurrent_fetches: usize,
}

impl<F: core::fmt::Debug> core::fmt::Debug for Aggregator<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aggregator")
            .field("fetcher", &self.fetcher)
            .field("progress", &"<dyn Progress>")
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .finish()
    }
}

impl<F: PageFetcher> Aggregator<F> {
    pub fn new(fetcher: F, progress: impl Progress + 'static) -> Self {
        Self {
            fetcher,
            progress: Arc::new(progress),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Allow up to `limit` fetches in flight at once. Values below one are treated as one.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Fetch every source page and extract one record per source.
    ///
    /// Never fails. Whatever goes wrong for one source ends up as that source's failed record and
    /// the remaining sources are still processed. The fetcher is closed exactly once, after the
    /// last fetch and before extraction begins. A panicking [`Progress`] is logged and ignored.
    pub async fn aggregate(&self, sources: &Sources) -> Snapshot {
        let collected_at = Utc::now();

        let jobs: Vec<_> = sources
            .endpoints()
            .map(|(kind, endpoint)| {
                let request = PageRequest::new(endpoint.url.clone(), endpoint.timeout);
                let request = if kind == SourceKind::Price {
                    request.with_overlay_selectors(price::OVERLAY_SELECTORS)
                } else {
                    request
                };
                (kind, request)
            })
            .collect();

        log::info!(target: LOG_TARGET, "Collecting {} sources", sources.record_count());

        self.notify(|progress| progress.set_phase("Fetching"));
        let outcomes = self.fetch_all(&jobs).await;
        self.fetcher.close().await;

        self.notify(|progress| progress.set_phase("Extracting"));
        let snapshot = assemble(sources, outcomes, collected_at);
        self.notify(|progress| progress.done());

        log::info!(
            target: LOG_TARGET,
            "Collected {} records, {} unavailable",
            snapshot.record_count(),
            snapshot.failed_count()
        );

        snapshot
    }

    async fn fetch_all(&self, jobs: &[(SourceKind, PageRequest)]) -> Vec<FetchOutcome> {
        let total = jobs.len() as u64;
        let completed = AtomicU64::new(0);
        let completed = &completed;

        stream::iter(jobs)
            .map(|(kind, request)| async move {
                log::debug!(target: LOG_TARGET, "Fetching {kind} page '{}'", request.url);
                let outcome = fetch_guarded(&self.fetcher, request).await;

                if let FetchOutcome::Failed(reason) = &outcome {
                    log::warn!(target: LOG_TARGET, "Unable to retrieve {kind} page '{}': {reason}", request.url);
                }

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                self.notify(|progress| progress.source_finished(done, total, &format!("{kind} {}", request.url)));
                outcome
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await
    }

    fn notify(&self, update: impl FnOnce(&dyn Progress)) {
        let progress = self.progress.as_ref();
        if let Err(payload) = std::panic::catch_unwind(AssertUnwindSafe(|| update(progress))) {
            log::error!(target: LOG_TARGET, "Progress reporter panicked: {}", panic_reason(payload.as_ref()));
        }
    }
}

/// Pair every source with its outcome, in order, and run its strategy.
fn assemble(sources: &Sources, outcomes: Vec<FetchOutcome>, collected_at: chrono::DateTime<Utc>) -> Snapshot {
    let mut outcomes = outcomes.into_iter();
    let mut next_outcome = || outcomes.next().unwrap_or_else(|| FetchOutcome::failed(NOT_FETCHED));

    let nodes = sources
        .nodes
        .iter()
        .map(|endpoint| {
            let outcome = next_outcome();
            let identifier = endpoint.url.as_str();
            contained(
                SourceKind::Node,
                || node::extract(identifier, &outcome),
                |reason| NodeRecord::new(CompactString::from(identifier), Record::Failed(reason)),
            )
        })
        .collect();

    let outcome = next_outcome();
    let community = contained(SourceKind::Community, || community::extract(&outcome), Record::Failed);

    let outcome = next_outcome();
    let follower = contained(SourceKind::Follower, || follower::extract(&outcome), Record::Failed);

    let outcome = next_outcome();
    let repository = contained(SourceKind::Repository, || repository::extract(&outcome), Record::Failed);

    let outcome = next_outcome();
    let price = contained(SourceKind::Price, || price::extract(&outcome), Record::Failed);

    Snapshot {
        collected_at,
        nodes,
        community,
        follower,
        repository,
        price,
    }
}

/// Run one strategy, turning a panic into a failed record for that source only.
fn contained<T>(kind: SourceKind, extract: impl FnOnce() -> T, on_fault: impl FnOnce(CompactString) -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(record) => record,
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            log::error!(target: LOG_TARGET, "Extraction of {kind} page panicked: {reason}");
            on_fault(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SourceEndpoint;
    use crate::fetch::LoadedPage;
    use core::time::Duration;
    use url::Url;

    struct NoProgress;

    impl Progress for NoProgress {
        fn set_phase(&self, _phase: &str) {}
        fn source_finished(&self, _completed: u64, _total: u64, _source: &str) {}
        fn done(&self) {}
    }

    fn endpoint(url: &str) -> SourceEndpoint {
        SourceEndpoint::new(Url::parse(url).unwrap(), Duration::from_secs(5))
    }

    fn sources(node_count: usize) -> Sources {
        Sources {
            nodes: (0..node_count).map(|i| endpoint(&format!("http://node{i}.example:8000"))).collect(),
            community: endpoint("https://community.example/invite/x"),
            follower: endpoint("https://follower.example/user"),
            repository: endpoint("https://repo.example/org/repo"),
            price: endpoint("https://price.example/otc/token"),
        }
    }

    #[test]
    fn test_assemble_missing_outcomes_become_failures() {
        let outcomes = vec![FetchOutcome::Loaded(LoadedPage::new("Validators 4", ""))];
        let snapshot = assemble(&sources(1), outcomes, Utc::now());

        assert!(snapshot.nodes[0].reachable());
        assert_eq!(snapshot.community, Record::failed(NOT_FETCHED));
        assert_eq!(snapshot.price, Record::failed(NOT_FETCHED));
        assert_eq!(snapshot.record_count(), 5);
        assert_eq!(snapshot.failed_count(), 4);
    }

    #[test]
    fn test_assemble_keeps_node_order() {
        let outcomes = vec![
            FetchOutcome::failed("HTTP 502"),
            FetchOutcome::Loaded(LoadedPage::new("", "")),
            FetchOutcome::failed("Timeout"),
        ];
        let snapshot = assemble(&sources(3), outcomes, Utc::now());

        let identifiers: Vec<_> = snapshot.nodes.iter().map(|n| n.source_identifier.as_str()).collect();
        assert_eq!(identifiers, ["http://node0.example:8000/", "http://node1.example:8000/", "http://node2.example:8000/"]);
        assert_eq!(snapshot.nodes[0].error(), Some("HTTP 502"));
        assert!(snapshot.nodes[1].reachable());
        assert_eq!(snapshot.nodes[2].error(), Some("Timeout"));
    }

    #[test]
    fn test_contained_turns_panic_into_failure() {
        let record: Record<u32> = contained(SourceKind::Follower, || panic!("broken strategy"), Record::Failed);
        assert_eq!(record, Record::failed("broken strategy"));
    }

    #[test]
    fn test_with_max_concurrent_fetches_floor() {
        #[derive(Debug)]
        struct Idle;

        impl PageFetcher for Idle {
            async fn fetch_page(&self, _request: &PageRequest) -> FetchOutcome {
                FetchOutcome::failed("idle")
            }
        }

        let aggregator = Aggregator::new(Idle, NoProgress).with_max_concurrent_fetches(0);
        assert_eq!(aggregator.max_concurrent_fetches, 1);
    }
}
