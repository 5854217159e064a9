//! Integration tests for the aggregator using scripted page fetchers

use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;
use gonka_probe_lib::aggregate::{Aggregator, Progress, SourceEndpoint, Sources};
use gonka_probe_lib::fetch::{FetchOutcome, LoadedPage, PageFetcher, PageRequest, TIMEOUT};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

/// No-op progress reporter for testing
#[derive(Debug)]
struct NoOpProgress;

impl Progress for NoOpProgress {
    fn set_phase(&self, _phase: &str) {}
    fn source_finished(&self, _completed: u64, _total: u64, _source: &str) {}
    fn done(&self) {}
}

/// Progress reporter that remembers every callback
#[derive(Debug, Default, Clone)]
struct RecordingProgress {
    events: Arc<Mutex<Vec<String>>>,
}

impl Progress for RecordingProgress {
    fn set_phase(&self, phase: &str) {
        self.events.lock().unwrap().push(format!("phase {phase}"));
    }

    fn source_finished(&self, completed: u64, total: u64, _source: &str) {
        self.events.lock().unwrap().push(format!("{completed}/{total}"));
    }

    fn done(&self) {
        self.events.lock().unwrap().push("done".to_string());
    }
}

/// Progress reporter that fails on every finished source
#[derive(Debug)]
struct PanickingProgress;

impl Progress for PanickingProgress {
    fn set_phase(&self, _phase: &str) {}

    fn source_finished(&self, _completed: u64, _total: u64, source: &str) {
        panic!("progress bar broke on {source}");
    }

    fn done(&self) {
        panic!("progress bar broke when finishing");
    }
}

#[derive(Debug, Clone)]
enum Script {
    Page(&'static str, &'static str),
    Fail(&'static str),
    Hang,
    Panic,
}

/// Fetcher answering from a per-URL script and recording what it was asked.
#[derive(Debug, Default)]
struct ScriptedFetcher {
    scripts: HashMap<String, Script>,
    requests: Mutex<Vec<(String, usize)>>,
    closes: AtomicUsize,
}

impl ScriptedFetcher {
    fn with(mut self, url: &str, script: Script) -> Self {
        let _ = self.scripts.insert(url.to_string(), script);
        self
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> FetchOutcome {
        self.requests
            .lock()
            .unwrap()
            .push((request.url.to_string(), request.overlay_selectors.len()));

        match self.scripts.get(request.url.as_str()).cloned() {
            Some(Script::Page(text, markup)) => FetchOutcome::Loaded(LoadedPage::new(text, markup)),
            Some(Script::Fail(reason)) => FetchOutcome::failed(reason),
            Some(Script::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                FetchOutcome::failed("unreachable")
            }
            Some(Script::Panic) => panic!("renderer crashed"),
            None => FetchOutcome::failed("no script"),
        }
    }

    async fn close(&self) {
        let _ = self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn endpoint(url: &str, timeout: Duration) -> SourceEndpoint {
    SourceEndpoint::new(Url::parse(url).unwrap(), timeout)
}

fn sources(timeout: Duration) -> Sources {
    Sources {
        nodes: vec![
            endpoint("http://node1.example:8000/", timeout),
            endpoint("http://node2.example:8000/", timeout),
        ],
        community: endpoint("https://community.example/invite/abc", timeout),
        follower: endpoint("https://social.example/gonka", timeout),
        repository: endpoint("https://code.example/gonka/gonka", timeout),
        price: endpoint("https://otc.example/gonka", timeout),
    }
}

const NODE_MARKUP: &str = r#"<div class="card bg-base-100"><span data-value="Total Compute Power">Total Compute Power</span><h6><span data-value="1 204 TH/s">1 204 TH/s</span></h6></div>"#;
const STAR_MARKUP: &str = r#"<a href="/gonka/gonka/stargazers"><span class="Counter">312</span></a>"#;

#[tokio::test]
async fn test_one_record_per_source_with_one_node_down() {
    let fetcher = ScriptedFetcher::default()
        .with("http://node1.example:8000/", Script::Page("Validators 57 Next PoC 0h 42m 10s", NODE_MARKUP))
        .with("http://node2.example:8000/", Script::Fail("HTTP 502"))
        .with("https://community.example/invite/abc", Script::Page("1 234 online 25 000 members", ""))
        .with("https://social.example/gonka", Script::Page("Gonka 8 431 Followers", ""))
        .with("https://code.example/gonka/gonka", Script::Page("", STAR_MARKUP))
        .with("https://otc.example/gonka", Script::Page("Buy Price $0.05 Sell Price $0.045", ""));

    let aggregator = Aggregator::new(fetcher, NoOpProgress);
    let snapshot = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    assert_eq!(snapshot.record_count(), 6);
    assert_eq!(snapshot.failed_count(), 1);

    let node1 = snapshot.nodes[0].metrics.as_ref().unwrap();
    assert_eq!(snapshot.nodes[0].source_identifier, "http://node1.example:8000/");
    assert_eq!(node1.total_compute_power.as_deref(), Some("1 204 TH/s"));
    assert_eq!(node1.validators.as_deref(), Some("57"));
    assert_eq!(node1.next_round_eta.as_deref(), Some("0h 42m 10s"));

    assert!(!snapshot.nodes[1].reachable());
    assert_eq!(snapshot.nodes[1].error(), Some("HTTP 502"));

    let community = snapshot.community.as_ref().unwrap();
    assert_eq!(community.online_count.as_deref(), Some("1 234"));
    assert_eq!(community.member_count.as_deref(), Some("25 000"));

    assert_eq!(snapshot.follower.as_ref().unwrap().follower_count.as_deref(), Some("8 431"));
    assert_eq!(snapshot.repository.as_ref().unwrap().star_count.as_deref(), Some("312"));
    assert_eq!(snapshot.price.as_ref().unwrap().price.as_deref(), Some("0.045"));
}

#[tokio::test]
async fn test_requests_follow_snapshot_order_and_close_once() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let aggregator = Aggregator::new(SharedFetcher(Arc::clone(&fetcher)), NoOpProgress);
    let _ = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    let requests = fetcher.requests.lock().unwrap().clone();
    let urls: Vec<_> = requests.iter().map(|(url, _)| url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "http://node1.example:8000/",
            "http://node2.example:8000/",
            "https://community.example/invite/abc",
            "https://social.example/gonka",
            "https://code.example/gonka/gonka",
            "https://otc.example/gonka",
        ]
    );

    // Only the price page asks for overlays to be dismissed.
    let overlay_counts: Vec<_> = requests.iter().map(|(_, count)| *count).collect();
    assert_eq!(overlay_counts, [0, 0, 0, 0, 0, 6]);

    assert_eq!(fetcher.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_every_source_times_out() {
    let mut fetcher = ScriptedFetcher::default();
    for (_, endpoint) in sources(Duration::ZERO).endpoints() {
        fetcher = fetcher.with(endpoint.url.as_str(), Script::Hang);
    }
    let fetcher = Arc::new(fetcher);

    let aggregator = Aggregator::new(SharedFetcher(Arc::clone(&fetcher)), NoOpProgress).with_max_concurrent_fetches(6);
    let snapshot = aggregator.aggregate(&sources(Duration::from_millis(50))).await;

    assert_eq!(snapshot.record_count(), 6);
    assert_eq!(snapshot.failed_count(), 6);
    assert!(snapshot.nodes.iter().all(|node| node.error() == Some(TIMEOUT)));
    assert_eq!(snapshot.community.error(), Some(TIMEOUT));
    assert_eq!(snapshot.follower.error(), Some(TIMEOUT));
    assert_eq!(snapshot.repository.error(), Some(TIMEOUT));
    assert_eq!(snapshot.price.error(), Some(TIMEOUT));
    assert_eq!(fetcher.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_panicking_fetch_is_contained() {
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .with("https://social.example/gonka", Script::Panic)
            .with("https://code.example/gonka/gonka", Script::Page("", STAR_MARKUP)),
    );

    let aggregator = Aggregator::new(SharedFetcher(Arc::clone(&fetcher)), NoOpProgress);
    let snapshot = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    assert_eq!(snapshot.follower.error(), Some("renderer crashed"));
    assert_eq!(snapshot.repository.as_ref().unwrap().star_count.as_deref(), Some("312"));
    assert_eq!(fetcher.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_panicking_progress_still_closes_fetcher() {
    let fetcher = Arc::new(ScriptedFetcher::default().with("https://code.example/gonka/gonka", Script::Page("", STAR_MARKUP)));

    let aggregator = Aggregator::new(SharedFetcher(Arc::clone(&fetcher)), PanickingProgress);
    let snapshot = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    assert_eq!(snapshot.record_count(), 6);
    assert_eq!(snapshot.repository.as_ref().unwrap().star_count.as_deref(), Some("312"));
    assert_eq!(fetcher.requests.lock().unwrap().len(), 6);
    assert_eq!(fetcher.closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_loaded_page_without_matches_is_available() {
    let fetcher = ScriptedFetcher::default().with("https://otc.example/gonka", Script::Page("Maintenance in progress", ""));

    let aggregator = Aggregator::new(fetcher, NoOpProgress);
    let snapshot = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    assert!(snapshot.price.is_available());
    assert_eq!(snapshot.price.as_ref().unwrap().price, None);
    assert_eq!(snapshot.price.error(), None);
}

#[tokio::test]
async fn test_progress_reports_every_source() {
    let progress = RecordingProgress::default();
    let aggregator = Aggregator::new(ScriptedFetcher::default(), progress.clone());
    let _ = aggregator.aggregate(&sources(Duration::from_secs(5))).await;

    let events = progress.events.lock().unwrap().clone();
    assert_eq!(
        events,
        ["phase Fetching", "1/6", "2/6", "3/6", "4/6", "5/6", "6/6", "phase Extracting", "done"]
    );
}

/// Lets a test keep a handle on the fetcher after handing it to the aggregator.
#[derive(Debug)]
struct SharedFetcher(Arc<ScriptedFetcher>);

impl PageFetcher for SharedFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> FetchOutcome {
        self.0.fetch_page(request).await
    }

    async fn close(&self) {
        self.0.close().await;
    }
}
