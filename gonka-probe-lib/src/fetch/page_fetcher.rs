use compact_str::{CompactString, format_compact};
use core::time::Duration;
use url::Url;

/// Reason reported when a page never produced a response.
pub const NO_RESPONSE: &str = "No response";

/// Reason reported when a fetch exceeds its time budget.
pub const TIMEOUT: &str = "Timeout";

/// Reason reported for an HTTP error status.
#[must_use]
pub fn http_status_reason(code: u16) -> CompactString {
    format_compact!("HTTP {code}")
}

/// What to fetch and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: Url,
    pub timeout: Duration,

    /// Overlays to dismiss, best effort, before the page is read.
    pub overlay_selectors: &'static [&'static str],
}

impl PageRequest {
    #[must_use]
    pub const fn new(url: Url, timeout: Duration) -> Self {
        Self {
            url,
            timeout,
            overlay_selectors: &[],
        }
    }

    #[must_use]
    pub const fn with_overlay_selectors(mut self, selectors: &'static [&'static str]) -> Self {
        self.overlay_selectors = selectors;
        self
    }
}

/// The rendered content of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPage {
    /// The visible body text.
    pub text: String,

    /// The page markup.
    pub markup: String,
}

impl LoadedPage {
    #[must_use]
    pub fn new(text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: markup.into(),
        }
    }
}

/// The outcome of fetching one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(LoadedPage),
    Failed(CompactString),
}

impl FetchOutcome {
    pub fn failed(reason: impl Into<CompactString>) -> Self {
        Self::Failed(reason.into())
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Retrieves rendered pages.
///
/// This is the only boundary the extraction engine touches. Implementations navigate to the
/// requested URL, wait for the content to be ready, dismiss the requested overlays on a best-effort
/// basis, and report failures as reasons rather than errors: [`NO_RESPONSE`], an
/// [`http_status_reason`], [`TIMEOUT`], or any other message.
///
/// One fetcher may be shared across all sources of a run; [`PageFetcher::close`] is called exactly
/// once when the run's fetches are over.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, request: &PageRequest) -> impl Future<Output = FetchOutcome> + Send;

    /// Release the session held by the fetcher.
    fn close(&self) -> impl Future<Output = ()> + Send {
        core::future::ready(())
    }
}
