use super::page_text::body_text;
use super::{FetchOutcome, LoadedPage, NO_RESPONSE, PageFetcher, PageRequest, TIMEOUT, http_status_reason};
use crate::Result;
use compact_str::CompactString;
use core::error::Error;
use ohno::IntoAppError;

const LOG_TARGET: &str = "      http";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("gonka-probe/", env!("CARGO_PKG_VERSION"));

/// A [`PageFetcher`] that reads pages over plain HTTP without executing scripts.
///
/// Pages rendered client-side yield only their server markup. Overlays cannot be dismissed by a
/// static fetch, so overlay selectors are ignored. A successful status with an empty body fails
/// with [`NO_RESPONSE`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher.
    ///
    /// `accept_invalid_certs` disables certificate validation, for node dashboards served with
    /// self-signed certificates.
    pub fn new(user_agent: &str, accept_invalid_certs: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> FetchOutcome {
        log::info!(target: LOG_TARGET, "Fetching '{}'", request.url);

        if !request.overlay_selectors.is_empty() {
            log::debug!(
                target: LOG_TARGET,
                "Ignoring {} overlay selector(s) for '{}': static fetches cannot interact with the page",
                request.overlay_selectors.len(),
                request.url
            );
        }

        let response = match self.client.get(request.url.clone()).timeout(request.timeout).send().await {
            Ok(response) => response,
            Err(e) => return failure(&e),
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            log::warn!(target: LOG_TARGET, "'{}' answered with status {status}", request.url);
            return FetchOutcome::Failed(http_status_reason(status.as_u16()));
        }

        let markup = match response.text().await {
            Ok(markup) => markup,
            Err(e) => return failure(&e),
        };

        log::debug!(target: LOG_TARGET, "Read {} bytes of markup from '{}'", markup.len(), request.url);

        // an empty document is what a browser reports as no response
        if markup.trim().is_empty() {
            log::warn!(target: LOG_TARGET, "'{}' answered with an empty body", request.url);
            return FetchOutcome::failed(NO_RESPONSE);
        }

        let text = body_text(&markup);
        FetchOutcome::Loaded(LoadedPage { text, markup })
    }
}

fn failure(error: &reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        return FetchOutcome::failed(TIMEOUT);
    }

    log::warn!(target: LOG_TARGET, "HTTP request failed: {error}");
    FetchOutcome::Failed(describe(error))
}

/// Render an error with its chain of sources.
fn describe(error: &(dyn Error + 'static)) -> CompactString {
    let mut message = CompactString::from(error.to_string());
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
