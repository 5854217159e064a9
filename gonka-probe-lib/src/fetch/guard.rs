use super::{FetchOutcome, PageFetcher, PageRequest, TIMEOUT};
use compact_str::CompactString;
use core::any::Any;
use core::panic::AssertUnwindSafe;
use futures_util::FutureExt;

const LOG_TARGET: &str = "     fetch";

/// Fetch a page with the request's timeout applied and any panic contained.
///
/// Never fails: a timeout becomes [`TIMEOUT`], a panic inside the fetcher becomes a failure
/// carrying the panic message.
pub async fn fetch_guarded<F: PageFetcher>(fetcher: &F, request: &PageRequest) -> FetchOutcome {
    let attempt = AssertUnwindSafe(fetcher.fetch_page(request)).catch_unwind();

    match tokio::time::timeout(request.timeout, attempt).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(payload)) => {
            let reason = panic_reason(payload.as_ref());
            log::error!(target: LOG_TARGET, "Fetching '{}' panicked: {reason}", request.url);
            FetchOutcome::Failed(reason)
        }
        Err(_) => {
            log::warn!(target: LOG_TARGET, "Fetching '{}' timed out after {:?}", request.url, request.timeout);
            FetchOutcome::failed(TIMEOUT)
        }
    }
}

/// Extract a readable message from a panic payload.
#[must_use]
pub fn panic_reason(payload: &(dyn Any + Send)) -> CompactString {
    if let Some(message) = payload.downcast_ref::<&str>() {
        CompactString::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        CompactString::from(message.as_str())
    } else {
        CompactString::const_new("unexpected fault")
    }
}
