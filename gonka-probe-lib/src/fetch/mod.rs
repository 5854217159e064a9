//! Page retrieval boundary
//!
//! The extraction engine never talks to the network itself. It asks a [`PageFetcher`] for the
//! rendered text and markup of a page and receives a [`FetchOutcome`]: either the loaded page or a
//! failure reason string. [`fetch_guarded`] wraps every fetch with its time budget and contains
//! panics, so no fault can cross from one source into another.
//!
//! [`HttpFetcher`] is the bundled static implementation. Browser-backed implementations plug in
//! through the same trait.

mod guard;
mod http_fetcher;
mod page_fetcher;
mod page_text;

pub use guard::{fetch_guarded, panic_reason};
pub use http_fetcher::{DEFAULT_USER_AGENT, HttpFetcher};
pub use page_fetcher::{FetchOutcome, LoadedPage, NO_RESPONSE, PageFetcher, PageRequest, TIMEOUT, http_status_reason};
pub use page_text::body_text;
