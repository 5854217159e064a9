//! Orchestration of one collection run
//!
//! The [`Aggregator`] fetches every configured source page through a
//! [`PageFetcher`](crate::fetch::PageFetcher), hands each outcome to its source strategy and
//! assembles the results into a [`Snapshot`](crate::records::Snapshot) whose record order follows
//! [`Sources::endpoints`].

mod aggregator;
mod progress;
mod sources_config;

pub use aggregator::{Aggregator, DEFAULT_MAX_CONCURRENT_FETCHES, NOT_FETCHED};
pub use progress::Progress;
pub use sources_config::{SourceEndpoint, Sources};
