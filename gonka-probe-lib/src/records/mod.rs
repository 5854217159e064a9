//! Typed result containers produced by the source strategies.
//!
//! Each strategy yields a [`Record`] over its own metrics struct. Records are created fresh for
//! every run and never merged; the [`Snapshot`] gathers one record per configured source.

mod metrics;
mod node_record;
mod record;
mod snapshot;

pub use metrics::{CommunityMetrics, FollowerMetrics, NodeMetrics, PriceMetrics, RepositoryMetrics};
pub use node_record::NodeRecord;
pub use record::Record;
pub use snapshot::Snapshot;
