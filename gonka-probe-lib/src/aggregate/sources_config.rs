use crate::sources::SourceKind;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use url::Url;

/// One page to fetch and the time budget for fetching it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEndpoint {
    pub url: Url,

    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl SourceEndpoint {
    #[must_use]
    pub const fn new(url: Url, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

/// The complete, immutable list of sources covered by an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Sources {
    /// Node dashboards, in report order.
    #[serde(default)]
    pub nodes: Vec<SourceEndpoint>,
    pub community: SourceEndpoint,
    pub follower: SourceEndpoint,
    pub repository: SourceEndpoint,
    pub price: SourceEndpoint,
}

impl Sources {
    /// Every endpoint in snapshot order: nodes first, then the four singleton sources.
    pub fn endpoints(&self) -> impl Iterator<Item = (SourceKind, &SourceEndpoint)> {
        self.nodes
            .iter()
            .map(|endpoint| (SourceKind::Node, endpoint))
            .chain([
                (SourceKind::Community, &self.community),
                (SourceKind::Follower, &self.follower),
                (SourceKind::Repository, &self.repository),
                (SourceKind::Price, &self.price),
            ])
    }

    /// The number of records a snapshot of these sources holds.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.nodes.len() + 4
    }
}
