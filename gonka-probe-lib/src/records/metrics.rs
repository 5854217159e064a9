use compact_str::CompactString;
use serde::Serialize;

/// Metrics read from a compute-node dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeMetrics {
    pub total_compute_power: Option<CompactString>,
    pub validators: Option<CompactString>,
    pub next_round_eta: Option<CompactString>,
}

/// Counts read from a community invite page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommunityMetrics {
    pub online_count: Option<CompactString>,
    pub member_count: Option<CompactString>,
}

/// Follower count read from a social profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowerMetrics {
    pub follower_count: Option<CompactString>,
}

/// Star count read from a repository page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryMetrics {
    pub star_count: Option<CompactString>,
}

/// Current price read from an exchange page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceMetrics {
    pub price: Option<CompactString>,
}
