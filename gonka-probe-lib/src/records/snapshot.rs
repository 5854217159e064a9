use super::{CommunityMetrics, FollowerMetrics, NodeRecord, PriceMetrics, Record, RepositoryMetrics};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every record produced by one aggregation run.
///
/// A snapshot always holds exactly one record per configured source. Node records keep the
/// configured endpoint order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub collected_at: DateTime<Utc>,
    pub nodes: Vec<NodeRecord>,
    pub community: Record<CommunityMetrics>,
    pub follower: Record<FollowerMetrics>,
    pub repository: Record<RepositoryMetrics>,
    pub price: Record<PriceMetrics>,
}

impl Snapshot {
    /// The number of records, one per configured source.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.nodes.len() + 4
    }

    /// The number of records whose source could not be retrieved.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        let singletons = [
            self.community.is_available(),
            self.follower.is_available(),
            self.repository.is_available(),
            self.price.is_available(),
        ];

        self.nodes.iter().filter(|node| !node.reachable()).count() + singletons.iter().filter(|available| !**available).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::NodeMetrics;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Snapshot {
        Snapshot {
            collected_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
            nodes: vec![
                NodeRecord::new("http://a".into(), Record::Available(NodeMetrics::default())),
                NodeRecord::new("http://b".into(), Record::failed("Timeout")),
            ],
            community: Record::Available(CommunityMetrics {
                online_count: Some("1 234".into()),
                member_count: Some("5 678".into()),
            }),
            follower: Record::failed("HTTP 403"),
            repository: Record::Available(RepositoryMetrics { star_count: Some("87".into()) }),
            price: Record::Available(PriceMetrics::default()),
        }
    }

    #[test]
    fn test_counts() {
        let snapshot = sample();
        assert_eq!(snapshot.record_count(), 6);
        assert_eq!(snapshot.failed_count(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["collected_at"], json!("2026-01-15T10:30:00Z"));
        assert_eq!(value["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["nodes"][1]["error"], json!("Timeout"));
        assert_eq!(value["community"]["online_count"], json!("1 234"));
        assert_eq!(value["follower"], json!({ "follower_count": null, "error": "HTTP 403" }));
        assert_eq!(value["repository"]["star_count"], json!("87"));
        assert_eq!(value["price"], json!({ "price": null, "error": null }));
    }
}
