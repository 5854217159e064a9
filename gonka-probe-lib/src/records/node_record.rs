use super::{NodeMetrics, Record};
use compact_str::CompactString;
use serde::Serialize;

/// The record for one configured node endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub source_identifier: CompactString,
    pub metrics: Record<NodeMetrics>,
}

impl NodeRecord {
    #[must_use]
    pub const fn new(source_identifier: CompactString, metrics: Record<NodeMetrics>) -> Self {
        Self { source_identifier, metrics }
    }

    /// Whether the node's dashboard could be retrieved.
    #[must_use]
    pub const fn reachable(&self) -> bool {
        self.metrics.is_available()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.metrics.error()
    }
}

#[derive(Serialize)]
struct NodeRecordView<'a> {
    source_identifier: &'a str,
    reachable: bool,
    #[serde(flatten)]
    metrics: &'a Record<NodeMetrics>,
}

impl Serialize for NodeRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRecordView {
            source_identifier: self.source_identifier.as_str(),
            reachable: self.reachable(),
            metrics: &self.metrics,
        }
        .serialize(serializer)
    }
}
