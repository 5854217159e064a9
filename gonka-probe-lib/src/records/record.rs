use compact_str::CompactString;
use serde::{Serialize, Serializer};

/// The result of one source strategy.
///
/// A failed record carries the reason verbatim. An available record may still have every data
/// field absent: a missed pattern is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<T> {
    /// The page was retrieved and extraction ran.
    Available(T),

    /// The page could not be retrieved.
    Failed(CompactString),
}

impl<T> Record<T> {
    /// Returns `true` if the record is `Available`.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Returns a reference to the extracted data if `Available`, otherwise `None`.
    #[must_use]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Available(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure reason if `Failed`, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Failed(reason) => Some(reason.as_str()),
        }
    }

    pub fn failed(reason: impl Into<CompactString>) -> Self {
        Self::Failed(reason.into())
    }
}

#[derive(Serialize)]
struct FlatRecord<'a, T> {
    #[serde(flatten)]
    fields: &'a T,
    error: Option<&'a str>,
}

/// A record serializes as the mapping of its data fields plus an `error` key. Failed records
/// serialize every data field as `null`.
impl<T: Serialize + Default> Serialize for Record<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(fields) => FlatRecord { fields, error: None }.serialize(serializer),
            Self::Failed(reason) => {
                let empty = T::default();
                FlatRecord {
                    fields: &empty,
                    error: Some(reason.as_str()),
                }
                .serialize(serializer)
            }
        }
    }
}
