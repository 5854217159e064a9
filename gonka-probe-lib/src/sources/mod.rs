//! Per-source extraction strategies
//!
//! Each strategy turns the [`FetchOutcome`] of its source page into a [`Record`]. A failed fetch
//! becomes a failed record carrying the same reason and nothing else is attempted. A loaded page
//! always becomes an available record, whatever the patterns managed to find.
//!
//! Strategies are pure functions of the page so they can be fed synthetic text and markup.
//!
//! | Source | Searched input | Approach |
//! |---|---|---|
//! | [`node`] | markup DOM, normalized text | structural card query, then label proximity |
//! | [`community`] | normalized text + markup | adjacent number/label captures |
//! | [`follower`] | normalized text + markup | three-pattern rule chain |
//! | [`repository`] | markup DOM, then normalized text | selector chain, then text fallback |
//! | [`price`] | normalized text | three-pattern rule chain |

pub mod community;
pub mod follower;
pub mod node;
pub mod price;
pub mod repository;

use crate::extract::normalize;
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::Record;
use strum::Display;

/// The kinds of source a snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SourceKind {
    #[strum(to_string = "node")]
    Node,
    #[strum(to_string = "community")]
    Community,
    #[strum(to_string = "follower")]
    Follower,
    #[strum(to_string = "repository")]
    Repository,
    #[strum(to_string = "price")]
    Price,
}

/// Run `extract` on a loaded page, or carry the fetch failure over.
fn on_loaded<T>(outcome: &FetchOutcome, extract: impl FnOnce(&LoadedPage) -> T) -> Record<T> {
    match outcome {
        FetchOutcome::Loaded(page) => Record::Available(extract(page)),
        FetchOutcome::Failed(reason) => Record::Failed(reason.clone()),
    }
}

/// The normalized body text followed by the raw markup.
fn text_and_markup(page: &LoadedPage) -> String {
    let text = normalize(&page.text);
    let mut combined = String::with_capacity(text.len() + 1 + page.markup.len());
    combined.push_str(&text);
    combined.push(' ');
    combined.push_str(&page.markup);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_loaded_carries_failure() {
        let record = on_loaded(&FetchOutcome::failed("HTTP 500"), |_| 1);
        assert_eq!(record, Record::failed("HTTP 500"));
    }

    #[test]
    fn test_on_loaded_runs_extraction() {
        let record = on_loaded(&FetchOutcome::Loaded(LoadedPage::new("abc", "")), |page| page.text.len());
        assert_eq!(record, Record::Available(3));
    }

    #[test]
    fn test_text_and_markup_order() {
        let page = LoadedPage::new(" a\u{00a0} b ", "<p>c</p>");
        assert_eq!(text_and_markup(&page), "a b <p>c</p>");
    }

    #[test]
    fn test_source_kind_display() {
        assert_eq!(SourceKind::Node.to_string(), "node");
        assert_eq!(SourceKind::Repository.to_string(), "repository");
    }
}
