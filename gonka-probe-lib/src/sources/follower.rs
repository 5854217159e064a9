//! Social follower count strategy.
//!
//! Three patterns are tried in order over the body text joined with the markup: a number before
//! the localized "followers" word, a number inside the verified-followers link markup, then the
//! embedded `followers_count` data key.

use super::{on_loaded, text_and_markup};
use crate::extract::normalize;
use crate::extract::patterns::FOLLOWER_CHAIN;
use crate::extract::rule_chain::first_capture;
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::{FollowerMetrics, Record};
use compact_str::CompactString;
use regex::Regex;
use std::sync::LazyLock;

static CHAIN: LazyLock<Vec<Regex>> = LazyLock::new(|| FOLLOWER_CHAIN.iter().map(|rule| rule.compile()).collect());

#[must_use]
pub fn extract(outcome: &FetchOutcome) -> Record<FollowerMetrics> {
    on_loaded(outcome, extract_page)
}

#[must_use]
pub fn extract_page(page: &LoadedPage) -> FollowerMetrics {
    let combined = text_and_markup(page);

    FollowerMetrics {
        follower_count: first_capture(&CHAIN, &combined).map(|value| CompactString::from(normalize(value))),
    }
}
