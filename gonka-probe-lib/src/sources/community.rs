//! Invite-community stats strategy.
//!
//! Both counts are a number immediately followed by its label, captured by a single pattern over
//! the body text joined with the markup.

use super::{on_loaded, text_and_markup};
use crate::extract::normalize;
use crate::extract::patterns::{COMMUNITY_MEMBERS, COMMUNITY_ONLINE};
use crate::extract::rule_chain::capture;
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::{CommunityMetrics, Record};
use compact_str::CompactString;
use regex::Regex;
use std::sync::LazyLock;

static ONLINE: LazyLock<Regex> = LazyLock::new(|| COMMUNITY_ONLINE.compile());
static MEMBERS: LazyLock<Regex> = LazyLock::new(|| COMMUNITY_MEMBERS.compile());

#[must_use]
pub fn extract(outcome: &FetchOutcome) -> Record<CommunityMetrics> {
    on_loaded(outcome, extract_page)
}

#[must_use]
pub fn extract_page(page: &LoadedPage) -> CommunityMetrics {
    let combined = text_and_markup(page);

    CommunityMetrics {
        online_count: count(&ONLINE, &combined),
        member_count: count(&MEMBERS, &combined),
    }
}

fn count(pattern: &Regex, haystack: &str) -> Option<CompactString> {
    capture(pattern, haystack)
        .map(normalize)
        .filter(|value| !value.is_empty())
        .map(CompactString::from)
}
