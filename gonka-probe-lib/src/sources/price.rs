//! Exchange price strategy.
//!
//! Three patterns are tried in order over the body text: the localized sell price label, the
//! localized buy price label, then any dollar-prefixed number.

use super::on_loaded;
use crate::extract::normalize;
use crate::extract::patterns::{PRICE_CHAIN, PRICE_OVERLAY_SELECTORS};
use crate::extract::rule_chain::first_capture;
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::{PriceMetrics, Record};
use compact_str::CompactString;
use regex::Regex;
use std::sync::LazyLock;

/// Overlays to dismiss on the exchange page before it is read.
pub const OVERLAY_SELECTORS: &[&str] = &PRICE_OVERLAY_SELECTORS;

static CHAIN: LazyLock<Vec<Regex>> = LazyLock::new(|| PRICE_CHAIN.iter().map(|rule| rule.compile()).collect());

#[must_use]
pub fn extract(outcome: &FetchOutcome) -> Record<PriceMetrics> {
    on_loaded(outcome, extract_page)
}

#[must_use]
pub fn extract_page(page: &LoadedPage) -> PriceMetrics {
    let text = normalize(&page.text);

    PriceMetrics {
        price: first_capture(&CHAIN, &text).map(|digits| digits.chars().filter(|c| *c != ' ').collect::<CompactString>()),
    }
}
