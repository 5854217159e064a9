//! Compute-node dashboard strategy.
//!
//! Total compute power is read structurally: the labeled element is walked up to its card and the
//! value element nested in the card supplies the value. Validators and the next round countdown
//! are found by label proximity in the body text.

use super::on_loaded;
use crate::extract::dom::{closest, text_content};
use crate::extract::patterns::{
    CompiledProximityRule, NODE_CARD_SELECTOR, NODE_FALLBACK_CARD_SELECTOR, NODE_LABEL_SELECTOR, NODE_NEXT_ROUND_ETA,
    NODE_VALIDATORS, NODE_VALUE_ATTRIBUTE, NODE_VALUE_SELECTOR,
};
use crate::extract::{find_near_label, normalize};
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::{NodeMetrics, NodeRecord};
use compact_str::CompactString;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(NODE_LABEL_SELECTOR).expect("invalid selector"));
static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(NODE_CARD_SELECTOR).expect("invalid selector"));
static FALLBACK_CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(NODE_FALLBACK_CARD_SELECTOR).expect("invalid selector"));
static VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(NODE_VALUE_SELECTOR).expect("invalid selector"));

static VALIDATORS: LazyLock<CompiledProximityRule> = LazyLock::new(|| NODE_VALIDATORS.compile());
static NEXT_ROUND_ETA: LazyLock<CompiledProximityRule> = LazyLock::new(|| NODE_NEXT_ROUND_ETA.compile());

/// Build the record of the node identified by `source_identifier`.
#[must_use]
pub fn extract(source_identifier: &str, outcome: &FetchOutcome) -> NodeRecord {
    NodeRecord::new(CompactString::from(source_identifier), on_loaded(outcome, extract_page))
}

#[must_use]
pub fn extract_page(page: &LoadedPage) -> NodeMetrics {
    let text = normalize(&page.text);

    NodeMetrics {
        total_compute_power: total_compute_power(&page.markup).map(CompactString::from),
        validators: near(&text, &VALIDATORS),
        next_round_eta: near(&text, &NEXT_ROUND_ETA),
    }
}

fn near(text: &str, rule: &CompiledProximityRule) -> Option<CompactString> {
    find_near_label(text, &rule.label, &rule.value, rule.window).map(CompactString::from)
}

fn total_compute_power(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);

    document.select(&LABEL).find_map(|label| {
        let card = closest(label, &CARD).or_else(|| closest(label, &FALLBACK_CARD))?;
        let value = card.select(&VALUE).next()?;

        let raw = match value.value().attr(NODE_VALUE_ATTRIBUTE) {
            Some(attr) if !attr.is_empty() => normalize(attr),
            _ => text_content(value),
        };

        (!raw.is_empty()).then_some(raw)
    })
}
