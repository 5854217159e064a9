//! Repository star count strategy.
//!
//! The structural tier queries the stargazers link with progressively looser selectors. When no
//! selector yields digits, the text tier looks for a number followed by "stars" in the body text.

use super::on_loaded;
use crate::extract::dom::text_content;
use crate::extract::normalize;
use crate::extract::patterns::{self, STAR_DIGITS, STAR_SELECTORS, STAR_TEXT};
use crate::extract::rule_chain::{Rule, capture, first_hit};
use crate::fetch::{FetchOutcome, LoadedPage};
use crate::records::{Record, RepositoryMetrics};
use compact_str::CompactString;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| STAR_SELECTORS.iter().map(|s| Selector::parse(s).expect("invalid selector")).collect());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| patterns::compile(STAR_DIGITS));
static TEXT: LazyLock<Regex> = LazyLock::new(|| STAR_TEXT.compile());

const TIERS: [Rule<LoadedPage>; 2] = [from_structure, from_text];

#[must_use]
pub fn extract(outcome: &FetchOutcome) -> Record<RepositoryMetrics> {
    on_loaded(outcome, extract_page)
}

#[must_use]
pub fn extract_page(page: &LoadedPage) -> RepositoryMetrics {
    RepositoryMetrics {
        star_count: first_hit(&TIERS, page).map(CompactString::from),
    }
}

fn from_structure(page: &LoadedPage) -> Option<String> {
    let document = Html::parse_document(&page.markup);

    SELECTORS.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let text = text_content(element);
        DIGITS.find(&text).map(|m| normalize(m.as_str()))
    })
}

fn from_text(page: &LoadedPage) -> Option<String> {
    let text = normalize(&page.text);
    capture(&TEXT, &text).map(normalize)
}
