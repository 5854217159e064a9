use crate::extract::normalize;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("invalid selector"));

/// Elements whose text never reaches the rendered page.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Approximate the visible body text of a document.
///
/// Text nodes are joined with single spaces; the contents of scripts, styles and similar
/// non-rendered elements are skipped.
#[must_use]
pub fn body_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let root = document.select(&BODY_SELECTOR).next().unwrap_or_else(|| document.root_element());

    let parts: Vec<&str> = root
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|element| HIDDEN_ELEMENTS.contains(&element.value().name()));
            (!hidden).then_some(&**text)
        })
        .collect();

    normalize(&parts.join(" "))
}
