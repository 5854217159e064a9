use super::normalize;
use scraper::{ElementRef, Selector};

/// The nearest ancestor-or-self of `element` matching `selector`.
#[must_use]
pub fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    core::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|candidate| selector.matches(candidate))
}

/// The concatenated text content of `element`, normalized.
#[must_use]
pub fn text_content(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_closest_includes_self() {
        let doc = Html::parse_fragment(r#"<div class="x"><span id="a">hi</span></div>"#);
        let div = Selector::parse("div").unwrap();
        let own = doc.select(&div).next().unwrap();
        assert_eq!(closest(own, &div).map(|e| e.value().name()), Some("div"));
    }

    #[test]
    fn test_closest_walks_ancestors() {
        let doc = Html::parse_fragment(r#"<section><div class="card big"><p><span id="a">hi</span></p></div></section>"#);
        let span = doc.select(&Selector::parse("#a").unwrap()).next().unwrap();
        let card = closest(span, &Selector::parse(r#"div[class*="card"]"#).unwrap()).unwrap();
        assert_eq!(card.value().attr("class"), Some("card big"));
        assert!(closest(span, &Selector::parse("table").unwrap()).is_none());
    }

    #[test]
    fn test_text_content_normalizes() {
        let doc = Html::parse_fragment("<p> 1\u{00a0}204 <b>\n stars</b></p>");
        let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(text_content(p), "1 204 stars");
    }
}
