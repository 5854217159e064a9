use super::normalize;
use regex::Regex;

/// Default search radius, in characters, around a label match.
pub const DEFAULT_WINDOW: usize = 120;

/// Find the first value token near the first occurrence of a label.
///
/// The label is located with `label`; the search window then spans `window` characters on either
/// side of the label match, clamped to the text. Within the window the first match of `value`
/// whose normalized form is non-empty is returned.
///
/// Both patterns are expected to be compiled case-insensitively (see [`super::patterns::compile`]).
#[must_use]
pub fn find_near_label(text: &str, label: &Regex, value: &Regex, window: usize) -> Option<String> {
    let label_match = label.find(text)?;

    let start = retreat_chars(text, label_match.start(), window);
    let end = advance_chars(text, label_match.end(), window);
    let chunk = text.get(start..end)?;

    value
        .find_iter(chunk)
        .map(|m| normalize(m.as_str()))
        .find(|candidate| !candidate.is_empty())
}

/// Byte offset `count` characters before `from`, or 0.
fn retreat_chars(text: &str, from: usize, count: usize) -> usize {
    if count == 0 {
        return from;
    }

    text.get(..from)
        .and_then(|head| head.char_indices().rev().nth(count - 1))
        .map_or(0, |(idx, _)| idx)
}

/// Byte offset `count` characters after `from`, or the end of the text.
fn advance_chars(text: &str, from: usize, count: usize) -> usize {
    text.get(from..)
        .and_then(|tail| tail.char_indices().nth(count))
        .map_or(text.len(), |(idx, _)| from + idx)
}
