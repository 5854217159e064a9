const NO_BREAK_SPACE: char = '\u{00a0}';

/// Canonicalize whitespace in rendered page text.
///
/// Non-breaking spaces become ordinary spaces, every run of whitespace collapses to a single
/// space, and leading/trailing whitespace is removed. The function is total and idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        let ch = if ch == NO_BREAK_SPACE { ' ' } else { ch };
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}
