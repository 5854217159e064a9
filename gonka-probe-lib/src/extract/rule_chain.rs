use regex::Regex;

/// One link of a prioritized rule chain.
///
/// A chain is a plain ordered slice of rules; evaluation stops at the first rule yielding a value.
pub type Rule<In> = fn(&In) -> Option<String>;

/// Evaluate `rules` in order and return the first value produced.
#[must_use]
pub fn first_hit<In: ?Sized>(rules: &[Rule<In>], input: &In) -> Option<String> {
    rules.iter().find_map(|rule| rule(input))
}

/// Return the first capture group of the first pattern in `patterns` that matches `haystack`.
#[must_use]
pub fn first_capture<'h>(patterns: &[Regex], haystack: &'h str) -> Option<&'h str> {
    patterns.iter().find_map(|re| capture(re, haystack))
}

/// Return the first capture group of `pattern` in `haystack`.
#[must_use]
pub fn capture<'h>(pattern: &Regex, haystack: &'h str) -> Option<&'h str> {
    pattern.captures(haystack).and_then(|c| c.get(1)).map(|m| m.as_str())
}
