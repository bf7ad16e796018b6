use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RANGE_REGEX: Regex = Regex::new(r"(?i)^h([1-6])-([1-6])$").unwrap();

    static ref SELECTOR_REGEX: Regex = Regex::new(r"(?i)^h[1-6](,\s*h[1-6])*$").unwrap();
}

/// Read a range string of the form `hN-M`, returning `(N, M)`.
///
/// The order of `N` and `M` is not checked here.
pub fn read_range(range: &str) -> Option<(i64, i64)> {
    let caps = RANGE_REGEX.captures(range)?;
    let min = caps[1].parse().ok()?;
    let max = caps[2].parse().ok()?;
    Some((min, max))
}

/// Whether `selector` is a comma separated list of `h1`..`h6` tokens
pub fn is_heading_selector(selector: &str) -> bool {
    SELECTOR_REGEX.is_match(selector)
}

/// Build the canonical selector for the inclusive level range `min..=max`
pub fn levels_to_selector(min: i64, max: i64) -> String {
    (min..=max)
        .map(|level| format!("h{}", level))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lowercased form handed to the document engine so `H2` and `h2` match alike
pub fn query_selector(selector: &str) -> String {
    selector.to_ascii_lowercase()
}
