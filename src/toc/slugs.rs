//! Built-in slug functions for heading text.

/// Default slug function: lowercase ASCII words joined by `-`
pub fn slugify(title: &str) -> String {
    ::slug::slugify(title)
}

/// Jekyll-compatible anchor text.
///
/// Keeps unicode letters and digits, `-` and `_`; every other run of
/// characters collapses to a single `-`.
pub fn jekyll_slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
