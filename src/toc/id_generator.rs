use crate::config::{Options, SlugFunc};

/// Truncate `text` to at most `limit` characters
fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Generates heading ids from heading text.
///
/// Calling [`IdGenerator::next_id`] with a title starts a new base id;
/// calling it without one yields `base-1`, `base-2`, ... for uniqueness
/// retries. Only the base is bound by the length limit, so a suffixed id
/// may exceed it by the width of the suffix.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    slug_func: SlugFunc,
    id_prefix: String,
    id_length_limit: usize,
    base: String,
    counter: usize,
}

impl IdGenerator {
    pub fn new(slug_func: SlugFunc, id_prefix: &str, id_length_limit: usize) -> Self {
        let base = truncate(id_prefix, id_length_limit);
        Self {
            slug_func,
            id_prefix: id_prefix.to_string(),
            id_length_limit,
            base,
            counter: 0,
        }
    }

    /// Create a generator configured from resolved options
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.slug_func().clone(), options.id_prefix(), options.id_length_limit())
    }

    /// Next candidate id: a fresh base for `Some(title)`, else a suffixed successor
    pub fn next_id(&mut self, title: Option<&str>) -> String {
        match title {
            Some(title) => {
                let candidate = format!("{}{}", self.id_prefix, self.slug_func.apply(title));
                self.base = truncate(&candidate, self.id_length_limit);
                self.counter = 0;
                self.base.clone()
            }
            None => {
                self.counter += 1;
                format!("{}-{}", self.base, self.counter)
            }
        }
    }
}
