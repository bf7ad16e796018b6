use crate::config::types::{DocumentShape, SlugFunc};

/// Default heading selector (every heading level)
pub fn default_selector() -> String {
    "h1, h2, h3, h4, h5, h6".to_string()
}

/// Default context selector (empty means the whole document)
pub fn default_context_selector() -> String {
    "".to_string()
}

/// Default prefix for generated ids
pub fn default_id_prefix() -> String {
    "doctoc-".to_string()
}

/// Default cap on prefix + slug length
pub fn default_id_length_limit() -> usize {
    256
}

/// Generated ids are not checked against the document by default
pub fn default_make_ids_unique() -> bool {
    false
}

/// Contents are only replaced when a new id was assigned
pub fn default_always_update() -> bool {
    false
}

/// Default slug function
pub fn default_slug_func() -> SlugFunc {
    SlugFunc::default()
}

/// Default document shape hint
pub fn default_document_shape() -> DocumentShape {
    DocumentShape::Auto
}

/// Lowest heading level accepted by hMin
pub const MIN_HEADING_LEVEL: i64 = 1;

/// Highest heading level accepted by hMax
pub const MAX_HEADING_LEVEL: i64 = 6;
