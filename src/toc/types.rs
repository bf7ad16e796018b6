use serde::{Deserialize, Serialize};

use crate::config::DocumentShape;

/// A heading found in a document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Lowercase tag name, e.g. `h2`
    pub tag: String,
    /// 1 to 6, from the tag name
    pub level: u8,
    /// Raw text content
    pub title: String,
    pub id: String,
}

/// Outcome of extracting headings from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub headings: Vec<HeadingRecord>,
    /// Number of ids generated and assigned by this extraction
    pub new_id_count: usize,
    /// Whether the caller has to re-serialize the document
    pub modified: bool,
    /// Resolved shape (never `Auto`) used when `modified` is set
    pub shape: DocumentShape,
}
