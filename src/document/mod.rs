//! The narrow document-engine interface the heading core works through.
//!
//! Tree construction, selector queries and serialization belong to the
//! engine; the core only reads text, reads and writes attributes and asks
//! for a serialization once it decided the contents changed.

mod html;

pub use html::{HtmlDocument, HtmlEngine};

use crate::utils::error::Result;

/// Options handed to [`DocumentEngine::parse`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record source locations so [`Document::body_location`] can answer
    pub include_node_locations: bool,
}

/// Where an element's start tag was found in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset of the start tag
    pub offset: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
}

/// Parses contents into documents
pub trait DocumentEngine {
    type Document: Document;

    fn parse(&self, content: &str, options: &ParseOptions) -> Result<Self::Document>;
}

/// A parsed, mutable document
pub trait Document {
    /// Handle to an element of this document
    type Element: Clone;

    /// Elements matching `selector` in document order.
    ///
    /// With a `scope`, only descendants of that element are searched.
    fn query_all(&self, scope: Option<&Self::Element>, selector: &str) -> Result<Vec<Self::Element>>;

    /// Lowercase local tag name
    fn tag_name(&self, element: &Self::Element) -> String;

    /// Concatenated text of the element's subtree
    fn text_content(&self, element: &Self::Element) -> String;

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.get_attribute(element, name).is_some()
    }

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Whether any element carries `id`
    fn contains_id(&self, id: &str) -> bool;

    /// Source location of the body element, `None` if it was synthesized
    /// or locations were not requested
    fn body_location(&self) -> Option<SourceLocation>;

    /// The entire document
    fn serialize(&self) -> String;

    /// Only the body's inner content
    fn serialize_body(&self) -> String;
}
