mod extractor;
mod id_generator;
mod locator;
mod tree;
mod types;
pub mod slugs;

pub use extractor::{detect_shape, extract_headings, parse_options_for, serialize_document};
pub use id_generator::IdGenerator;
pub use locator::locate_headings;
pub use tree::{TableOfContents, TocNode, TocTreeBuilder, TreeBuilder};
pub use types::{Extraction, HeadingRecord};
