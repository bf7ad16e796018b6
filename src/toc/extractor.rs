use log::debug;

use crate::config::{DocumentShape, Options};
use crate::document::{Document, ParseOptions};
use crate::toc::id_generator::IdGenerator;
use crate::toc::locator::locate_headings;
use crate::toc::types::{Extraction, HeadingRecord};
use crate::utils::error::{DoctocError, Result};

/// Parse options the document engine needs for `options`.
///
/// Auto-detecting the document shape requires node locations.
pub fn parse_options_for(options: &Options) -> ParseOptions {
    ParseOptions {
        include_node_locations: options.document_shape() == DocumentShape::Auto,
    }
}

/// Resolve `hint` against a parsed document.
///
/// In auto mode a document whose body element has no source location
/// (the parser synthesized it) is tag soup and treated as a fragment.
pub fn detect_shape<D: Document>(document: &D, hint: DocumentShape) -> DocumentShape {
    match hint {
        DocumentShape::Auto => match document.body_location() {
            Some(_) => DocumentShape::FullDocument,
            None => DocumentShape::Fragment,
        },
        shape => shape,
    }
}

/// Heading level from a tag name such as `h3`
fn heading_level(tag: &str) -> Option<u8> {
    let level: u8 = tag.get(1..)?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Walk the located headings, assigning ids to those without one.
///
/// Existing ids are trusted as-is. Generated ids are made unique against
/// the whole document when `make_ids_unique` is set.
pub fn extract_headings<D: Document>(document: &mut D, options: &Options) -> Result<Extraction> {
    let shape = detect_shape(document, options.document_shape());
    debug!("Document shape: {}", shape);

    let elements = locate_headings(document, options.context_selector(), options.selector())?;
    let mut idgen = IdGenerator::from_options(options);
    let mut headings = Vec::with_capacity(elements.len());
    let mut new_id_count = 0;

    for element in &elements {
        let tag = document.tag_name(element);
        let level = heading_level(&tag)
            .ok_or_else(|| DoctocError::Document(format!("element <{}> is not a heading", tag)))?;
        let title = document.text_content(element);

        let id = match document.get_attribute(element, "id") {
            Some(id) => id,
            None => {
                let mut id = idgen.next_id(Some(&title));

                if options.make_ids_unique() {
                    while document.contains_id(&id) {
                        id = idgen.next_id(None);
                    }
                }

                document.set_attribute(element, "id", &id);
                new_id_count += 1;
                debug!("Assigned id '{}' to <{}>", id, tag);
                id
            }
        };

        headings.push(HeadingRecord { tag, level, title, id });
    }

    let modified = options.always_update() || new_id_count > 0;

    Ok(Extraction {
        headings,
        new_id_count,
        modified,
        shape,
    })
}

/// Serialize a document according to a resolved shape
pub fn serialize_document<D: Document>(document: &D, shape: DocumentShape) -> Result<String> {
    match shape {
        DocumentShape::Fragment => Ok(document.serialize_body()),
        DocumentShape::FullDocument => Ok(document.serialize()),
        DocumentShape::Auto => Err(DoctocError::InternalInconsistency(
            "serialization mode resolved to neither fragment nor full document".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::config::OptionsInput;
    use crate::document::{DocumentEngine, HtmlEngine, SourceLocation};

    fn run(html: &str, input: OptionsInput) -> (Extraction, String) {
        let options = Options::from_input(input).unwrap();
        let mut doc = HtmlEngine::new().parse(html, &parse_options_for(&options)).unwrap();
        let extraction = extract_headings(&mut doc, &options).unwrap();
        let contents = serialize_document(&doc, extraction.shape).unwrap();
        (extraction, contents)
    }

    fn record(tag: &str, level: u8, title: &str, id: &str) -> HeadingRecord {
        HeadingRecord {
            tag: tag.to_string(),
            level,
            title: title.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_unique_ids_for_duplicate_titles() {
        let (extraction, _) = run("<h1>Intro</h1><h2>Intro</h2>", OptionsInput::new().with_unique_ids(true));
        assert_eq!(
            extraction.headings,
            vec![
                record("h1", 1, "Intro", "doctoc-intro"),
                record("h2", 2, "Intro", "doctoc-intro-1"),
            ]
        );
        assert_eq!(extraction.new_id_count, 2);
        assert!(extraction.modified);
    }

    #[test]
    fn test_duplicates_without_uniqueness() {
        let (extraction, _) = run("<h1>Intro</h1><h2>Intro</h2>", OptionsInput::new());
        assert_eq!(extraction.headings[0].id, extraction.headings[1].id);
    }

    #[test]
    fn test_uniqueness_skips_existing_ids() {
        let html = "<p id=\"doctoc-intro\"></p><p id=\"doctoc-intro-1\"></p><h1>Intro</h1>";
        let (extraction, _) = run(html, OptionsInput::new().with_unique_ids(true));
        assert_eq!(extraction.headings[0].id, "doctoc-intro-2");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let input = OptionsInput::new().with_unique_ids(true);
        let (first, contents) = run("<h1>Intro</h1><h2>Setup</h2><h2>Intro</h2>", input.clone());
        let (second, again) = run(&contents, input);

        assert_eq!(second.new_id_count, 0);
        assert!(!second.modified);
        assert_eq!(first.headings, second.headings);
        assert_eq!(contents, again);
    }

    #[test]
    fn test_existing_ids_are_trusted() {
        let (extraction, _) = run(
            "<h1 id=\"custom\">Intro</h1><h2 id=\"custom\">Other</h2>",
            OptionsInput::new().with_unique_ids(true),
        );
        assert_eq!(extraction.headings[0].id, "custom");
        assert_eq!(extraction.headings[1].id, "custom");
        assert_eq!(extraction.new_id_count, 0);
    }

    #[test]
    fn test_always_update() {
        let html = "<h1 id=\"a\">A</h1>";
        let (extraction, _) = run(html, OptionsInput::new());
        assert!(!extraction.modified);

        let (extraction, _) = run(html, OptionsInput::new().with_always_update(true));
        assert!(extraction.modified);
        assert_eq!(extraction.new_id_count, 0);
    }

    #[test]
    fn test_length_limit() {
        let (extraction, _) = run(
            "<h1>Introduction</h1><h1>Introduction</h1>",
            OptionsInput::new().with_id_length_limit(10).with_unique_ids(true),
        );
        assert_eq!(extraction.headings[0].id, "doctoc-int");
        assert_eq!(extraction.headings[1].id, "doctoc-int-1");
    }

    #[test]
    fn test_selector_restricts_levels() {
        let (extraction, _) = run("<h1>A</h1><h2>B</h2><H3>C</H3><h4>D</h4>", OptionsInput::new().with_range("h2-3"));
        let tags: Vec<&str> = extraction.headings.iter().map(|h| h.tag.as_str()).collect();
        assert_eq!(tags, vec!["h2", "h3"]);
        assert_eq!(extraction.headings[1].level, 3);
    }

    #[test]
    fn test_fragment_serialization() {
        let (extraction, contents) = run("<h1>Intro</h1><p>text</p>", OptionsInput::new());
        assert_eq!(extraction.shape, DocumentShape::Fragment);
        assert_eq!(contents, "<h1 id=\"doctoc-intro\">Intro</h1><p>text</p>");
    }

    #[test]
    fn test_body_text_outside_tags_keeps_fragment() {
        let (extraction, contents) = run("<p title=\"<body>\">x</p><h1>A</h1>", OptionsInput::new());
        assert_eq!(extraction.shape, DocumentShape::Fragment);
        assert_eq!(contents, "<p title=\"<body>\">x</p><h1 id=\"doctoc-a\">A</h1>");

        let (extraction, contents) = run("<script>var s = \"<body>\";</script><h1>A</h1>", OptionsInput::new());
        assert_eq!(extraction.shape, DocumentShape::Fragment);
        assert!(!contents.contains("<html>"));
        assert!(contents.contains("<h1 id=\"doctoc-a\">A</h1>"));

        let (extraction, contents) = run("<h1>A</h1><body class=\"x\"><p>y</p>", OptionsInput::new());
        assert_eq!(extraction.shape, DocumentShape::Fragment);
        assert_eq!(contents, "<h1 id=\"doctoc-a\">A</h1><p>y</p>");
    }

    #[test]
    fn test_full_document_serialization() {
        let html = "<!DOCTYPE html><html><head><title>T</title></head><body><h1>Intro</h1></body></html>";
        let (extraction, contents) = run(html, OptionsInput::new());
        assert_eq!(extraction.shape, DocumentShape::FullDocument);
        assert!(contents.starts_with("<!DOCTYPE html><html><head><title>T</title></head>"));
        assert!(contents.contains("<h1 id=\"doctoc-intro\">Intro</h1>"));
    }

    #[test]
    fn test_explicit_shape_skips_detection() {
        let (extraction, contents) = run(
            "<h1>Intro</h1>",
            OptionsInput::new().with_document_shape(DocumentShape::FullDocument),
        );
        assert_eq!(extraction.shape, DocumentShape::FullDocument);
        assert!(contents.contains("<body>"));
    }

    #[test]
    fn test_unresolved_shape_is_internal_error() {
        let doc = HtmlEngine::new().parse("<h1>a</h1>", &ParseOptions::default()).unwrap();
        let err = serialize_document(&doc, DocumentShape::Auto).unwrap_err();
        assert!(matches!(err, DoctocError::InternalInconsistency(_)));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("p"), None);
    }

    /// Minimal in-memory document: a flat list of elements
    #[derive(Default)]
    struct FakeDocument {
        elements: Vec<(String, String, HashMap<String, String>)>,
        body: Option<SourceLocation>,
    }

    impl FakeDocument {
        fn with(mut self, tag: &str, text: &str, id: Option<&str>) -> Self {
            let mut attributes = HashMap::new();
            if let Some(id) = id {
                attributes.insert("id".to_string(), id.to_string());
            }
            self.elements.push((tag.to_string(), text.to_string(), attributes));
            self
        }
    }

    impl Document for FakeDocument {
        type Element = usize;

        fn query_all(&self, _scope: Option<&usize>, selector: &str) -> Result<Vec<usize>> {
            let tags: Vec<&str> = selector.split(',').map(str::trim).collect();
            Ok((0..self.elements.len())
                .filter(|&ix| tags.contains(&self.elements[ix].0.as_str()))
                .collect())
        }

        fn tag_name(&self, element: &usize) -> String {
            self.elements[*element].0.clone()
        }

        fn text_content(&self, element: &usize) -> String {
            self.elements[*element].1.clone()
        }

        fn get_attribute(&self, element: &usize, name: &str) -> Option<String> {
            self.elements[*element].2.get(name).cloned()
        }

        fn set_attribute(&mut self, element: &usize, name: &str, value: &str) {
            self.elements[*element].2.insert(name.to_string(), value.to_string());
        }

        fn contains_id(&self, id: &str) -> bool {
            self.elements.iter().any(|(_, _, attrs)| attrs.get("id").map(String::as_str) == Some(id))
        }

        fn body_location(&self) -> Option<SourceLocation> {
            self.body
        }

        fn serialize(&self) -> String {
            format!("<html>{}</html>", self.serialize_body())
        }

        fn serialize_body(&self) -> String {
            self.elements
                .iter()
                .map(|(tag, text, _)| format!("<{}>{}</{}>", tag, text, tag))
                .collect()
        }
    }

    #[test]
    fn test_fake_document_engine_seam() {
        let mut doc = FakeDocument::default()
            .with("h1", "Intro", None)
            .with("p", "ignored", Some("doctoc-setup"))
            .with("h2", "Setup", None)
            .with("h2", "Known", Some("known"));
        let options = Options::from_input(OptionsInput::new().with_unique_ids(true)).unwrap();

        let extraction = extract_headings(&mut doc, &options).unwrap();
        let ids: Vec<&str> = extraction.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["doctoc-intro", "doctoc-setup-1", "known"]);
        assert_eq!(extraction.new_id_count, 2);
        assert_eq!(extraction.shape, DocumentShape::Fragment);
    }

    #[test]
    fn test_detect_shape_uses_body_location() {
        let mut doc = FakeDocument::default();
        assert_eq!(detect_shape(&doc, DocumentShape::Auto), DocumentShape::Fragment);

        doc.body = Some(SourceLocation { offset: 0, line: 1, column: 1 });
        assert_eq!(detect_shape(&doc, DocumentShape::Auto), DocumentShape::FullDocument);
        assert_eq!(detect_shape(&doc, DocumentShape::Fragment), DocumentShape::Fragment);
    }

    #[test]
    fn test_auto_shape_requests_locations() {
        assert!(parse_options_for(&Options::default()).include_node_locations);
        let options = Options::from_input(OptionsInput::new().with_document_shape(DocumentShape::Fragment)).unwrap();
        assert!(!parse_options_for(&options).include_node_locations);
    }
}
