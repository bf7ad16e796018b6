use kuchikiki::traits::*;
use kuchikiki::NodeRef;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{Document, DocumentEngine, ParseOptions, SourceLocation};
use crate::utils::error::{DoctocError, Result};

/// Attribute carrying the source offset of a `<body` candidate
const OFFSET_ATTRIBUTE: &str = "data-doctoc-source-offset";

lazy_static! {
    // a tag name ends at HTML whitespace, `/` or `>`
    static ref BODY_TAG_REGEX: Regex = Regex::new(r"(?i)<body[\t\n\x0C\r />]").unwrap();
}

fn body_element(root: &NodeRef) -> Option<NodeRef> {
    root.select_first("body").ok().map(|body| body.as_node().clone())
}

fn location_of(content: &str, offset: usize) -> SourceLocation {
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let column = content[line_start..offset].chars().count() + 1;

    SourceLocation { offset, line, column }
}

/// Locate the start tag the tree builder created the body element from.
///
/// Every `<body` candidate is tagged with its offset and the tagged copy is
/// parsed, so candidates inside comments, attribute values or raw text never
/// reach the body element. A body implied by earlier content only gets the
/// attributes of a later tag merged in; parsing the text before that tag
/// then already yields a non-empty body.
fn find_body_start_tag(content: &str) -> Option<SourceLocation> {
    let candidates: Vec<usize> = BODY_TAG_REGEX.find_iter(content).map(|m| m.start()).collect();
    if candidates.is_empty() {
        return None;
    }

    let mut tagged = String::with_capacity(content.len() + candidates.len() * 40);
    let mut copied = 0;
    for start in &candidates {
        let name_end = start + "<body".len();
        tagged.push_str(&content[copied..name_end]);
        tagged.push_str(&format!(" {}={} ", OFFSET_ATTRIBUTE, start));
        copied = name_end;
    }
    tagged.push_str(&content[copied..]);

    let body = body_element(&kuchikiki::parse_html().one(tagged))?;
    let offset = body
        .as_element()
        .and_then(|data| data.attributes.borrow().get(OFFSET_ATTRIBUTE).and_then(|v| v.parse::<usize>().ok()))?;
    candidates.binary_search(&offset).ok()?;

    let implied = body_element(&kuchikiki::parse_html().one(&content[..offset]))?;
    if implied.first_child().is_some() {
        return None;
    }

    Some(location_of(content, offset))
}

/// HTML engine backed by an html5ever tree
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEngine;

impl HtmlEngine {
    pub fn new() -> Self {
        HtmlEngine
    }
}

/// A parsed HTML document
pub struct HtmlDocument {
    root: NodeRef,
    body_location: Option<SourceLocation>,
}

impl DocumentEngine for HtmlEngine {
    type Document = HtmlDocument;

    fn parse(&self, content: &str, options: &ParseOptions) -> Result<HtmlDocument> {
        let root = kuchikiki::parse_html().one(content);

        let body_location = if options.include_node_locations {
            find_body_start_tag(content)
        } else {
            None
        };
        debug!("Parsed HTML document, body location: {:?}", body_location);

        Ok(HtmlDocument { root, body_location })
    }
}

impl Document for HtmlDocument {
    type Element = NodeRef;

    fn query_all(&self, scope: Option<&NodeRef>, selector: &str) -> Result<Vec<NodeRef>> {
        let root = scope.unwrap_or(&self.root);
        let matches = root
            .descendants()
            .select(selector)
            .map_err(|_| DoctocError::Document(format!("invalid selector '{}'", selector)))?;

        Ok(matches.map(|element| element.as_node().clone()).collect())
    }

    fn tag_name(&self, element: &NodeRef) -> String {
        element
            .as_element()
            .map(|data| data.name.local.to_string().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn text_content(&self, element: &NodeRef) -> String {
        element.text_contents()
    }

    fn get_attribute(&self, element: &NodeRef, name: &str) -> Option<String> {
        let data = element.as_element()?;
        let attributes = data.attributes.borrow();
        attributes.get(name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: &NodeRef, name: &str, value: &str) {
        if let Some(data) = element.as_element() {
            data.attributes.borrow_mut().insert(name, value.to_string());
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.root
            .descendants()
            .elements()
            .any(|element| element.attributes.borrow().get("id") == Some(id))
    }

    fn body_location(&self) -> Option<SourceLocation> {
        self.body_location
    }

    fn serialize(&self) -> String {
        self.root.to_string()
    }

    fn serialize_body(&self) -> String {
        match self.root.select_first("body") {
            Ok(body) => body.as_node().children().map(|child| child.to_string()).collect(),
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str, locations: bool) -> HtmlDocument {
        let options = ParseOptions { include_node_locations: locations };
        HtmlEngine::new().parse(content, &options).unwrap()
    }

    #[test]
    fn test_body_location_of_full_document() {
        let doc = parse("<html>\n<head></head>\n  <body><h1>A</h1></body></html>", true);
        let location = doc.body_location().unwrap();
        assert_eq!(location.line, 3);
        assert_eq!(location.column, 3);
    }

    #[test]
    fn test_tag_soup_has_no_body_location() {
        assert!(parse("<h1>A</h1><p>text</p>", true).body_location().is_none());
        assert!(parse("<!-- <body> --><h1>A</h1>", true).body_location().is_none());
        assert!(parse("<html><body></body></html>", false).body_location().is_none());
    }

    #[test]
    fn test_body_location_ignores_non_tags() {
        let inputs = [
            "<p title=\"<body>\">x</p><h1>A</h1>",
            "<p title=<body>x</p>",
            "<script>var s = \"<body>\";</script><h1>A</h1>",
            "<style>/* <body> */</style><h1>A</h1>",
            "<title><body></title><h1>A</h1>",
            "<textarea><body></textarea><h1>A</h1>",
        ];
        for input in inputs {
            assert!(parse(input, true).body_location().is_none(), "{}", input);
        }
    }

    #[test]
    fn test_late_body_tag_is_not_traceable() {
        assert!(parse("<h1>A</h1><body class=\"x\"><p>y</p>", true).body_location().is_none());
        assert!(parse("text<BODY>", true).body_location().is_none());
    }

    #[test]
    fn test_body_location_skips_decoys() {
        let content = "<!DOCTYPE html>\n<!-- <body> -->\n<head><title><body></title></head>\n<body class=\"x\">";
        let location = parse(content, true).body_location().unwrap();
        assert_eq!(location.offset, content.find("<body class").unwrap());
        assert_eq!(location.line, 4);
        assert_eq!(location.column, 1);

        let location = parse("<HTML><BODY><h1>A</h1>", true).body_location().unwrap();
        assert_eq!((location.line, location.column), (1, 7));
    }

    #[test]
    fn test_query_is_scoped_and_ordered() {
        let doc = parse("<h2>a</h2><div><h1>b</h1><H3>c</H3></div>", false);
        let all = doc.query_all(None, "h1, h2, h3").unwrap();
        let titles: Vec<String> = all.iter().map(|e| doc.text_content(e)).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(doc.tag_name(&all[2]), "h3");

        let div = doc.query_all(None, "div").unwrap().remove(0);
        let scoped = doc.query_all(Some(&div), "h1, h2, h3").unwrap();
        assert_eq!(scoped.len(), 2);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = parse("<h1>a</h1>", false);
        assert!(doc.query_all(None, "h1[").is_err());
    }

    #[test]
    fn test_attributes_and_serialization() {
        let mut doc = parse("<h1>Intro</h1>", false);
        let heading = doc.query_all(None, "h1").unwrap().remove(0);
        assert!(!doc.has_attribute(&heading, "id"));
        assert!(!doc.contains_id("intro"));

        doc.set_attribute(&heading, "id", "intro");
        assert_eq!(doc.get_attribute(&heading, "id").as_deref(), Some("intro"));
        assert!(doc.contains_id("intro"));
        assert_eq!(doc.serialize_body(), "<h1 id=\"intro\">Intro</h1>");
        assert!(doc.serialize().starts_with("<html>"));
    }
}
