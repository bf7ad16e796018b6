use serde::{Deserialize, Serialize};

use crate::toc::types::HeadingRecord;

/// Builds a tree out of document-ordered heading records
pub trait TreeBuilder {
    type Tree;

    fn create_tree_from_headings(&self, headings: &[HeadingRecord]) -> Self::Tree;
}

/// Represents a single heading in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    pub heading: HeadingRecord,
    pub children: Vec<TocNode>,
}

impl TocNode {
    pub fn new(heading: HeadingRecord) -> Self {
        Self {
            heading,
            children: Vec::new(),
        }
    }

    /// Render this heading and its children as HTML
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&self.heading.id),
            html_escape::encode_text(&self.heading.title)
        ));

        if !self.children.is_empty() {
            html.push_str("\n<ul>\n");
            for child in &self.children {
                html.push_str(&child.to_html());
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</li>\n");
        html
    }

    /// Render as markdown list
    pub fn to_markdown(&self, indent_level: usize) -> String {
        let mut md = String::new();
        let indent = "  ".repeat(indent_level);

        md.push_str(&format!("{}* [{}](#{})\n", indent, self.heading.title.trim(), self.heading.id));

        for child in &self.children {
            md.push_str(&child.to_markdown(indent_level + 1));
        }

        md
    }

    fn collect<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a TocNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.collect(depth + 1, out);
        }
    }
}

/// Table of Contents structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContents {
    pub roots: Vec<TocNode>,
}

impl TableOfContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the hierarchy from flat headings.
    ///
    /// A heading becomes a child of the nearest preceding heading with a
    /// strictly lower level.
    pub fn from_headings(headings: &[HeadingRecord]) -> Self {
        let mut toc = TableOfContents::new();
        // path of child indices from the roots to the open node
        let mut path: Vec<usize> = Vec::new();

        for heading in headings {
            while let Some(open) = toc.node_at(&path) {
                if open.heading.level < heading.level {
                    break;
                }
                path.pop();
            }

            let node = TocNode::new(heading.clone());
            let index = match toc.node_at_mut(&path) {
                Some(parent) => {
                    parent.children.push(node);
                    parent.children.len() - 1
                }
                None => {
                    toc.roots.push(node);
                    toc.roots.len() - 1
                }
            };
            path.push(index);
        }

        toc
    }

    fn node_at(&self, path: &[usize]) -> Option<&TocNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for ix in rest {
            node = node.children.get(*ix)?;
        }
        Some(node)
    }

    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TocNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for ix in rest {
            node = node.children.get_mut(*ix)?;
        }
        Some(node)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node in document order with its depth (roots have depth 1)
    pub fn children_all(&self) -> Vec<(usize, &TocNode)> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect(1, &mut out);
        }
        out
    }

    /// Generate HTML for the table of contents
    pub fn to_html(&self) -> String {
        if self.roots.is_empty() {
            return String::new();
        }

        let mut html = String::from("<nav class=\"table-of-contents\" role=\"navigation\">");
        html.push_str("\n<ul>\n");

        for node in &self.roots {
            html.push_str(&node.to_html());
        }

        html.push_str("</ul>\n</nav>");
        html
    }

    /// Generate markdown for the table of contents
    pub fn to_markdown(&self) -> String {
        self.roots.iter().map(|node| node.to_markdown(0)).collect()
    }

    /// Outline as an HTML comment, one line per heading
    pub fn to_outline_comment(&self) -> String {
        let mut lines = vec!["<!--".to_string()];

        for (depth, node) in self.children_all() {
            lines.push(format!(
                "{}{} - {}",
                ".".repeat(depth),
                node.heading.tag,
                comment_safe(&node.heading.title)
            ));
        }

        lines.push("-->".to_string());
        lines.join("\n")
    }

    /// Prepend the outline comment to `contents`, replacing one attached earlier
    pub fn attach_outline(&self, contents: &str) -> String {
        format!("{}\n{}", self.to_outline_comment(), strip_outline(contents))
    }
}

/// Title on a single line with no `--` left to close the comment early
fn comment_safe(title: &str) -> String {
    let mut text = title.split_whitespace().collect::<Vec<_>>().join(" ");
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

/// `contents` without a leading outline comment
fn strip_outline(contents: &str) -> &str {
    let body = match contents.strip_prefix("<!--\n") {
        Some(body) => body,
        None => return contents,
    };

    let end = match body.find("-->") {
        Some(end) => end,
        None => return contents,
    };

    // an empty outline has no lines between the markers
    let is_outline = body[..end]
        .lines()
        .all(|line| line.starts_with('.') && line.contains(" - "));
    if !is_outline || !(end == 0 || body[..end].ends_with('\n')) {
        return contents;
    }

    let rest = &body[end + "-->".len()..];
    rest.strip_prefix('\n').unwrap_or(rest)
}

/// Default tree builder producing a [`TableOfContents`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TocTreeBuilder;

impl TreeBuilder for TocTreeBuilder {
    type Tree = TableOfContents;

    fn create_tree_from_headings(&self, headings: &[HeadingRecord]) -> TableOfContents {
        TableOfContents::from_headings(headings)
    }
}
