use log::debug;

use crate::config::selector::query_selector;
use crate::document::Document;
use crate::utils::error::Result;

/// Find heading elements matching `heading_selector`.
///
/// With an empty `context_selector` the whole document is searched.
/// Otherwise every context element is searched in its own match order and
/// the results are concatenated context by context; nested contexts
/// therefore report a heading once per enclosing context.
pub fn locate_headings<D: Document>(
    document: &D,
    context_selector: &str,
    heading_selector: &str,
) -> Result<Vec<D::Element>> {
    let selector = query_selector(heading_selector);

    if context_selector.trim().is_empty() {
        return document.query_all(None, &selector);
    }

    let contexts = document.query_all(None, context_selector)?;
    debug!("Context '{}' matched {} element(s)", context_selector, contexts.len());

    let mut headings = Vec::new();
    for context in &contexts {
        headings.extend(document.query_all(Some(context), &selector)?);
    }

    Ok(headings)
}
