//! Helpers for navigating element trees and reading values from them.

use super::tree::Element;

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use nitf_reader::xml::{find_child, Element};
///
/// let root = Element::parse("<root><child1/><child2/></root>").unwrap();
///
/// assert!(find_child(&root, "child1").is_some());
/// assert!(find_child(&root, "missing").is_none());
/// ```
pub fn find_child<'a>(node: &'a Element, tag: &str) -> Option<&'a Element> {
    node.child_elements().find(|child| child.name() == tag)
}

/// Find all child elements with the given tag name.
pub fn find_children<'a>(node: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> {
    node.child_elements().filter(move |child| child.name() == tag)
}

/// Find a descendant element matching a path of tag names.
///
/// # Arguments
/// * `node` - Starting element
/// * `path` - Slash-separated path of tag names (e.g., "docdata/doc-id")
///
/// # Examples
/// ```
/// use nitf_reader::xml::{find_by_path, get_text, Element};
///
/// let head = Element::parse("<head><docdata><doc-id id-string='A1'/></docdata></head>").unwrap();
/// let doc_id = find_by_path(&head, "docdata/doc-id").unwrap();
/// assert_eq!(doc_id.attribute("id-string"), Some("A1"));
/// ```
pub fn find_by_path<'a>(node: &'a Element, path: &str) -> Option<&'a Element> {
    let mut current = node;
    for part in path.split('/') {
        current = find_child(current, part)?;
    }
    Some(current)
}

/// Find every descendant element with the given tag name, in document order.
pub fn find_descendants<'a>(node: &'a Element, tag: &str) -> Vec<&'a Element> {
    node.descendants()
        .into_iter()
        .filter(|element| element.name() == tag)
        .collect()
}

/// Get the direct text content of an element, trimmed.
///
/// Returns an empty string when the element has no text.
#[must_use]
pub fn get_text(node: &Element) -> String {
    node.direct_text().trim().to_string()
}

/// Get an attribute value from an element.
#[must_use]
pub fn get_attribute<'a>(node: &'a Element, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Attribute of the element at `path`, owned, `None` when missing or blank.
#[must_use]
pub fn attribute_at(node: &Element, path: &str, name: &str) -> Option<String> {
    find_by_path(node, path)
        .and_then(|element| element.attribute(name))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Check if an element has a specific tag name.
#[must_use]
pub fn has_tag(node: &Element, tag: &str) -> bool {
    node.name() == tag
}

/// Parse a numeric attribute, logging and discarding malformed values.
pub fn numeric_attribute<T: std::str::FromStr>(node: &Element, name: &str) -> Option<T> {
    let raw = node.attribute(name)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                tag = %node.name(),
                attribute = %name,
                value = %raw,
                "Ignoring non-numeric attribute value"
            );
            None
        }
    }
}
