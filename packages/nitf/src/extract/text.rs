//! Text extraction from mixed-content elements.

use crate::config::LINE_BREAK_TAG;
use crate::xml::{Element, XmlNode};

/// Extract the human-readable text of an element.
///
/// Text nodes are concatenated in document order exactly as authored. A
/// `<br>` contributes a single `\n` and its own children are ignored; any
/// other element contributes the text of its subtree in place. Nothing is
/// trimmed or normalised here.
///
/// The walk uses an explicit stack, so nesting depth is bounded by memory
/// rather than the call stack.
///
/// # Examples
/// ```
/// use nitf_reader::extract::extract_all_text;
/// use nitf_reader::xml::Element;
///
/// let p = Element::parse("<p>Line one<br/>Line two</p>").unwrap();
/// assert_eq!(extract_all_text(&p), "Line one\nLine two");
/// ```
#[must_use]
pub fn extract_all_text(root: &Element) -> String {
    let mut text = String::new();
    let mut stack = vec![root.children().iter()];

    while let Some(children) = stack.last_mut() {
        let Some(child) = children.next() else {
            stack.pop();
            continue;
        };
        match child {
            XmlNode::Text(value) => text.push_str(value),
            XmlNode::Element(element) if element.name() == LINE_BREAK_TAG => text.push('\n'),
            XmlNode::Element(element) => stack.push(element.children().iter()),
        }
    }

    text
}
