//! Owned element tree built from a roxmltree document.
//!
//! roxmltree borrows the input string, which would tie every paragraph to
//! the lifetime of the raw XML. Paragraphs own their subtree instead, so the
//! relevant part of the document is copied into this small owned form.

use roxmltree::Node;

use crate::config::ParseOptions;
use crate::error::{NitfError, Result};

/// A child of an element: nested element or raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

impl XmlNode {
    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// The text, if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

/// An XML element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, replacing an existing one with the same name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Parse a standalone XML string and return its root element.
    ///
    /// # Examples
    /// ```
    /// use nitf_reader::xml::Element;
    ///
    /// let p = Element::parse("<p>Hello <em>world</em></p>").unwrap();
    /// assert_eq!(p.name(), "p");
    /// assert_eq!(p.children().len(), 2);
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with_options(xml, &ParseOptions::default())
    }

    /// Parse with explicit options.
    pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<Self> {
        let doc = roxmltree::Document::parse_with_options(xml, options.to_roxmltree())?;
        Self::from_node(doc.root_element(), options.max_depth)
    }

    /// Copy a roxmltree element and its subtree.
    ///
    /// Comments and processing instructions are dropped. Fails with
    /// `TooDeep` when nesting exceeds `max_depth`.
    pub fn from_node(node: Node<'_, '_>, max_depth: usize) -> Result<Self> {
        build(node, 1, max_depth)
    }

    /// Local tag name, without namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Ordered children.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Concatenation of the immediate text children, untrimmed.
    ///
    /// Text inside nested elements is not included.
    #[must_use]
    pub fn direct_text(&self) -> String {
        self.children.iter().filter_map(XmlNode::as_text).collect()
    }

    /// All descendant elements in pre-order, excluding `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut stack: Vec<&Element> = self.child_elements().collect();
        stack.reverse();
        while let Some(element) = stack.pop() {
            found.push(element);
            let mark = stack.len();
            stack.extend(element.child_elements());
            stack[mark..].reverse();
        }
        found
    }
}

fn build(node: Node<'_, '_>, depth: usize, max_depth: usize) -> Result<Element> {
    if depth > max_depth {
        return Err(NitfError::TooDeep {
            tag_name: node.tag_name().name().to_string(),
            depth,
            limit: max_depth,
        });
    }

    let attributes = node
        .attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(XmlNode::Element(build(child, depth + 1, max_depth)?));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                children.push(XmlNode::Text(text.to_string()));
            }
        }
    }

    Ok(Element {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text_and_elements_in_order() {
        let p = Element::parse("<p>one <em>two</em> three</p>").unwrap();
        assert_eq!(p.children().len(), 3);
        assert_eq!(p.children()[0].as_text(), Some("one "));
        assert_eq!(p.children()[1].as_element().unwrap().name(), "em");
        assert_eq!(p.children()[2].as_text(), Some(" three"));
    }

    #[test]
    fn test_parse_drops_comments() {
        let p = Element::parse("<p>a<!-- note -->b</p>").unwrap();
        assert_eq!(p.direct_text(), "ab");
    }

    #[test]
    fn test_parse_strips_namespace_prefix() {
        let root = Element::parse(r#"<n:nitf xmlns:n="http://iptc.org/std/NITF"><n:head/></n:nitf>"#)
            .unwrap();
        assert_eq!(root.name(), "nitf");
        assert_eq!(root.child_elements().next().unwrap().name(), "head");
    }

    #[test]
    fn test_attributes() {
        let a = Element::parse(r#"<a href="http://x" title="t"/>"#).unwrap();
        assert_eq!(a.attribute("href"), Some("http://x"));
        assert_eq!(a.attribute("missing"), None);
        assert_eq!(a.attributes().len(), 2);
    }

    #[test]
    fn test_direct_text_ignores_nested() {
        let person = Element::parse("<person>John <em>Q.</em> Public</person>").unwrap();
        assert_eq!(person.direct_text(), "John  Public");
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = Element::parse("<r><a><b/><c/></a><d/></r>").unwrap();
        let names: Vec<_> = root.descendants().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_depth_limit() {
        let xml = format!("{}{}", "<b>".repeat(20), "</b>".repeat(20));
        let options = ParseOptions::default().with_max_depth(10);
        let err = Element::parse_with_options(&xml, &options).unwrap_err();
        assert!(matches!(err, NitfError::TooDeep { limit: 10, .. }));
    }

    #[test]
    fn test_builder() {
        let element = Element::new("a")
            .with_attribute("href", "x")
            .with_attribute("href", "y")
            .with_text("link");
        assert_eq!(element.attribute("href"), Some("y"));
        assert_eq!(element.direct_text(), "link");
    }

    #[test]
    fn test_rejects_malformed_xml() {
        assert!(matches!(
            Element::parse("<p>unclosed"),
            Err(NitfError::XmlParse(_))
        ));
    }
}
