//! Data types for NITF articles.
//!
//! Header sections are copied into plain structs when the document is
//! parsed. Paragraphs and bylines keep their element and compute their text
//! and entities on first use.

use std::sync::OnceLock;

use crate::error::Result;
use crate::extract::{extract_all_text, mention_pattern, EntityCell, EntitySet, Link};
use crate::search::TextSource;
use crate::xml::Element;

/// An element whose text and entities are derived lazily.
///
/// Text and entities are cached independently: reading the text never
/// triggers entity extraction.
#[derive(Debug, Clone)]
pub struct InlineContent {
    element: Element,
    text: OnceLock<String>,
    entities: EntityCell,
}

impl InlineContent {
    /// Wrap an element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self {
            element,
            text: OnceLock::new(),
            entities: EntityCell::new(),
        }
    }

    /// The underlying element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Extracted text with leading and trailing whitespace removed.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text
            .get_or_init(|| extract_all_text(&self.element).trim().to_string())
    }

    /// All six entity collections, extracted together on first call.
    #[must_use]
    pub fn entities(&self) -> &EntitySet {
        self.entities.get_or_extract(&self.element)
    }

    /// Whether entity extraction has run.
    #[must_use]
    pub fn entities_extracted(&self) -> bool {
        self.entities.is_extracted()
    }
}

/// A paragraph (`<p>`) of the article body.
#[derive(Debug, Clone)]
pub struct Paragraph {
    content: InlineContent,
}

impl Paragraph {
    /// Wrap a `<p>` element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self {
            content: InlineContent::new(element),
        }
    }

    /// The underlying element.
    #[must_use]
    pub fn element(&self) -> &Element {
        self.content.element()
    }

    /// Value of the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.element().attribute("id")
    }

    /// Value of the `class` attribute.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.element().attribute("class")
    }

    /// Whether the paragraph is marked as the lede.
    #[must_use]
    pub fn is_lede(&self) -> bool {
        self.element().attribute("lede") == Some("true")
    }

    /// Extracted text, trimmed at both ends.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.text()
    }

    /// Whether the paragraph has no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    /// Number of whitespace-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text().split_whitespace().count()
    }

    /// All entity collections.
    #[must_use]
    pub fn entities(&self) -> &EntitySet {
        self.content.entities()
    }

    /// Whether entity extraction has run.
    #[must_use]
    pub fn entities_extracted(&self) -> bool {
        self.content.entities_extracted()
    }

    #[must_use]
    pub fn people(&self) -> &[String] {
        &self.entities().people
    }

    #[must_use]
    pub fn organizations(&self) -> &[String] {
        &self.entities().organizations
    }

    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.entities().locations
    }

    #[must_use]
    pub fn emphasis(&self) -> &[String] {
        &self.entities().emphasis
    }

    #[must_use]
    pub fn strong(&self) -> &[String] {
        &self.entities().strong
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.entities().links
    }

    /// Whether a person matching `name` is mentioned.
    ///
    /// # Errors
    /// `InvalidPattern` when a non-exact `name` cannot be compiled.
    pub fn mentions_person(&self, name: &str, exact: bool) -> Result<bool> {
        EntitySet::matches(self.people(), name, exact)
    }

    /// Whether an organization matching `name` is mentioned.
    pub fn mentions_organization(&self, name: &str, exact: bool) -> Result<bool> {
        EntitySet::matches(self.organizations(), name, exact)
    }

    /// Whether a location matching `name` is mentioned.
    pub fn mentions_location(&self, name: &str, exact: bool) -> Result<bool> {
        EntitySet::matches(self.locations(), name, exact)
    }

    /// Whether any person, organization or location matches `name`.
    pub fn mentions(&self, name: &str, exact: bool) -> Result<bool> {
        let lists = [self.people(), self.organizations(), self.locations()];
        if exact {
            return Ok(lists
                .into_iter()
                .any(|entries| entries.iter().any(|entry| entry == name)));
        }
        let pattern = mention_pattern(name)?;
        Ok(lists
            .into_iter()
            .any(|entries| EntitySet::matches_pattern(entries, &pattern)))
    }
}

impl TextSource for Paragraph {
    fn text(&self) -> &str {
        Paragraph::text(self)
    }

    fn people(&self) -> &[String] {
        Paragraph::people(self)
    }

    fn organizations(&self) -> &[String] {
        Paragraph::organizations(self)
    }

    fn locations(&self) -> &[String] {
        Paragraph::locations(self)
    }
}

/// A `<byline>` in the body head.
#[derive(Debug, Clone)]
pub struct Byline {
    content: InlineContent,
}

impl Byline {
    /// Wrap a `<byline>` element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self {
            content: InlineContent::new(element),
        }
    }

    /// Extracted text, trimmed at both ends.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.text()
    }

    /// Text of the `<byttl>` child (the author's title), if any.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.content
            .element()
            .child_elements()
            .find(|child| child.name() == "byttl")
            .map(|byttl| extract_all_text(byttl).trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn entities(&self) -> &EntitySet {
        self.content.entities()
    }

    #[must_use]
    pub fn people(&self) -> &[String] {
        &self.entities().people
    }

    #[must_use]
    pub fn organizations(&self) -> &[String] {
        &self.entities().organizations
    }

    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.entities().locations
    }
}

impl TextSource for Byline {
    fn text(&self) -> &str {
        Byline::text(self)
    }

    fn people(&self) -> &[String] {
        Byline::people(self)
    }

    fn organizations(&self) -> &[String] {
        Byline::organizations(self)
    }

    fn locations(&self) -> &[String] {
        Byline::locations(self)
    }
}

/// One `<media-reference>` of a media block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaReference {
    pub source: Option<String>,
    pub mime_type: Option<String>,
    pub alternate_text: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// A `<media>` block: image, video, audio and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    /// Value of `media-type`.
    pub media_type: Option<String>,
    pub references: Vec<MediaReference>,
    /// Extracted text of `<media-caption>`.
    pub caption: Option<String>,
    /// Extracted text of `<media-producer>`.
    pub producer: Option<String>,
}

impl Media {
    fn has_type(&self, kind: &str) -> bool {
        self.media_type.as_deref() == Some(kind)
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.has_type("image")
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.has_type("video")
    }

    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.has_type("audio")
    }

    /// The first reference, usually the full-size asset.
    #[must_use]
    pub fn primary_reference(&self) -> Option<&MediaReference> {
        self.references.first()
    }
}

/// A `<tobject.subject>` classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub refnum: Option<String>,
    pub subject_type: Option<String>,
    pub matter: Option<String>,
}

/// People, organizations and locations listed in `<identified-content>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifiedContent {
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
}

/// Document metadata from `<docdata>`.
///
/// Dates are kept as the raw `norm` attribute values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocData {
    pub doc_id: Option<String>,
    pub urgency: Option<u8>,
    pub date_issue: Option<String>,
    pub date_release: Option<String>,
    pub date_expire: Option<String>,
    pub copyright_holder: Option<String>,
    pub copyright_year: Option<String>,
    pub keywords: Vec<String>,
    pub identified_content: IdentifiedContent,
}

/// Publication data from `<pubdata>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubData {
    pub publication_type: Option<String>,
    pub name: Option<String>,
    pub edition: Option<String>,
    pub position_section: Option<String>,
    pub position_sequence: Option<String>,
    pub date_publication: Option<String>,
}

/// The document `<head>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
    pub title: Option<String>,
    /// `<meta name=... content=...>` pairs in document order.
    pub meta: Vec<(String, String)>,
    pub tobject_type: Option<String>,
    pub subjects: Vec<Subject>,
    pub docdata: DocData,
    pub pubdata: PubData,
}

impl Head {
    /// Content of the first `<meta>` with the given name.
    #[must_use]
    pub fn meta_value(&self, name: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The `<dateline>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dateline {
    /// Full extracted text.
    pub text: String,
    pub location: Option<String>,
    pub story_date: Option<String>,
}

/// The `<body.head>` section.
#[derive(Debug, Clone, Default)]
pub struct BodyHead {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub bylines: Vec<Byline>,
    pub dateline: Option<Dateline>,
    pub abstract_text: Option<String>,
    pub distributor: Option<String>,
}

/// The document `<body>`.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub head: BodyHead,
    pub paragraphs: Vec<Paragraph>,
    pub media: Vec<Media>,
    pub tagline: Option<String>,
}

/// Deduplicated entities across a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllEntities {
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph(xml: &str) -> Paragraph {
        Paragraph::new(Element::parse(xml).unwrap())
    }

    #[test]
    fn test_paragraph_text_is_trimmed() {
        let p = paragraph("<p>\n   Hello <em>there</em>  \n</p>");
        assert_eq!(p.text(), "Hello there");
    }

    #[test]
    fn test_paragraph_text_keeps_inner_breaks() {
        let p = paragraph("<p>Line one<br/>Line two</p>");
        assert_eq!(p.text(), "Line one\nLine two");
    }

    #[test]
    fn test_text_does_not_trigger_entity_extraction() {
        let p = paragraph("<p>Hi <person>Ann</person></p>");
        assert_eq!(p.text(), "Hi Ann");
        assert!(!p.entities_extracted());
        assert_eq!(p.people(), ["Ann"]);
        assert!(p.entities_extracted());
    }

    #[test]
    fn test_entity_accessors_share_one_extraction() {
        let p = paragraph(
            r#"<p><person>Ann</person> <org>Acme</org> <location>Rome</location>
               <em>e</em> <strong>s</strong> <a href="u">l</a></p>"#,
        );
        let first = p.entities() as *const EntitySet;
        assert_eq!(p.people(), ["Ann"]);
        assert_eq!(p.organizations(), ["Acme"]);
        assert_eq!(p.locations(), ["Rome"]);
        assert_eq!(p.emphasis(), ["e"]);
        assert_eq!(p.strong(), ["s"]);
        assert_eq!(p.links().len(), 1);
        assert!(std::ptr::eq(first, p.entities()));
    }

    #[test]
    fn test_paragraph_attributes() {
        let p = paragraph(r#"<p id="p1" lede="true" class="intro">x</p>"#);
        assert_eq!(p.id(), Some("p1"));
        assert_eq!(p.class(), Some("intro"));
        assert!(p.is_lede());
        assert!(!paragraph("<p>x</p>").is_lede());
    }

    #[test]
    fn test_paragraph_mentions() {
        let p = paragraph("<p><person>John Doe</person> visited <location>Paris</location></p>");
        assert!(p.mentions_person("john", false).unwrap());
        assert!(!p.mentions_person("john", true).unwrap());
        assert!(p.mentions_person("John Doe", true).unwrap());
        assert!(p.mentions_location("PAR", false).unwrap());
        assert!(!p.mentions_organization("Doe", false).unwrap());
        assert!(p.mentions("paris", false).unwrap());
        assert!(p.mentions("Paris", true).unwrap());
        assert!(!p.mentions("paris", true).unwrap());
        assert!(!p.mentions("Berlin", false).unwrap());
    }

    #[test]
    fn test_paragraph_word_count_and_empty() {
        assert_eq!(paragraph("<p>one two  three</p>").word_count(), 3);
        assert!(paragraph("<p>  </p>").is_empty());
    }

    #[test]
    fn test_byline() {
        let byline = Byline::new(
            Element::parse("<byline>By <person>Jane Smith</person>, <byttl>Staff Writer</byttl></byline>")
                .unwrap(),
        );
        assert_eq!(byline.text(), "By Jane Smith, Staff Writer");
        assert_eq!(byline.people(), ["Jane Smith"]);
        assert_eq!(byline.title().as_deref(), Some("Staff Writer"));
    }

    #[test]
    fn test_media_kinds() {
        let media = Media {
            media_type: Some("image".to_string()),
            references: vec![MediaReference {
                source: Some("a.jpg".to_string()),
                ..MediaReference::default()
            }],
            ..Media::default()
        };
        assert!(media.is_image());
        assert!(!media.is_video());
        assert_eq!(
            media.primary_reference().and_then(|r| r.source.as_deref()),
            Some("a.jpg")
        );
    }

    #[test]
    fn test_head_meta_value() {
        let head = Head {
            meta: vec![("author".to_string(), "AP".to_string())],
            ..Head::default()
        };
        assert_eq!(head.meta_value("author"), Some("AP"));
        assert_eq!(head.meta_value("missing"), None);
    }
}
