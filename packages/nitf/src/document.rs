//! NITF document parsing and document-level queries.

use std::path::Path;
use std::sync::OnceLock;

use crate::config::{ParseOptions, DEFAULT_EXCERPT_CONTEXT};
use crate::error::{NitfError, Result};
use crate::extract::{extract_all_text, mention_pattern, EntitySet};
use crate::search::{self, MentionFilter, Query, SearchMatch};
use crate::types::{
    AllEntities, Body, BodyHead, Byline, Dateline, DocData, Head, IdentifiedContent, Media,
    MediaReference, Paragraph, PubData, Subject,
};
use crate::xml::{
    attribute_at, find_by_path, find_child, find_children, find_descendants, get_attribute,
    has_tag, numeric_attribute, Element,
};

/// Root element of every NITF document.
const ROOT_TAG: &str = "nitf";

/// A parsed NITF article.
#[derive(Debug, Clone)]
pub struct Document {
    pub head: Head,
    pub body: Body,
    text: OnceLock<String>,
    all_entities: OnceLock<AllEntities>,
}

impl Document {
    /// Parse an NITF document with default options.
    ///
    /// # Examples
    /// ```
    /// use nitf_reader::Document;
    ///
    /// let xml = r#"<nitf><head><title>Hello</title></head>
    ///   <body><body.content><p>First <person>Ann</person>.</p></body.content></body></nitf>"#;
    /// let doc = Document::parse(xml).unwrap();
    /// assert_eq!(doc.title(), Some("Hello"));
    /// assert_eq!(doc.paragraphs()[0].text(), "First Ann.");
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with_options(xml, &ParseOptions::default())
    }

    /// Parse an NITF document.
    ///
    /// # Errors
    /// `XmlParse` for malformed XML, `MissingElement` when the root is not
    /// `<nitf>`, `TooDeep` when nesting exceeds `options.max_depth`.
    pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<Self> {
        let root = Element::parse_with_options(xml, options)?;
        let document = Self::from_element(&root)?;
        tracing::debug!(
            paragraphs = document.body.paragraphs.len(),
            media = document.body.media.len(),
            "Parsed NITF document"
        );
        Ok(document)
    }

    /// Read and parse a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading NITF file");
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Build a document from an already parsed `<nitf>` element.
    pub fn from_element(root: &Element) -> Result<Self> {
        if !has_tag(root, ROOT_TAG) {
            return Err(NitfError::MissingElement {
                element: ROOT_TAG.to_string(),
                context: format!("document root (found <{}>)", root.name()),
            });
        }

        let head = find_child(root, "head").map(parse_head).unwrap_or_default();
        let body = find_child(root, "body").map(parse_body).unwrap_or_default();

        Ok(Self {
            head,
            body,
            text: OnceLock::new(),
            all_entities: OnceLock::new(),
        })
    }

    /// `<head><title>`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.head.title.as_deref()
    }

    /// `<hl1>` headline.
    #[must_use]
    pub fn headline(&self) -> Option<&str> {
        self.body.head.headline.as_deref()
    }

    /// `<hl2>` subheadline.
    #[must_use]
    pub fn subheadline(&self) -> Option<&str> {
        self.body.head.subheadline.as_deref()
    }

    #[must_use]
    pub fn doc_id(&self) -> Option<&str> {
        self.head.docdata.doc_id.as_deref()
    }

    /// Text of the first byline.
    #[must_use]
    pub fn byline(&self) -> Option<&str> {
        self.body
            .head
            .bylines
            .first()
            .map(Byline::text)
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn bylines(&self) -> &[Byline] {
        &self.body.head.bylines
    }

    #[must_use]
    pub fn dateline(&self) -> Option<&Dateline> {
        self.body.head.dateline.as_ref()
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.body.paragraphs
    }

    #[must_use]
    pub fn media(&self) -> &[Media] {
        &self.body.media
    }

    /// Media blocks of type `image`.
    #[must_use]
    pub fn images(&self) -> Vec<&Media> {
        self.find_media("image")
    }

    /// The lede: the paragraph marked `lede="true"`, else the first non-empty one.
    #[must_use]
    pub fn lede(&self) -> Option<&Paragraph> {
        self.find_paragraph(Paragraph::is_lede)
            .or_else(|| self.find_paragraph(|p| !p.is_empty()))
    }

    /// Body text: non-empty paragraph texts separated by a blank line.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| {
            self.body
                .paragraphs
                .iter()
                .map(Paragraph::text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n")
        })
    }

    /// Words across all paragraphs.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.body.paragraphs.iter().map(Paragraph::word_count).sum()
    }

    /// Every match of `query` in the body paragraphs.
    pub fn search(
        &self,
        query: impl Into<Query>,
        case_sensitive: bool,
    ) -> Result<Vec<SearchMatch<'_, Paragraph>>> {
        search::search(self.paragraphs(), &query.into(), case_sensitive)
    }

    /// Whether `query` occurs in the body text.
    ///
    /// The joined text is searched, so a pattern spanning two paragraphs
    /// can match here while [`Document::search`] and
    /// [`Document::count_occurrences`] report nothing.
    pub fn contains(&self, query: impl Into<Query>, case_sensitive: bool) -> Result<bool> {
        search::contains(self.text(), &query.into(), case_sensitive)
    }

    /// Paragraphs matching `query`.
    pub fn paragraphs_containing(
        &self,
        query: impl Into<Query>,
        case_sensitive: bool,
    ) -> Result<Vec<&Paragraph>> {
        search::paragraphs_containing(self.paragraphs(), &query.into(), case_sensitive)
    }

    /// Paragraphs mentioning the filtered entities.
    pub fn paragraphs_mentioning(
        &self,
        filter: &MentionFilter,
        match_all: bool,
    ) -> Result<Vec<&Paragraph>> {
        search::paragraphs_mentioning(self.paragraphs(), filter, match_all)
    }

    /// Number of matches across the body.
    pub fn count_occurrences(&self, query: impl Into<Query>, case_sensitive: bool) -> Result<usize> {
        search::count_occurrences(self.paragraphs(), &query.into(), case_sensitive)
    }

    /// Excerpt around the first match, with the default context width.
    pub fn excerpt(&self, query: impl Into<Query>) -> Result<Option<String>> {
        self.excerpt_with(query, DEFAULT_EXCERPT_CONTEXT, false)
    }

    /// Excerpt around the first match.
    pub fn excerpt_with(
        &self,
        query: impl Into<Query>,
        context_chars: usize,
        case_sensitive: bool,
    ) -> Result<Option<String>> {
        search::excerpt(self.text(), &query.into(), context_chars, case_sensitive)
    }

    /// Paragraphs satisfying `predicate`, in order.
    pub fn paragraphs_where<F>(&self, predicate: F) -> Vec<&Paragraph>
    where
        F: Fn(&Paragraph) -> bool,
    {
        self.body.paragraphs.iter().filter(|p| predicate(p)).collect()
    }

    /// First paragraph satisfying `predicate`.
    pub fn find_paragraph<F>(&self, predicate: F) -> Option<&Paragraph>
    where
        F: Fn(&Paragraph) -> bool,
    {
        self.body.paragraphs.iter().find(|p| predicate(p))
    }

    /// Media blocks with the given `media-type`.
    #[must_use]
    pub fn find_media(&self, media_type: &str) -> Vec<&Media> {
        self.body
            .media
            .iter()
            .filter(|m| m.media_type.as_deref() == Some(media_type))
            .collect()
    }

    /// Whether some paragraph mentions a person containing `name`.
    pub fn mentions_person(&self, name: &str) -> Result<bool> {
        self.any_paragraph_mentions(name, Paragraph::people)
    }

    /// Whether some paragraph mentions an organization containing `name`.
    pub fn mentions_organization(&self, name: &str) -> Result<bool> {
        self.any_paragraph_mentions(name, Paragraph::organizations)
    }

    /// Whether some paragraph mentions a location containing `name`.
    pub fn mentions_location(&self, name: &str) -> Result<bool> {
        self.any_paragraph_mentions(name, Paragraph::locations)
    }

    fn any_paragraph_mentions<F>(&self, name: &str, entries: F) -> Result<bool>
    where
        F: Fn(&Paragraph) -> &[String],
    {
        let pattern = mention_pattern(name)?;
        Ok(self
            .body
            .paragraphs
            .iter()
            .any(|p| EntitySet::matches_pattern(entries(p), &pattern)))
    }

    /// Deduplicated entities from all paragraphs plus identified content.
    ///
    /// Computed once per document.
    #[must_use]
    pub fn all_entities(&self) -> &AllEntities {
        self.all_entities.get_or_init(|| {
            let mut people = Vec::new();
            let mut organizations = Vec::new();
            let mut locations = Vec::new();

            for paragraph in &self.body.paragraphs {
                let entities = paragraph.entities();
                people.extend(entities.people.iter().cloned());
                organizations.extend(entities.organizations.iter().cloned());
                locations.extend(entities.locations.iter().cloned());
            }

            let identified = &self.head.docdata.identified_content;
            people.extend(identified.people.iter().cloned());
            organizations.extend(identified.organizations.iter().cloned());
            locations.extend(identified.locations.iter().cloned());

            AllEntities {
                people: dedup(people),
                organizations: dedup(organizations),
                locations: dedup(locations),
            }
        })
    }

    #[must_use]
    pub fn all_people(&self) -> &[String] {
        &self.all_entities().people
    }

    #[must_use]
    pub fn all_organizations(&self) -> &[String] {
        &self.all_entities().organizations
    }

    #[must_use]
    pub fn all_locations(&self) -> &[String] {
        &self.all_entities().locations
    }
}

/// Remove repeats, keeping the first occurrence of each value.
fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Trimmed full text of an element, `None` when blank.
fn full_text(element: &Element) -> Option<String> {
    Some(extract_all_text(element).trim().to_string()).filter(|s| !s.is_empty())
}

/// Full text of the element at `path`.
fn full_text_at(node: &Element, path: &str) -> Option<String> {
    find_by_path(node, path).and_then(full_text)
}

fn owned_attribute(element: &Element, name: &str) -> Option<String> {
    get_attribute(element, name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_head(head: &Element) -> Head {
    let meta = find_children(head, "meta")
        .filter_map(|meta| {
            Some((
                meta.attribute("name")?.to_string(),
                meta.attribute("content").unwrap_or_default().to_string(),
            ))
        })
        .collect();

    let tobject = find_child(head, "tobject");
    let subjects = tobject
        .map(|tobject| {
            find_children(tobject, "tobject.subject")
                .map(|subject| Subject {
                    refnum: owned_attribute(subject, "tobject.subject.refnum"),
                    subject_type: owned_attribute(subject, "tobject.subject.type"),
                    matter: owned_attribute(subject, "tobject.subject.matter"),
                })
                .collect()
        })
        .unwrap_or_default();

    Head {
        title: full_text_at(head, "title"),
        meta,
        tobject_type: tobject.and_then(|t| owned_attribute(t, "tobject.type")),
        subjects,
        docdata: find_child(head, "docdata").map(parse_docdata).unwrap_or_default(),
        pubdata: find_child(head, "pubdata").map(parse_pubdata).unwrap_or_default(),
    }
}

fn parse_docdata(docdata: &Element) -> DocData {
    let keywords = find_child(docdata, "key-list")
        .map(|list| {
            find_children(list, "keyword")
                .filter_map(|keyword| owned_attribute(keyword, "key"))
                .collect()
        })
        .unwrap_or_default();

    DocData {
        doc_id: attribute_at(docdata, "doc-id", "id-string"),
        urgency: find_child(docdata, "urgency").and_then(|u| numeric_attribute(u, "ed-urg")),
        date_issue: attribute_at(docdata, "date.issue", "norm"),
        date_release: attribute_at(docdata, "date.release", "norm"),
        date_expire: attribute_at(docdata, "date.expire", "norm"),
        copyright_holder: attribute_at(docdata, "doc.copyright", "holder"),
        copyright_year: attribute_at(docdata, "doc.copyright", "year"),
        keywords,
        identified_content: find_child(docdata, "identified-content")
            .map(parse_identified_content)
            .unwrap_or_default(),
    }
}

fn parse_identified_content(identified: &Element) -> IdentifiedContent {
    let names = |tag: &str| -> Vec<String> {
        identified
            .child_elements()
            .filter(|child| child.name() == tag)
            .filter_map(full_text)
            .collect()
    };

    IdentifiedContent {
        people: names("person"),
        organizations: names("org"),
        locations: names("location"),
    }
}

fn parse_pubdata(pubdata: &Element) -> PubData {
    PubData {
        publication_type: owned_attribute(pubdata, "type"),
        name: owned_attribute(pubdata, "name"),
        edition: owned_attribute(pubdata, "edition.name"),
        position_section: owned_attribute(pubdata, "position.section"),
        position_sequence: owned_attribute(pubdata, "position.sequence"),
        date_publication: owned_attribute(pubdata, "date.publication"),
    }
}

fn parse_body(body: &Element) -> Body {
    let head = find_child(body, "body.head")
        .map(parse_body_head)
        .unwrap_or_default();

    let (paragraphs, media) = match find_child(body, "body.content") {
        Some(content) => (
            find_descendants(content, "p")
                .into_iter()
                .map(|p| Paragraph::new(p.clone()))
                .collect(),
            find_descendants(content, "media")
                .into_iter()
                .map(parse_media)
                .collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    Body {
        head,
        paragraphs,
        media,
        tagline: full_text_at(body, "body.end/tagline"),
    }
}

fn parse_body_head(body_head: &Element) -> BodyHead {
    let dateline = find_child(body_head, "dateline").map(|dateline| Dateline {
        text: full_text(dateline).unwrap_or_default(),
        location: full_text_at(dateline, "location"),
        story_date: full_text_at(dateline, "story.date"),
    });

    BodyHead {
        headline: full_text_at(body_head, "hedline/hl1"),
        subheadline: full_text_at(body_head, "hedline/hl2"),
        bylines: find_children(body_head, "byline")
            .map(|byline| Byline::new(byline.clone()))
            .collect(),
        dateline,
        abstract_text: full_text_at(body_head, "abstract"),
        distributor: full_text_at(body_head, "distributor"),
    }
}

fn parse_media(media: &Element) -> Media {
    let references = find_children(media, "media-reference")
        .map(|reference| MediaReference {
            source: owned_attribute(reference, "source"),
            mime_type: owned_attribute(reference, "mime-type"),
            alternate_text: owned_attribute(reference, "alternate-text"),
            height: numeric_attribute(reference, "height"),
            width: numeric_attribute(reference, "width"),
        })
        .collect();

    Media {
        media_type: owned_attribute(media, "media-type"),
        references,
        caption: full_text_at(media, "media-caption"),
        producer: full_text_at(media, "media-producer"),
    }
}
