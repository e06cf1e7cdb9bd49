//! Inline entity extraction with one-shot memoization.
//!
//! Entities are the inline markers of an article: people, organizations and
//! locations, plus emphasis, bold and link markup. All six collections are
//! filled by a single walk over the owning element and cached together.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{
    EMPHASIS_TAG, LINK_HREF_ATTR, LINK_TAG, LOCATION_TAG, ORG_TAG, PERSON_TAG, STRONG_TAG,
};
use crate::error::Result;
use crate::search::{build_pattern, Query};
use crate::xml::{get_text, Element};

/// A hyperlink found in inline markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Trimmed direct text of the link, `None` when blank.
    pub text: Option<String>,
    /// Value of the `href` attribute.
    pub href: Option<String>,
}

/// Which collection a tag feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Organization,
    Location,
    Emphasis,
    Strong,
    Link,
}

impl EntityKind {
    /// Classify a tag name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            PERSON_TAG => Some(Self::Person),
            ORG_TAG => Some(Self::Organization),
            LOCATION_TAG => Some(Self::Location),
            EMPHASIS_TAG => Some(Self::Emphasis),
            STRONG_TAG => Some(Self::Strong),
            LINK_TAG => Some(Self::Link),
            _ => None,
        }
    }
}

/// The six entity collections of one element, in discovery order.
///
/// Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntitySet {
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    pub emphasis: Vec<String>,
    pub strong: Vec<String>,
    pub links: Vec<Link>,
}

impl EntitySet {
    fn record(&mut self, kind: EntityKind, element: &Element) {
        // Direct text only: markup nested inside an entity is not part of its name.
        let text = get_text(element);

        let bucket = match kind {
            EntityKind::Person => &mut self.people,
            EntityKind::Organization => &mut self.organizations,
            EntityKind::Location => &mut self.locations,
            EntityKind::Emphasis => &mut self.emphasis,
            EntityKind::Strong => &mut self.strong,
            EntityKind::Link => {
                self.links.push(Link {
                    text: (!text.is_empty()).then(|| text.clone()),
                    href: element.attribute(LINK_HREF_ATTR).map(str::to_string),
                });
                return;
            }
        };

        if !text.is_empty() {
            bucket.push(text);
        }
    }

    /// True when no collection has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.organizations.is_empty()
            && self.locations.is_empty()
            && self.emphasis.is_empty()
            && self.strong.is_empty()
            && self.links.is_empty()
    }

    /// Test whether `name` matches any entry.
    ///
    /// Exact mode compares byte for byte. Otherwise `name` is matched as a
    /// case-insensitive literal substring, so "john" matches "John Doe".
    ///
    /// # Errors
    /// `InvalidPattern` when `name` is too large to compile.
    ///
    /// # Examples
    /// ```
    /// use nitf_reader::extract::EntitySet;
    ///
    /// let people = vec!["John Doe".to_string()];
    /// assert!(EntitySet::matches(&people, "john", false).unwrap());
    /// assert!(!EntitySet::matches(&people, "John", true).unwrap());
    /// assert!(EntitySet::matches(&people, "John Doe", true).unwrap());
    /// ```
    pub fn matches(entries: &[String], name: &str, exact: bool) -> Result<bool> {
        if exact {
            return Ok(entries.iter().any(|entry| entry == name));
        }
        let pattern = mention_pattern(name)?;
        Ok(Self::matches_pattern(entries, &pattern))
    }

    /// Whether `pattern` occurs in any entry.
    #[must_use]
    pub fn matches_pattern(entries: &[String], pattern: &Regex) -> bool {
        entries.iter().any(|entry| pattern.is_match(entry))
    }
}

/// The non-exact mention pattern for `name`: an escaped, case-insensitive
/// literal.
pub fn mention_pattern(name: &str) -> Result<Regex> {
    build_pattern(&Query::literal(name), false)
}

/// Walk an element once and collect its entities.
///
/// Visits every descendant in pre-order. Classified elements are still
/// descended into, so an `<em>` inside a `<person>` lands in both buckets.
#[must_use]
pub fn extract_entities(root: &Element) -> EntitySet {
    let mut entities = EntitySet::default();
    let mut stack = vec![root.child_elements()];

    while let Some(children) = stack.last_mut() {
        let Some(element) = children.next() else {
            stack.pop();
            continue;
        };
        if let Some(kind) = EntityKind::from_tag(element.name()) {
            entities.record(kind, element);
        }
        stack.push(element.child_elements());
    }

    entities
}

/// Lazily computed entity collections for one owner.
///
/// The first read of any collection runs [`extract_entities`] and stores
/// the full set; later reads are lookups.
#[derive(Debug, Clone, Default)]
pub struct EntityCell {
    cell: OnceLock<EntitySet>,
}

impl EntityCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entities, extracting them from `owner` on first use.
    pub fn get_or_extract(&self, owner: &Element) -> &EntitySet {
        self.cell.get_or_init(|| {
            let entities = extract_entities(owner);
            tracing::debug!(
                tag = %owner.name(),
                people = entities.people.len(),
                organizations = entities.organizations.len(),
                locations = entities.locations.len(),
                links = entities.links.len(),
                "Extracted inline entities"
            );
            entities
        })
    }

    /// Whether extraction has already run.
    #[must_use]
    pub fn is_extracted(&self) -> bool {
        self.cell.get().is_some()
    }
}
