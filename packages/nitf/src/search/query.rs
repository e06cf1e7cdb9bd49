//! Full-text search and entity-mention queries over ordered paragraphs.

use regex::Regex;

use crate::error::Result;
use crate::extract::{mention_pattern, EntitySet};

use super::pattern::{build_pattern, Query};

/// Anything with extracted text and entity collections that can be searched.
pub trait TextSource {
    /// Extracted text.
    fn text(&self) -> &str;

    /// People mentioned inline.
    fn people(&self) -> &[String];

    /// Organizations mentioned inline.
    fn organizations(&self) -> &[String];

    /// Locations mentioned inline.
    fn locations(&self) -> &[String];
}

/// One occurrence of a query in a paragraph.
#[derive(Debug)]
pub struct SearchMatch<'a, T> {
    /// Zero-based position of the paragraph in the document.
    pub paragraph_index: usize,
    /// The paragraph containing the match.
    pub paragraph: &'a T,
    /// The matched text.
    pub matched: String,
    /// Character offset of the match start within the paragraph text.
    pub offset: usize,
}

impl<T> Clone for SearchMatch<'_, T> {
    fn clone(&self) -> Self {
        Self {
            paragraph_index: self.paragraph_index,
            paragraph: self.paragraph,
            matched: self.matched.clone(),
            offset: self.offset,
        }
    }
}

impl<T: TextSource> SearchMatch<'_, T> {
    /// The match with up to `context_chars` characters of paragraph text on
    /// each side, marked with `...` where the paragraph continues.
    #[must_use]
    pub fn context(&self, context_chars: usize) -> String {
        let end = self.offset + self.matched.chars().count();
        window(self.paragraph.text(), self.offset, end, context_chars)
    }
}

/// Entity filters for [`paragraphs_mentioning`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionFilter {
    pub person: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
}

impl MentionFilter {
    /// Filter with no criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a person.
    #[must_use]
    pub fn person(mut self, name: impl Into<String>) -> Self {
        self.person = Some(name.into());
        self
    }

    /// Require an organization.
    #[must_use]
    pub fn organization(mut self, name: impl Into<String>) -> Self {
        self.organization = Some(name.into());
        self
    }

    /// Require a location.
    #[must_use]
    pub fn location(mut self, name: impl Into<String>) -> Self {
        self.location = Some(name.into());
        self
    }

    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.person.is_none() && self.organization.is_none() && self.location.is_none()
    }

    /// Compile each set criterion once.
    fn compile(&self) -> Result<CompiledFilter> {
        let compile = |name: Option<&str>| name.map(mention_pattern).transpose();
        Ok(CompiledFilter {
            person: compile(self.person.as_deref())?,
            organization: compile(self.organization.as_deref())?,
            location: compile(self.location.as_deref())?,
        })
    }
}

/// A [`MentionFilter`] with its patterns built.
struct CompiledFilter {
    person: Option<Regex>,
    organization: Option<Regex>,
    location: Option<Regex>,
}

impl CompiledFilter {
    fn evaluate<T: TextSource>(&self, item: &T, match_all: bool) -> bool {
        let checks = [
            (&self.person, item.people()),
            (&self.organization, item.organizations()),
            (&self.location, item.locations()),
        ];
        let mut results = checks.into_iter().filter_map(|(pattern, entries)| {
            pattern
                .as_ref()
                .map(|pattern| EntitySet::matches_pattern(entries, pattern))
        });

        if match_all {
            results.all(|hit| hit)
        } else {
            results.any(|hit| hit)
        }
    }
}

/// Character position of a byte offset.
fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Byte position of a character offset, clamped to the text length.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Find every non-overlapping match in every paragraph.
///
/// Matches are ordered by paragraph, then left to right. An empty query
/// matches at every character boundary, including the end of the text.
pub fn search<'a, T: TextSource>(
    items: &'a [T],
    query: &Query,
    case_sensitive: bool,
) -> Result<Vec<SearchMatch<'a, T>>> {
    let pattern = build_pattern(query, case_sensitive)?;
    let mut matches = Vec::new();

    for (paragraph_index, paragraph) in items.iter().enumerate() {
        let text = paragraph.text();
        for found in pattern.find_iter(text) {
            matches.push(SearchMatch {
                paragraph_index,
                paragraph,
                matched: found.as_str().to_string(),
                offset: char_offset(text, found.start()),
            });
        }
    }

    tracing::debug!(matches = matches.len(), "Search completed");
    Ok(matches)
}

/// Whether the query occurs anywhere in `text`.
///
/// `text` is searched as one string, so a pattern may match across the
/// blank line between two paragraphs of a document's text. [`search`] and
/// [`count_occurrences`] work paragraph by paragraph and never report such
/// a match.
pub fn contains(text: &str, query: &Query, case_sensitive: bool) -> Result<bool> {
    let pattern = build_pattern(query, case_sensitive)?;
    Ok(pattern.is_match(text))
}

/// Paragraphs whose text matches the query at least once.
pub fn paragraphs_containing<'a, T: TextSource>(
    items: &'a [T],
    query: &Query,
    case_sensitive: bool,
) -> Result<Vec<&'a T>> {
    let pattern = build_pattern(query, case_sensitive)?;
    Ok(items
        .iter()
        .filter(|item| pattern.is_match(item.text()))
        .collect())
}

/// Paragraphs mentioning the given entities.
///
/// With an empty filter every paragraph is returned. Otherwise each set
/// criterion is a case-insensitive substring test against the matching
/// entity list, combined with OR, or with AND when `match_all` is set.
///
/// # Errors
/// `InvalidPattern` when a filter name cannot be compiled.
pub fn paragraphs_mentioning<'a, T: TextSource>(
    items: &'a [T],
    filter: &MentionFilter,
    match_all: bool,
) -> Result<Vec<&'a T>> {
    if filter.is_empty() {
        return Ok(items.iter().collect());
    }
    let compiled = filter.compile()?;
    Ok(items
        .iter()
        .filter(|item| compiled.evaluate(*item, match_all))
        .collect())
}

/// Total number of non-overlapping matches, summed per paragraph.
pub fn count_occurrences<T: TextSource>(
    items: &[T],
    query: &Query,
    case_sensitive: bool,
) -> Result<usize> {
    let pattern = build_pattern(query, case_sensitive)?;
    Ok(items
        .iter()
        .map(|item| pattern.find_iter(item.text()).count())
        .sum())
}

/// Text surrounding the first match, with `...` marking truncated ends.
///
/// The window extends `context_chars` characters either side of the match
/// and is clamped to the text. Returns `None` when nothing matches.
///
/// # Examples
/// ```
/// use nitf_reader::search::{excerpt, Query};
///
/// let text = "The quick brown fox jumps over the lazy dog";
/// let found = excerpt(text, &Query::literal("fox"), 4, false).unwrap();
/// assert_eq!(found.as_deref(), Some("...own fox jum..."));
/// ```
pub fn excerpt(
    text: &str,
    query: &Query,
    context_chars: usize,
    case_sensitive: bool,
) -> Result<Option<String>> {
    let pattern = build_pattern(query, case_sensitive)?;
    let Some(found) = pattern.find(text) else {
        return Ok(None);
    };

    let start = char_offset(text, found.start());
    let end = start + found.as_str().chars().count();
    Ok(Some(window(text, start, end, context_chars)))
}

/// Characters `start..end` of `text` widened by `context_chars` on each side
/// and clamped to the text, with `...` on any side that was cut.
fn window(text: &str, start: usize, end: usize, context_chars: usize) -> String {
    let total = text.chars().count();
    let window_start = start.saturating_sub(context_chars);
    let window_end = end.saturating_add(context_chars).min(total);

    let mut result = String::new();
    if window_start > 0 {
        result.push_str("...");
    }
    result.push_str(&text[byte_offset(text, window_start)..byte_offset(text, window_end)]);
    if window_end < total {
        result.push_str("...");
    }
    result
}
