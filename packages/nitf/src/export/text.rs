//! Plain-text rendering with line wrapping.

use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;
use crate::document::Document;

/// Wrap each line of `text` at `width`, keeping existing line breaks.
///
/// A width of 0 disables wrapping.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let options = Options::new(width);
    text.lines()
        .map(|line| fill(line, &options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a document as plain text wrapped at `width` columns.
///
/// The headline is underlined with `=`; byline and dateline follow on their
/// own lines, then one block per paragraph.
#[must_use]
pub fn to_text(doc: &Document, width: usize) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(headline) = doc.headline().or(doc.title()) {
        let underline = "=".repeat(headline.chars().count());
        blocks.push(format!("{headline}\n{underline}"));
    }
    if let Some(subheadline) = doc.subheadline() {
        blocks.push(wrap_text(subheadline, width));
    }

    let credits: Vec<&str> = doc
        .byline()
        .into_iter()
        .chain(doc.dateline().map(|d| d.text.as_str()))
        .filter(|s| !s.is_empty())
        .collect();
    if !credits.is_empty() {
        blocks.push(credits.join("\n"));
    }

    blocks.extend(
        doc.paragraphs()
            .iter()
            .map(|p| p.text())
            .filter(|text| !text.is_empty())
            .map(|text| wrap_text(text, width)),
    );

    if let Some(tagline) = &doc.body.tagline {
        blocks.push(wrap_text(tagline, width));
    }

    let mut text = blocks.join("\n\n");
    text.push('\n');
    text
}

/// Render with the default width.
#[must_use]
pub fn to_text_default(doc: &Document) -> String {
    to_text(doc, TEXT_WRAP_WIDTH)
}
