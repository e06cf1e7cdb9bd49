//! Markdown rendering.

use crate::document::Document;

/// Render a document as Markdown.
///
/// Layout: `# headline`, `## subheadline`, italic byline, bold dateline,
/// paragraphs, images with italic captions, tagline.
#[must_use]
pub fn to_markdown(doc: &Document) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(headline) = doc.headline().or(doc.title()) {
        blocks.push(format!("# {headline}"));
    }
    if let Some(subheadline) = doc.subheadline() {
        blocks.push(format!("## {subheadline}"));
    }
    if let Some(byline) = doc.byline() {
        blocks.push(format!("*{byline}*"));
    }

    let mut paragraphs = doc
        .paragraphs()
        .iter()
        .map(|p| p.text())
        .filter(|text| !text.is_empty())
        .map(|text| text.replace('\n', "  \n"));

    if let Some(dateline) = doc.dateline().filter(|d| !d.text.is_empty()) {
        let first = paragraphs.next().unwrap_or_default();
        blocks.push(format!("**{}** - {first}", dateline.text).trim_end().to_string());
    }
    blocks.extend(paragraphs);

    for image in doc.images() {
        let Some(reference) = image.primary_reference() else {
            continue;
        };
        let alt = reference.alternate_text.as_deref().unwrap_or_default();
        let src = reference.source.as_deref().unwrap_or_default();
        blocks.push(format!("![{alt}]({src})"));
        if let Some(caption) = &image.caption {
            blocks.push(format!("*{caption}*"));
        }
    }

    if let Some(tagline) = &doc.body.tagline {
        blocks.push(format!("---\n\n{tagline}"));
    }

    let mut markdown = blocks.join("\n\n");
    markdown.push('\n');
    markdown
}
