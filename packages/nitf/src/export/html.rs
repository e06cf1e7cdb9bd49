//! HTML fragment rendering.

use crate::document::Document;

/// Escape the five HTML special characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a document as a self-contained `<article>` fragment.
///
/// Line breaks inside paragraphs become `<br>`. Lede paragraphs carry
/// `class="lede"`.
#[must_use]
pub fn to_html(doc: &Document) -> String {
    let mut html = String::from("<article>\n");

    if let Some(headline) = doc.headline().or(doc.title()) {
        html.push_str(&format!("  <h1>{}</h1>\n", escape_html(headline)));
    }
    if let Some(subheadline) = doc.subheadline() {
        html.push_str(&format!("  <h2>{}</h2>\n", escape_html(subheadline)));
    }
    for byline in doc.bylines().iter().filter(|b| !b.text().is_empty()) {
        html.push_str(&format!("  <p class=\"byline\">{}</p>\n", escape_html(byline.text())));
    }
    if let Some(dateline) = doc.dateline().filter(|d| !d.text.is_empty()) {
        html.push_str(&format!(
            "  <p class=\"dateline\">{}</p>\n",
            escape_html(&dateline.text)
        ));
    }

    for paragraph in doc.paragraphs().iter().filter(|p| !p.is_empty()) {
        let body = escape_html(paragraph.text()).replace('\n', "<br>");
        if paragraph.is_lede() {
            html.push_str(&format!("  <p class=\"lede\">{body}</p>\n"));
        } else {
            html.push_str(&format!("  <p>{body}</p>\n"));
        }
    }

    for image in doc.images() {
        let Some(reference) = image.primary_reference() else {
            continue;
        };
        let src = escape_html(reference.source.as_deref().unwrap_or_default());
        let alt = escape_html(reference.alternate_text.as_deref().unwrap_or_default());
        html.push_str("  <figure>\n");
        html.push_str(&format!("    <img src=\"{src}\" alt=\"{alt}\">\n"));
        if let Some(caption) = &image.caption {
            html.push_str(&format!("    <figcaption>{}</figcaption>\n", escape_html(caption)));
        }
        html.push_str("  </figure>\n");
    }

    if let Some(tagline) = &doc.body.tagline {
        html.push_str(&format!("  <footer>{}</footer>\n", escape_html(tagline)));
    }

    html.push_str("</article>\n");
    html
}
