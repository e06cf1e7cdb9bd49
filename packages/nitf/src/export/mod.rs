//! Rendering documents into other formats.

pub mod html;
pub mod markdown;
pub mod summary;
pub mod text;

pub use html::{escape_html, to_html};
pub use markdown::to_markdown;
pub use summary::{to_json, to_yaml, DocumentSummary, MediaSummary};
pub use text::{to_text, to_text_default, wrap_text};

use crate::config::ExportFormat;
use crate::document::Document;
use crate::error::Result;

/// Render `doc` in the requested format.
///
/// JSON output is pretty-printed.
pub fn render(doc: &Document, format: ExportFormat) -> Result<String> {
    tracing::debug!(format = ?format, "Rendering document");
    match format {
        ExportFormat::Markdown => Ok(to_markdown(doc)),
        ExportFormat::Text => Ok(to_text_default(doc)),
        ExportFormat::Html => Ok(to_html(doc)),
        ExportFormat::Json => to_json(doc, true),
        ExportFormat::Yaml => to_yaml(doc),
    }
}
