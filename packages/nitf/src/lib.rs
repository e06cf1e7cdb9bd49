//! nitf-reader - Read NITF (News Industry Text Format) news articles.
//!
//! This crate parses NITF XML into a read-only document model and offers
//! text extraction, inline entity aggregation, full-text search and export
//! to Markdown, plain text, HTML, JSON and YAML.
//!
//! # Example
//!
//! ```
//! use nitf_reader::Document;
//!
//! let xml = r#"<nitf><body><body.content>
//!   <p>TechCorp <em>Inc</em>, led by <person>John Doe</person>.</p>
//! </body.content></body></nitf>"#;
//!
//! let doc = Document::parse(xml).unwrap();
//! assert_eq!(doc.text(), "TechCorp Inc, led by John Doe.");
//! assert_eq!(doc.all_people(), ["John Doe"]);
//! assert!(doc.mentions_person("john").unwrap());
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Tag names, defaults, parse options and export formats
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Owned element tree and navigation helpers
//! - [`extract`]: Text and entity extraction from inline markup
//! - [`search`]: Pattern building and paragraph queries
//! - [`types`]: Document model types (Paragraph, Byline, Media, etc.)
//! - [`document`]: NITF parsing and document-level queries
//! - [`export`]: Markdown, text, HTML, JSON and YAML output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod search;
pub mod types;
pub mod xml;

// Re-export commonly used items
pub use config::{ExportFormat, ParseOptions};
pub use document::Document;
pub use error::{NitfError, Result};
pub use extract::{extract_all_text, extract_entities, EntitySet, Link};
pub use search::{build_pattern, MentionFilter, PatternFlags, Query, SearchMatch, TextSource};
pub use types::{AllEntities, Byline, Media, MediaReference, Paragraph};
