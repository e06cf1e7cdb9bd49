//! Error types for the NITF reader.
//!
//! A single `NitfError` enum covers every fallible operation: reading and
//! parsing XML, locating required sections, compiling search patterns and
//! serializing exports.

use thiserror::Error;

/// Main error type for the NITF reader library.
#[derive(Debug, Error)]
pub enum NitfError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Element nesting exceeds the configured limit.
    #[error("Element <{tag_name}> is nested {depth} levels deep (limit {limit})")]
    TooDeep {
        tag_name: String,
        depth: usize,
        limit: usize,
    },

    /// A caller-supplied search pattern does not compile.
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A compiled pattern could not be rebuilt with the requested flags.
    #[error("Cannot rebuild pattern '{pattern}' with {flags}: {source}")]
    PatternConfig {
        pattern: String,
        flags: String,
        #[source]
        source: regex::Error,
    },

    /// Unknown export format requested.
    #[error("Unsupported export format: '{0}'. Expected one of markdown, text, html, json, yaml")]
    UnsupportedFormat(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for NITF operations.
pub type Result<T> = std::result::Result<T, NitfError>;
