//! Configuration constants and parse options for the NITF reader.

use crate::error::{NitfError, Result};

/// Element that extracts as a single newline.
pub const LINE_BREAK_TAG: &str = "br";

/// Inline element marking a person.
pub const PERSON_TAG: &str = "person";

/// Inline element marking an organization.
pub const ORG_TAG: &str = "org";

/// Inline element marking a location.
pub const LOCATION_TAG: &str = "location";

/// Inline emphasis markup.
pub const EMPHASIS_TAG: &str = "em";

/// Inline bold markup.
pub const STRONG_TAG: &str = "strong";

/// Inline hyperlink.
pub const LINK_TAG: &str = "a";

/// Attribute carrying a link target.
pub const LINK_HREF_ATTR: &str = "href";

/// Default number of characters on either side of an excerpt match.
pub const DEFAULT_EXCERPT_CONTEXT: usize = 50;

/// Text wrap width for plain-text export.
pub const TEXT_WRAP_WIDTH: usize = 80;

/// Default maximum element nesting accepted when building the tree.
///
/// Real articles rarely go beyond a dozen levels; anything past this is
/// treated as hostile input.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default node limit handed to roxmltree.
pub const DEFAULT_NODES_LIMIT: u32 = 1_000_000;

/// Options controlling how raw XML is turned into an element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept a `<!DOCTYPE>` declaration. NITF files usually carry one.
    pub allow_dtd: bool,

    /// Maximum number of nodes roxmltree will allocate.
    pub nodes_limit: u32,

    /// Maximum element nesting depth.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_dtd: true,
            nodes_limit: DEFAULT_NODES_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set whether DTDs are accepted.
    #[must_use]
    pub fn with_allow_dtd(mut self, allow_dtd: bool) -> Self {
        self.allow_dtd = allow_dtd;
        self
    }

    /// Build the matching roxmltree options.
    #[must_use]
    pub fn to_roxmltree(&self) -> roxmltree::ParsingOptions {
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = self.allow_dtd;
        options.nodes_limit = self.nodes_limit;
        options
    }
}

/// Export formats understood by [`crate::export::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
    Html,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Parse a format name.
    ///
    /// # Examples
    /// ```
    /// use nitf_reader::config::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::parse("md").unwrap(), ExportFormat::Markdown);
    /// assert!(ExportFormat::parse("pdf").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(NitfError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Conventional file extension for the format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
            Self::Html => "html",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}
