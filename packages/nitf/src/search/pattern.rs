//! Search pattern building.
//!
//! Every search, contains, count and excerpt operation compiles its query
//! through [`build_pattern`], so literal input is always escaped and caller
//! patterns keep their own flags.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{NitfError, Result};

/// Regex flags a caller attached to a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl PatternFlags {
    /// Same flags with case-insensitivity switched on.
    #[must_use]
    pub fn with_case_insensitive(self) -> Self {
        Self {
            case_insensitive: true,
            ..self
        }
    }

    fn builder(&self, source: &str) -> RegexBuilder {
        let mut builder = RegexBuilder::new(source);
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace);
        builder
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.case_insensitive, "i"),
            (self.multi_line, "m"),
            (self.dot_matches_new_line, "s"),
            (self.ignore_whitespace, "x"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        if names.is_empty() {
            write!(f, "no flags")
        } else {
            write!(f, "flags ({})", names.join(""))
        }
    }
}

/// A caller pattern compiled together with the flags it was built with.
///
/// Only [`Query::regex`] and [`Query::with_flags`] create one, so the
/// recorded flags always match the compiled regex.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    flags: PatternFlags,
}

impl CompiledPattern {
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[must_use]
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

/// What a caller searches for: literal text or a compiled pattern.
#[derive(Debug, Clone)]
pub enum Query {
    /// Matched character for character; regex syntax has no effect.
    Literal(String),
    /// A caller-written pattern.
    Pattern(CompiledPattern),
}

impl Query {
    /// A literal query.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a caller-written pattern with default flags.
    pub fn regex(source: &str) -> Result<Self> {
        Self::with_flags(source, PatternFlags::default())
    }

    /// Compile a caller-written pattern with explicit flags.
    pub fn with_flags(source: &str, flags: PatternFlags) -> Result<Self> {
        let regex = flags.builder(source).build()?;
        Ok(Self::Pattern(CompiledPattern { regex, flags }))
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// Turn a query into the regex that search operations run.
///
/// Literal text is escaped and compiled case-insensitively unless
/// `case_sensitive` is set. A compiled pattern is returned unchanged when
/// `case_sensitive` is set, and otherwise rebuilt from its source with its
/// flags plus case-insensitivity.
///
/// # Errors
/// `PatternConfig` when a caller pattern cannot be rebuilt with the added
/// flag; `InvalidPattern` when an escaped literal exceeds regex size limits.
///
/// # Examples
/// ```
/// use nitf_reader::search::{build_pattern, Query};
///
/// let pattern = build_pattern(&Query::literal("a.b"), false).unwrap();
/// assert!(pattern.is_match("A.B"));
/// assert!(!pattern.is_match("axb"));
/// ```
pub fn build_pattern(query: &Query, case_sensitive: bool) -> Result<Regex> {
    match query {
        Query::Literal(text) => {
            let pattern = RegexBuilder::new(&regex::escape(text))
                .case_insensitive(!case_sensitive)
                .build()?;
            Ok(pattern)
        }
        Query::Pattern(compiled) if case_sensitive => Ok(compiled.regex.clone()),
        Query::Pattern(compiled) => {
            let source = compiled.regex.as_str();
            let flags = compiled.flags.with_case_insensitive();
            flags
                .builder(source)
                .build()
                .map_err(|source_err| NitfError::PatternConfig {
                    pattern: source.to_string(),
                    flags: flags.to_string(),
                    source: source_err,
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_escaped() {
        let pattern = build_pattern(&Query::literal("1+1=2 (approx.)"), true).unwrap();
        assert!(pattern.is_match("say 1+1=2 (approx.) now"));
        assert!(!pattern.is_match("11=2 approx"));
    }

    #[test]
    fn test_literal_case_insensitive_by_default() {
        let pattern = build_pattern(&Query::from("Technology"), false).unwrap();
        assert!(pattern.is_match("TECHNOLOGY stocks"));
    }

    #[test]
    fn test_literal_case_sensitive() {
        let pattern = build_pattern(&Query::from("Technology"), true).unwrap();
        assert!(!pattern.is_match("technology"));
        assert!(pattern.is_match("Technology"));
    }

    #[test]
    fn test_pattern_passthrough_when_case_sensitive() {
        let query = Query::regex(r"Tech\w+").unwrap();
        let pattern = build_pattern(&query, true).unwrap();
        assert_eq!(pattern.as_str(), r"Tech\w+");
        assert!(!pattern.is_match("techcorp"));
    }

    #[test]
    fn test_pattern_gains_case_insensitivity() {
        let query = Query::regex(r"Tech\w+").unwrap();
        let pattern = build_pattern(&query, false).unwrap();
        assert!(pattern.is_match("TECHCORP"));
    }

    #[test]
    fn test_pattern_keeps_caller_flags() {
        let flags = PatternFlags {
            multi_line: true,
            ..PatternFlags::default()
        };
        let query = Query::with_flags(r"^second$", flags).unwrap();
        let pattern = build_pattern(&query, false).unwrap();
        assert!(pattern.is_match("first\nSECOND\nthird"));
    }

    #[test]
    fn test_invalid_caller_pattern() {
        assert!(matches!(
            Query::regex("(unclosed"),
            Err(NitfError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_inline_flags_survive_rebuild() {
        let query = Query::regex(r"(?m)^b$").unwrap();
        let pattern = build_pattern(&query, false).unwrap();
        assert!(pattern.is_match("a\nB"));
    }

    #[test]
    fn test_every_builder_flag_survives_rebuild() {
        let flags = PatternFlags {
            multi_line: true,
            dot_matches_new_line: true,
            ignore_whitespace: true,
            ..PatternFlags::default()
        };
        let query = Query::with_flags(r"^ first . second $", flags).unwrap();
        let Query::Pattern(compiled) = &query else {
            panic!("expected a compiled pattern");
        };
        assert_eq!(compiled.flags(), flags);

        let pattern = build_pattern(&query, false).unwrap();
        assert!(pattern.is_match("intro\nFIRST\nSECOND\noutro"));
        assert!(!pattern.is_match("first\n\nsecond"));
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(PatternFlags::default().to_string(), "no flags");
        let flags = PatternFlags {
            multi_line: true,
            ..PatternFlags::default()
        }
        .with_case_insensitive();
        assert_eq!(flags.to_string(), "flags (im)");
    }
}
