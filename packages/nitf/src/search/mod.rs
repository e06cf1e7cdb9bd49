//! Search over extracted paragraph text.
//!
//! - [`pattern`]: turns literal or compiled queries into a regex
//! - [`query`]: search, count, excerpt and mention filters over paragraphs

mod pattern;
mod query;

pub use pattern::{build_pattern, CompiledPattern, PatternFlags, Query};
pub use query::{
    contains, count_occurrences, excerpt, paragraphs_containing, paragraphs_mentioning, search,
    MentionFilter, SearchMatch, TextSource,
};
