//! Text and entity extraction from inline markup.

mod entities;
mod text;

pub use entities::{extract_entities, mention_pattern, EntityCell, EntityKind, EntitySet, Link};
pub use text::extract_all_text;
