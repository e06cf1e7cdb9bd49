//! XML tree and navigation helpers.

mod tree;
mod utils;

pub use tree::{Element, XmlNode};
pub use utils::{
    attribute_at, find_by_path, find_child, find_children, find_descendants, get_attribute,
    get_text, has_tag, numeric_attribute,
};
