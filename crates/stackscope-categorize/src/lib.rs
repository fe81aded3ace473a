//! # stackscope Categorize
//!
//! Maps an extracted palette onto semantic roles (background, foreground,
//! primary, ...) with a single chat-model round-trip, and normalizes the
//! reply so that only well-formed hex colors survive.

mod categorizer;
pub mod prompt;
pub mod reply;

pub use categorizer::{CategorizeMode, ColorCategorizer};
pub use reply::{extract_json_object, parse_palette};
