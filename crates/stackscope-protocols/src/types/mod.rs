//! Data model shared by the extractors, the categorizer and the analyzer.

mod button;
mod font;
mod palette;
mod signals;

pub use button::*;
pub use font::*;
pub use palette::*;
pub use signals::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
