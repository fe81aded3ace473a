//! Error types for the stackscope protocol layer.

mod capture;
mod categorize;
mod inspect;
mod provider;

pub use capture::*;
pub use categorize::*;
pub use inspect::*;
pub use provider::*;
