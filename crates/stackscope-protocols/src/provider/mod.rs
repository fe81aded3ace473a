//! LLM provider protocol definitions.

mod request;
mod traits;

pub use request::*;
pub use traits::*;
