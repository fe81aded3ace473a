//! # stackscope Config
//!
//! Configuration management: provider credentials, browser endpoint,
//! capture limits and every extraction heuristic constant.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
