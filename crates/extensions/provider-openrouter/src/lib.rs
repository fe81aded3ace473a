//! OpenRouter chat provider for stackscope.
//!
//! Speaks the OpenAI-compatible chat completions API; images travel as
//! `image_url` content parts carrying `data:` URLs.

mod api;
mod converter;
mod provider;

pub use provider::OpenRouterProvider;
