//! # stackscope Protocols
//!
//! Core protocol definitions (traits) and the shared data model.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`PageInspector`] - Read-only access to a page's DOM and CSSOM
//! - [`CaptureDevice`] - Viewport measurement, scrolling and screenshots
//! - [`ChatProvider`] - Chat completion endpoint of a hosted LLM

pub mod capture;
pub mod error;
pub mod page;
pub mod provider;
pub mod types;

// Re-export core traits
pub use capture::{CaptureDevice, PageMetrics, ScrollPosition};
pub use error::{CaptureError, CategorizeError, InspectError, ProviderError};
pub use page::{ComputedStyle, ElementRef, MetaTag, PageInspector, Rect, StyleRule};
pub use provider::{ChatContent, ChatMessage, ChatProvider, ChatRequest, ChatRole, ContentPart};
pub use types::*;
