//! # stackscope Core
//!
//! Runs one page analysis end to end:
//!
//! 1. extract page signals through a [`PageInspector`]
//! 2. capture a full-page screenshot through a [`CaptureDevice`]
//! 3. categorize the palette (vision, then text, then none)
//! 4. request the explanation, the only stage whose failure is fatal
//!
//! [`PageInspector`]: stackscope_protocols::PageInspector
//! [`CaptureDevice`]: stackscope_protocols::CaptureDevice

mod analyzer;
mod error;
pub mod prompt;
mod report;

pub use analyzer::Analyzer;
pub use error::AnalyzeError;
pub use report::AnalysisReport;
