//! # stackscope Extract
//!
//! Deterministic page signal extraction over a [`PageInspector`]:
//!
//! - a ranked, perceptually deduplicated color palette
//! - font usage by heading, code and body text
//! - up to three representative button styles
//! - color-valued CSS custom properties
//! - scripts, stylesheets, meta tags and framework fingerprints
//!
//! [`DomSnapshot`] is the in-memory page those extractors usually run over.
//!
//! [`PageInspector`]: stackscope_protocols::PageInspector

pub mod buttons;
pub mod bundle;
pub mod classifier;
pub mod color_math;
pub mod colors;
pub mod css_vars;
pub mod fonts;
pub mod signals;
pub mod snapshot;

pub use buttons::ButtonExtractor;
pub use bundle::{PageSignalExtractor, fully_scanned_selector};
pub use classifier::{is_ui_component, should_exclude, visual_weight};
pub use color_math::{
    contrast_ratio, is_colorful, is_interesting_color, is_perceptually_distinct, normalize_hex,
    perceptual_distance, relative_luminance, rgb_to_hex, ColorDistance,
};
pub use colors::{ColorExtractor, ColorSample, ColorSource};
pub use css_vars::extract_css_variables;
pub use fonts::{FontExtractor, FontObservation};
pub use signals::{detect_tech_signals, probed_globals};
pub use snapshot::{DomSnapshot, SnapshotElement, SnapshotStyleSheet};
