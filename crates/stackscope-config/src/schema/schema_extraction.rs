//! Extraction heuristic parameters.
//!
//! Defaults reproduce the tuned constants of the heuristics. They are
//! exposed for experimentation, not because other values are known to be
//! better.

use serde::{Deserialize, Serialize};

/// All extraction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub colors: ColorConfig,

    #[serde(default)]
    pub fonts: FontConfig,

    #[serde(default)]
    pub buttons: ButtonConfig,

    /// Markup kept in the signal bundle, in characters.
    #[serde(default = "default_html_max_chars")]
    pub html_max_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            colors: ColorConfig::default(),
            fonts: FontConfig::default(),
            buttons: ButtonConfig::default(),
            html_max_chars: default_html_max_chars(),
        }
    }
}

fn default_html_max_chars() -> usize {
    50_000
}

/// Color extraction weights and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    /// Body descendants visited by the general pass.
    #[serde(default = "default_general_scan_limit")]
    pub general_scan_limit: usize,

    #[serde(default = "default_primary_ui_weight")]
    pub primary_ui_weight: u32,

    #[serde(default = "default_secondary_colorful_weight")]
    pub secondary_colorful_weight: u32,

    #[serde(default = "default_secondary_plain_weight")]
    pub secondary_plain_weight: u32,

    #[serde(default = "default_text_weight")]
    pub text_weight: u32,

    /// Custom property named like primary/accent/brand.
    #[serde(default = "default_css_var_brand_weight")]
    pub css_var_brand_weight: u32,

    /// Custom property named like secondary/highlight.
    #[serde(default = "default_css_var_secondary_weight")]
    pub css_var_secondary_weight: u32,

    #[serde(default = "default_css_var_weight")]
    pub css_var_default_weight: u32,

    /// Single-source colors below this weight are dropped.
    #[serde(default = "default_reliable_weight")]
    pub reliable_weight: u32,

    /// Minimum CIE76 distance between kept colors.
    #[serde(default = "default_min_delta_e")]
    pub min_delta_e: f64,

    /// Channel delta under which colors count as similar when LAB is not
    /// available.
    #[serde(default = "default_rgb_fallback_delta")]
    pub rgb_fallback_delta: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            max_colors: default_max_colors(),
            general_scan_limit: default_general_scan_limit(),
            primary_ui_weight: default_primary_ui_weight(),
            secondary_colorful_weight: default_secondary_colorful_weight(),
            secondary_plain_weight: default_secondary_plain_weight(),
            text_weight: default_text_weight(),
            css_var_brand_weight: default_css_var_brand_weight(),
            css_var_secondary_weight: default_css_var_secondary_weight(),
            css_var_default_weight: default_css_var_weight(),
            reliable_weight: default_reliable_weight(),
            min_delta_e: default_min_delta_e(),
            rgb_fallback_delta: default_rgb_fallback_delta(),
        }
    }
}

fn default_max_colors() -> usize {
    8
}

fn default_general_scan_limit() -> usize {
    300
}

fn default_primary_ui_weight() -> u32 {
    50
}

fn default_secondary_colorful_weight() -> u32 {
    15
}

fn default_secondary_plain_weight() -> u32 {
    5
}

fn default_text_weight() -> u32 {
    3
}

fn default_css_var_brand_weight() -> u32 {
    20
}

fn default_css_var_secondary_weight() -> u32 {
    10
}

fn default_css_var_weight() -> u32 {
    5
}

fn default_reliable_weight() -> u32 {
    30
}

fn default_min_delta_e() -> f64 {
    5.0
}

fn default_rgb_fallback_delta() -> u8 {
    25
}

/// Font extraction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    #[serde(default = "default_max_fonts")]
    pub max_fonts: usize,

    /// Body-like elements sampled.
    #[serde(default = "default_body_sample_limit")]
    pub body_sample_limit: usize,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            max_fonts: default_max_fonts(),
            body_sample_limit: default_body_sample_limit(),
        }
    }
}

fn default_max_fonts() -> usize {
    5
}

fn default_body_sample_limit() -> usize {
    100
}

/// Button extraction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    #[serde(default = "default_max_buttons")]
    pub max_buttons: usize,

    #[serde(default = "default_min_width")]
    pub min_width: f64,

    #[serde(default = "default_min_height")]
    pub min_height: f64,

    /// WCAG contrast required between an opaque background and its text.
    #[serde(default = "default_min_contrast")]
    pub min_contrast: f64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            max_buttons: default_max_buttons(),
            min_width: default_min_width(),
            min_height: default_min_height(),
            min_contrast: default_min_contrast(),
        }
    }
}

fn default_max_buttons() -> usize {
    3
}

fn default_min_width() -> f64 {
    30.0
}

fn default_min_height() -> f64 {
    20.0
}

fn default_min_contrast() -> f64 {
    2.0
}
