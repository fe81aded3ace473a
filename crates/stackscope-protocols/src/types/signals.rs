//! Page signal bundle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ExtractedButton, ExtractedFont};

/// Framework and library markers detected on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechSignals {
    pub has_react: bool,
    pub has_vue: bool,
    pub has_angular: bool,
    pub has_next_js: bool,
    pub has_nuxt: bool,
    pub has_svelte: bool,
    pub has_jquery: bool,
    pub has_tailwind: bool,
    pub has_bootstrap: bool,
    pub has_wordpress: bool,
}

impl TechSignals {
    /// Human-readable names of the detected technologies.
    pub fn detected(&self) -> Vec<&'static str> {
        [
            (self.has_react, "React"),
            (self.has_vue, "Vue"),
            (self.has_angular, "Angular"),
            (self.has_next_js, "Next.js"),
            (self.has_nuxt, "Nuxt"),
            (self.has_svelte, "Svelte"),
            (self.has_jquery, "jQuery"),
            (self.has_tailwind, "Tailwind CSS"),
            (self.has_bootstrap, "Bootstrap"),
            (self.has_wordpress, "WordPress"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect()
    }
}

/// Everything extracted from one page for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignalBundle {
    pub url: String,
    pub title: String,
    /// Document markup, truncated.
    pub html: String,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub meta_tags: BTreeMap<String, String>,
    pub tech_signals: TechSignals,
    /// Ranked palette, at most eight `#RRGGBB` values.
    pub extracted_colors: Vec<String>,
    pub extracted_fonts: Vec<ExtractedFont>,
    pub extracted_buttons: Vec<ExtractedButton>,
    pub css_variables: BTreeMap<String, String>,
    /// Full-page screenshot as a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

impl PageSignalBundle {
    /// Consume the bundle, attaching a screenshot.
    pub fn with_screenshot(mut self, screenshot: Option<String>) -> Self {
        self.screenshot = screenshot;
        self
    }
}
