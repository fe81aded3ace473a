//! Palette extraction by weighted voting.
//!
//! Four passes vote into one insertion-ordered map:
//!
//! 1. primary UI (buttons, CTA links, navigation),
//! 2. secondary UI (cards, panels, sections),
//! 3. a general scan of the first body descendants, backgrounds weighted by
//!    area plus colorful heading and link text,
//! 4. color-valued custom properties on the document root.
//!
//! Colors seen by a single weak source are then dropped, the rest ranked
//! (colorful first, then by weight) and deduplicated by perceptual distance.

use std::collections::{BTreeSet, HashMap};

use stackscope_config::ColorConfig;
use stackscope_protocols::{ElementRef, PageInspector};
use tracing::debug;

use crate::classifier::{is_ui_component, should_exclude, visual_weight};
use crate::color_math::{is_colorful, is_interesting_color, is_perceptually_distinct, rgb_to_hex};
use crate::css_vars::scan_css_variables;

pub(crate) const PRIMARY_UI_SELECTOR: &str = "button, [role=button], a[class*=btn], a[class*=cta], \
     a[class*=button], nav, [role=navigation]";

pub(crate) const SECONDARY_UI_SELECTOR: &str = "[class*=card], [class*=panel], [class*=section], \
     [class*=container], section, article";

const GENERAL_SELECTOR: &str = "body *";

/// Tags whose text color is a brand signal.
const TEXT_COLOR_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "a", "button"];

/// Where a color vote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorSource {
    PrimaryUi,
    SecondaryUi,
    GeneralBackground,
    Text,
    CssVariable,
}

/// A candidate color and its accumulated votes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSample {
    pub hex: String,
    pub weight: u32,
    pub sources: BTreeSet<ColorSource>,
}

impl ColorSample {
    /// Kept when seen by several sources, by a strong source, or heavily.
    fn is_reliable(&self, reliable_weight: u32) -> bool {
        self.sources.len() > 1
            || self.sources.contains(&ColorSource::PrimaryUi)
            || self.sources.contains(&ColorSource::CssVariable)
            || self.weight >= reliable_weight
    }
}

#[derive(Debug, Default)]
struct ColorVotes {
    samples: Vec<ColorSample>,
    index: HashMap<String, usize>,
}

impl ColorVotes {
    fn add(&mut self, hex: String, weight: u32, source: ColorSource) {
        match self.index.get(&hex) {
            Some(&i) => {
                let sample = &mut self.samples[i];
                sample.weight = sample.weight.saturating_add(weight);
                sample.sources.insert(source);
            }
            None => {
                self.index.insert(hex.clone(), self.samples.len());
                self.samples.push(ColorSample {
                    hex,
                    weight,
                    sources: BTreeSet::from([source]),
                });
            }
        }
    }
}

/// Background color of an element as `#RRGGBB`, if readable and opaque.
fn background_hex(page: &dyn PageInspector, element: ElementRef) -> Option<String> {
    let style = page.computed_style(element).ok()?;
    style.get("background-color").and_then(rgb_to_hex)
}

/// Ranked, deduplicated palette extractor.
pub struct ColorExtractor {
    config: ColorConfig,
}

impl ColorExtractor {
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    /// Extract the palette: at most `max_colors` `#RRGGBB` values.
    pub fn extract(&self, page: &dyn PageInspector) -> Vec<String> {
        let samples = self.collect_samples(page);
        let total = samples.len();

        let mut reliable: Vec<ColorSample> = samples
            .into_iter()
            .filter(|s| s.is_reliable(self.config.reliable_weight))
            .collect();
        let kept_reliable = reliable.len();

        // Stable: ties keep first-seen order.
        reliable.sort_by_key(|s| (!is_colorful(&s.hex), std::cmp::Reverse(s.weight)));

        let mut palette: Vec<String> = Vec::new();
        for sample in reliable {
            if palette.len() >= self.config.max_colors {
                break;
            }
            let distinct = palette.iter().all(|kept| {
                is_perceptually_distinct(
                    kept,
                    &sample.hex,
                    self.config.min_delta_e,
                    self.config.rgb_fallback_delta,
                )
            });
            if distinct {
                palette.push(sample.hex);
            }
        }

        debug!(
            "Color extraction: {} candidates, {} reliable, {} in palette",
            total,
            kept_reliable,
            palette.len()
        );
        palette
    }

    /// Run all voting passes, returning every candidate in first-seen order.
    pub fn collect_samples(&self, page: &dyn PageInspector) -> Vec<ColorSample> {
        let mut votes = ColorVotes::default();
        self.primary_ui_pass(page, &mut votes);
        self.secondary_ui_pass(page, &mut votes);
        self.general_pass(page, &mut votes);
        self.css_variable_pass(page, &mut votes);
        votes.samples
    }

    fn query(page: &dyn PageInspector, selector: &str) -> Vec<ElementRef> {
        page.query_all(selector).unwrap_or_else(|e| {
            debug!("Color pass query failed: {}", e);
            Vec::new()
        })
    }

    fn primary_ui_pass(&self, page: &dyn PageInspector, votes: &mut ColorVotes) {
        for element in Self::query(page, PRIMARY_UI_SELECTOR) {
            if should_exclude(page, element) {
                continue;
            }
            if let Some(hex) = background_hex(page, element) {
                if is_colorful(&hex) && is_interesting_color(&hex) {
                    votes.add(hex, self.config.primary_ui_weight, ColorSource::PrimaryUi);
                }
            }
        }
    }

    fn secondary_ui_pass(&self, page: &dyn PageInspector, votes: &mut ColorVotes) {
        for element in Self::query(page, SECONDARY_UI_SELECTOR) {
            if should_exclude(page, element) {
                continue;
            }
            let Some(hex) = background_hex(page, element) else {
                continue;
            };
            if !is_interesting_color(&hex) {
                continue;
            }
            let weight = if is_colorful(&hex) {
                self.config.secondary_colorful_weight
            } else {
                self.config.secondary_plain_weight
            };
            votes.add(hex, weight, ColorSource::SecondaryUi);
        }
    }

    fn general_pass(&self, page: &dyn PageInspector, votes: &mut ColorVotes) {
        let elements = Self::query(page, GENERAL_SELECTOR);
        for element in elements.into_iter().take(self.config.general_scan_limit) {
            if should_exclude(page, element) {
                continue;
            }
            let Ok(style) = page.computed_style(element) else {
                continue;
            };

            if let Some(hex) = style.get("background-color").and_then(rgb_to_hex) {
                if is_interesting_color(&hex) {
                    let base = if is_colorful(&hex) { 5 } else { 1 };
                    let ui = if is_ui_component(page, element) { 2 } else { 1 };
                    let weight = base * visual_weight(page, element) * ui;
                    votes.add(hex, weight, ColorSource::GeneralBackground);
                }
            }

            let is_text_carrier = page
                .tag_name(element)
                .is_some_and(|tag| TEXT_COLOR_TAGS.contains(&tag));
            if is_text_carrier {
                if let Some(hex) = style.get("color").and_then(rgb_to_hex) {
                    if is_colorful(&hex) && is_interesting_color(&hex) {
                        votes.add(hex, self.config.text_weight, ColorSource::Text);
                    }
                }
            }
        }
    }

    fn css_variable_pass(&self, page: &dyn PageInspector, votes: &mut ColorVotes) {
        for (name, hex) in scan_css_variables(page) {
            if !is_interesting_color(&hex) {
                continue;
            }
            votes.add(hex, self.variable_weight(&name), ColorSource::CssVariable);
        }
    }

    fn variable_weight(&self, name: &str) -> u32 {
        let name = name.to_lowercase();
        if ["primary", "accent", "brand"].iter().any(|k| name.contains(k)) {
            self.config.css_var_brand_weight
        } else if ["secondary", "highlight"].iter().any(|k| name.contains(k)) {
            self.config.css_var_secondary_weight
        } else {
            self.config.css_var_default_weight
        }
    }
}

impl Default for ColorExtractor {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
