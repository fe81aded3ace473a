//! Font usage extraction.

use std::collections::{BTreeSet, HashMap};

use stackscope_config::FontConfig;
use stackscope_protocols::{ElementRef, ExtractedFont, FontUsage, PageInspector};
use tracing::debug;

pub(crate) const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
const BODY_SELECTOR: &str = "p, span, div, li, td, label";
pub(crate) const CODE_SELECTOR: &str = "code, pre, .code, [class*=mono]";

/// Substrings of system and platform-default families.
const SYSTEM_FONT_MARKERS: &[&str] = &[
    "system-ui",
    "-apple-system",
    "blinkmacsystemfont",
    "segoe ui",
    "helvetica",
    "arial",
    "sans-serif",
    "ui-monospace",
    "ui-sans-serif",
    "ui-serif",
    "sfmono",
    "menlo",
    "consolas",
    "courier",
    "times new roman",
    "monospace",
    "inherit",
    "initial",
];

/// CSS generic families, matched exactly.
const GENERIC_FAMILIES: &[&str] = &["serif", "cursive", "fantasy", "math", "emoji", "fangsong"];

/// First family of a `font-family` stack with quotes and whitespace removed.
pub fn primary_family(font_family: &str) -> Option<String> {
    let first = font_family.split(',').next()?;
    let cleaned = first.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Whether a family is a system or generic font rather than a design choice.
pub fn is_system_font(family: &str) -> bool {
    let lower = family.to_lowercase();
    GENERIC_FAMILIES.contains(&lower.as_str())
        || SYSTEM_FONT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// A family and everywhere it was seen.
#[derive(Debug, Clone, PartialEq)]
pub struct FontObservation {
    pub family: String,
    pub usage_count: usize,
    pub usage_categories: BTreeSet<FontUsage>,
}

impl FontObservation {
    /// Highest-priority category.
    pub fn resolved_usage(&self) -> FontUsage {
        self.usage_categories
            .iter()
            .copied()
            .min_by_key(|u| u.priority())
            .unwrap_or(FontUsage::Other)
    }
}

/// Heading/body/code font extractor.
pub struct FontExtractor {
    config: FontConfig,
}

impl FontExtractor {
    pub fn new(config: FontConfig) -> Self {
        Self { config }
    }

    /// Extract up to `max_fonts` families, headings first, then code, then
    /// body. Within a category more frequently used families come first.
    pub fn extract(&self, page: &dyn PageInspector) -> Vec<ExtractedFont> {
        let mut observations = self.observe(page);
        observations.sort_by_key(|o| (o.resolved_usage().priority(), std::cmp::Reverse(o.usage_count)));

        let fonts: Vec<ExtractedFont> = observations
            .into_iter()
            .take(self.config.max_fonts)
            .map(|o| ExtractedFont {
                usage: o.resolved_usage(),
                family: o.family,
            })
            .collect();

        debug!("Font extraction: {} families", fonts.len());
        fonts
    }

    /// Observations in first-seen order.
    pub fn observe(&self, page: &dyn PageInspector) -> Vec<FontObservation> {
        let mut observations: Vec<FontObservation> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let groups = [
            (HEADING_SELECTOR, FontUsage::Heading, usize::MAX),
            (BODY_SELECTOR, FontUsage::Body, self.config.body_sample_limit),
            (CODE_SELECTOR, FontUsage::Code, usize::MAX),
        ];

        for (selector, usage, limit) in groups {
            let elements = page.query_all(selector).unwrap_or_else(|e| {
                debug!("Font query failed: {}", e);
                Vec::new()
            });
            for element in elements.into_iter().take(limit) {
                let Some(family) = Self::family_of(page, element) else {
                    continue;
                };
                match index.get(&family) {
                    Some(&i) => {
                        observations[i].usage_count += 1;
                        observations[i].usage_categories.insert(usage);
                    }
                    None => {
                        index.insert(family.clone(), observations.len());
                        observations.push(FontObservation {
                            family,
                            usage_count: 1,
                            usage_categories: BTreeSet::from([usage]),
                        });
                    }
                }
            }
        }

        observations
    }

    fn family_of(page: &dyn PageInspector, element: ElementRef) -> Option<String> {
        let style = page.computed_style(element).ok()?;
        let family = primary_family(style.get("font-family")?)?;
        (!is_system_font(&family)).then_some(family)
    }
}

impl Default for FontExtractor {
    fn default() -> Self {
        Self::new(FontConfig::default())
    }
}
