//! Representative button style extraction.

use std::collections::HashSet;

use stackscope_config::ButtonConfig;
use stackscope_protocols::{
    ButtonVariant, ComputedStyle, ElementRef, ExtractedButton, PageInspector,
};
use tracing::{debug, trace};

use crate::classifier::should_exclude;
use crate::color_math::{contrast_ratio, is_colorful, parse_css_color, rgb_to_hex};
use crate::fonts::primary_family;

pub(crate) const BUTTON_SELECTOR: &str = "button, [role=button], input[type=submit], input[type=button], \
     a[class*=btn], a[class*=button], [class*=btn-], [class*=button-]";

/// Leading number of a CSS length, e.g. `1.5` for `1.5px`.
fn css_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Optional style property, dropping empty and keyword-default values.
fn optional(style: &ComputedStyle, property: &str, default: &str) -> Option<String> {
    style
        .get_non_empty(property)
        .filter(|v| !v.eq_ignore_ascii_case(default))
        .map(str::to_string)
}

/// Button extractor.
pub struct ButtonExtractor {
    config: ButtonConfig,
}

impl ButtonExtractor {
    pub fn new(config: ButtonConfig) -> Self {
        Self { config }
    }

    /// Up to `max_buttons` distinct, accessible button styles in document
    /// order.
    pub fn extract(&self, page: &dyn PageInspector) -> Vec<ExtractedButton> {
        let candidates = page.query_all(BUTTON_SELECTOR).unwrap_or_else(|e| {
            debug!("Button query failed: {}", e);
            Vec::new()
        });

        let mut accepted: Vec<ExtractedButton> = Vec::new();
        let mut signatures: HashSet<String> = HashSet::new();

        for element in candidates {
            if accepted.len() >= self.config.max_buttons {
                break;
            }
            let Some(button) = self.inspect(page, element) else {
                continue;
            };
            if !signatures.insert(button.signature()) {
                trace!("Skipping duplicate button style {}", button.signature());
                continue;
            }
            if button.variant == ButtonVariant::Ghost
                && accepted.iter().any(|b| b.variant == ButtonVariant::Primary)
            {
                continue;
            }
            if !button.is_transparent() {
                let contrast = contrast_ratio(&button.background_color, &button.text_color);
                if contrast.is_none_or(|c| c < self.config.min_contrast) {
                    trace!("Skipping low-contrast button {}", button.signature());
                    continue;
                }
            }
            accepted.push(button);
        }

        debug!("Button extraction: {} buttons", accepted.len());
        accepted
    }

    /// Read one candidate's style, or `None` when it is excluded, too small
    /// or unreadable.
    fn inspect(&self, page: &dyn PageInspector, element: ElementRef) -> Option<ExtractedButton> {
        if should_exclude(page, element) {
            return None;
        }
        let rect = page.bounding_rect(element).ok()?;
        if rect.width < self.config.min_width || rect.height < self.config.min_height {
            return None;
        }
        let style = page.computed_style(element).ok()?;

        let background = style.get("background-color").and_then(parse_css_color);
        let transparent = background.is_none_or(|c| c.is_transparent());
        let background_color = match background {
            Some(c) if !transparent => c.rgb.to_hex(),
            _ => ExtractedButton::TRANSPARENT.to_string(),
        };
        let text_color = style.get("color").and_then(rgb_to_hex)?;

        let border_width = style.get("border-width").and_then(css_length).unwrap_or(0.0);
        let border_color = if border_width > 0.0 {
            style.get("border-color").and_then(rgb_to_hex)
        } else {
            None
        };
        let visible_border = border_color
            .as_ref()
            .is_some_and(|c| *c != background_color);

        let variant = if transparent {
            if visible_border {
                ButtonVariant::Outline
            } else {
                ButtonVariant::Ghost
            }
        } else if !is_colorful(&background_color) {
            ButtonVariant::Secondary
        } else {
            ButtonVariant::Primary
        };

        Some(ExtractedButton {
            background_color,
            text_color,
            border_radius: style.get_non_empty("border-radius").unwrap_or("0px").to_string(),
            font_weight: style.get_non_empty("font-weight").unwrap_or("400").to_string(),
            variant,
            border_width: border_color.as_ref().and(optional(&style, "border-width", "0px")),
            border_color,
            padding: optional(&style, "padding", "0px"),
            font_size: optional(&style, "font-size", ""),
            font_family: style.get("font-family").and_then(primary_family),
            box_shadow: optional(&style, "box-shadow", "none"),
            text_transform: optional(&style, "text-transform", "none"),
            letter_spacing: optional(&style, "letter-spacing", "normal"),
        })
    }
}

impl Default for ButtonExtractor {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}

#[cfg(test)]
#[path = "buttons_tests.rs"]
mod tests;
