//! CSS custom property scan.

use std::collections::BTreeMap;

use stackscope_protocols::PageInspector;
use tracing::debug;

use crate::color_math::{normalize_hex, rgb_to_hex};

/// Whether a rule targets the document root (`:root`, `html`).
fn is_root_rule(selector_text: &str) -> bool {
    selector_text.split(',').map(str::trim).any(|part| {
        part.contains(":root") || part.eq_ignore_ascii_case("html")
    })
}

/// Color value of a custom property: `#hex` or `rgb()`/`rgba()`.
fn parse_variable_color(value: &str) -> Option<String> {
    let value = value.trim();
    if value.starts_with('#') {
        normalize_hex(value)
    } else if value.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
        rgb_to_hex(value)
    } else {
        None
    }
}

/// Color-valued custom properties on root rules, in declaration order.
/// A property declared again keeps its first position and takes the later
/// value. Unreadable (cross-origin) sheets are skipped.
pub(crate) fn scan_css_variables(page: &dyn PageInspector) -> Vec<(String, String)> {
    let mut variables: Vec<(String, String)> = Vec::new();

    for sheet in page.style_sheets() {
        let rules = match sheet {
            Ok(rules) => rules,
            Err(e) => {
                debug!("Skipping stylesheet: {}", e);
                continue;
            }
        };

        for rule in rules.iter().filter(|r| is_root_rule(&r.selector_text)) {
            for (name, value) in &rule.declarations {
                if !name.starts_with("--") {
                    continue;
                }
                let Some(hex) = parse_variable_color(value) else {
                    continue;
                };
                match variables.iter_mut().find(|(n, _)| n == name) {
                    Some(existing) => existing.1 = hex,
                    None => variables.push((name.clone(), hex)),
                }
            }
        }
    }

    variables
}

/// Color-valued CSS custom properties declared on the document root,
/// as `name → #RRGGBB`.
pub fn extract_css_variables(page: &dyn PageInspector) -> BTreeMap<String, String> {
    scan_css_variables(page).into_iter().collect()
}
