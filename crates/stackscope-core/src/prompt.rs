//! Explanation prompt.

use stackscope_protocols::{CategorizedPalette, ColorRole, PageSignalBundle};

pub const SYSTEM_PROMPT: &str = "You are a senior front-end engineer. Given signals extracted \
from a live web page, explain which technologies it is built with and how its design \
system is put together: color roles, typography and button styles. Ground every claim in \
the signals; say so when the evidence is weak. Answer in Markdown.";

/// Asset URLs listed per kind.
const MAX_ASSETS: usize = 20;

/// CSS variables listed.
const MAX_VARIABLES: usize = 30;

/// Meta tags worth showing to the model.
const META_KEYS: &[&str] = &[
    "description",
    "generator",
    "theme-color",
    "og:site_name",
    "og:title",
    "og:description",
];

/// Build the user prompt for the explanation request.
pub fn analysis_prompt(bundle: &PageSignalBundle, palette: Option<&CategorizedPalette>) -> String {
    let mut parts = vec![format!(
        "# Page\n\nURL: {}\nTitle: {}",
        bundle.url,
        if bundle.title.is_empty() { "(none)" } else { bundle.title.as_str() }
    )];

    let detected = bundle.tech_signals.detected();
    parts.push(format!(
        "## Detected technologies\n\n{}",
        if detected.is_empty() {
            "None detected from markers.".to_string()
        } else {
            detected.join(", ")
        }
    ));

    if let Some(section) = list_section("Scripts", &bundle.scripts, MAX_ASSETS) {
        parts.push(section);
    }
    if let Some(section) = list_section("Stylesheets", &bundle.stylesheets, MAX_ASSETS) {
        parts.push(section);
    }

    let meta: Vec<String> = META_KEYS
        .iter()
        .filter_map(|key| bundle.meta_tags.get(*key).map(|v| format!("- {}: {}", key, v)))
        .collect();
    if !meta.is_empty() {
        parts.push(format!("## Meta tags\n\n{}", meta.join("\n")));
    }

    if !bundle.extracted_colors.is_empty() {
        parts.push(format!(
            "## Color palette (most prominent first)\n\n{}",
            bundle.extracted_colors.join(", ")
        ));
    }

    if let Some(palette) = palette {
        let mut lines: Vec<String> = ColorRole::ALL
            .iter()
            .filter_map(|role| palette.get(*role).map(|hex| format!("- {}: {}", role.key(), hex)))
            .collect();
        if let Some(system) = palette.possible_system {
            lines.push(format!("- likely system: {}", system.as_str()));
        }
        parts.push(format!("## Color roles\n\n{}", lines.join("\n")));
    }

    if !bundle.extracted_fonts.is_empty() {
        let fonts: Vec<String> = bundle
            .extracted_fonts
            .iter()
            .map(|f| format!("- {} ({})", f.family, f.usage.as_str()))
            .collect();
        parts.push(format!("## Fonts\n\n{}", fonts.join("\n")));
    }

    if !bundle.extracted_buttons.is_empty() {
        let buttons: Vec<String> = bundle
            .extracted_buttons
            .iter()
            .map(|b| {
                format!(
                    "- {:?}: background {}, text {}, radius {}, weight {}{}",
                    b.variant,
                    b.background_color,
                    b.text_color,
                    b.border_radius,
                    b.font_weight,
                    b.border_color
                        .as_deref()
                        .map(|c| format!(", border {}", c))
                        .unwrap_or_default()
                )
            })
            .collect();
        parts.push(format!("## Buttons\n\n{}", buttons.join("\n")));
    }

    if !bundle.css_variables.is_empty() {
        let vars: Vec<String> = bundle
            .css_variables
            .iter()
            .take(MAX_VARIABLES)
            .map(|(name, value)| format!("- {}: {}", name, value))
            .collect();
        parts.push(format!("## CSS color variables\n\n{}", vars.join("\n")));
    }

    if !bundle.html.is_empty() {
        parts.push(format!("## HTML (truncated)\n\n```html\n{}\n```", bundle.html));
    }

    parts.join("\n\n")
}

fn list_section(title: &str, items: &[String], limit: usize) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut lines: Vec<String> = items.iter().take(limit).map(|i| format!("- {}", i)).collect();
    if items.len() > limit {
        lines.push(format!("- ... and {} more", items.len() - limit));
    }
    Some(format!("## {}\n\n{}", title, lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackscope_protocols::{
        ButtonVariant, ExtractedButton, ExtractedFont, FontUsage, PossibleSystem, TechSignals,
    };

    fn bundle() -> PageSignalBundle {
        PageSignalBundle {
            url: "https://acme.test/".to_string(),
            title: "Acme".to_string(),
            html: "<main>Hi</main>".to_string(),
            scripts: (0..25).map(|i| format!("https://acme.test/{i}.js")).collect(),
            tech_signals: TechSignals {
                has_react: true,
                has_next_js: true,
                ..Default::default()
            },
            extracted_colors: vec!["#2563EB".to_string()],
            extracted_fonts: vec![ExtractedFont {
                family: "Inter".to_string(),
                usage: FontUsage::Body,
            }],
            extracted_buttons: vec![ExtractedButton {
                background_color: "#2563EB".to_string(),
                text_color: "#FFFFFF".to_string(),
                border_radius: "6px".to_string(),
                font_weight: "600".to_string(),
                variant: ButtonVariant::Primary,
                border_color: None,
                border_width: None,
                padding: None,
                font_size: None,
                font_family: None,
                box_shadow: None,
                text_transform: None,
                letter_spacing: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_sections() {
        let prompt = analysis_prompt(&bundle(), None);
        assert!(prompt.contains("URL: https://acme.test/"));
        assert!(prompt.contains("React, Next.js"));
        assert!(prompt.contains("- Inter (body)"));
        assert!(prompt.contains("Primary: background #2563EB"));
        assert!(prompt.contains("```html\n<main>Hi</main>\n```"));
        assert!(!prompt.contains("## Color roles"));
        assert!(!prompt.contains("## Stylesheets"));
    }

    #[test]
    fn test_asset_list_capped() {
        let prompt = analysis_prompt(&bundle(), None);
        assert!(prompt.contains("https://acme.test/19.js"));
        assert!(!prompt.contains("https://acme.test/20.js"));
        assert!(prompt.contains("... and 5 more"));
    }

    #[test]
    fn test_color_roles_section() {
        let palette = CategorizedPalette {
            background: Some("#FFFFFF".to_string()),
            primary: Some("#2563EB".to_string()),
            possible_system: Some(PossibleSystem::Tailwind),
            ..Default::default()
        };
        let prompt = analysis_prompt(&bundle(), Some(&palette));
        assert!(prompt.contains("- background: #FFFFFF\n- primary: #2563EB\n- likely system: tailwind"));
    }
}
