//! Categorization prompts.

use std::collections::BTreeMap;

/// Substrings of CSS variable names that hint at a palette role.
const ROLE_HINTS: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "background",
    "foreground",
    "text",
    "muted",
    "border",
    "destructive",
    "danger",
    "error",
];

/// Variable cap for prompts that also carry a screenshot.
pub const VISION_VARIABLE_LIMIT: usize = 15;

/// Variable cap for text-only prompts.
pub const TEXT_VARIABLE_LIMIT: usize = 20;

const ROLE_SCHEMA: &str = r##"Respond with a single JSON object and nothing else:
{
  "background": "#RRGGBB",
  "foreground": "#RRGGBB",
  "primary": "#RRGGBB",
  "secondary": "#RRGGBB",
  "accent": "#RRGGBB",
  "muted": "#RRGGBB",
  "border": "#RRGGBB",
  "destructive": "#RRGGBB",
  "possibleSystem": "tailwind" | "shadcn" | "radix" | "material" | "custom"
}
Omit any role you are not confident about. Use only hex colors."##;

/// CSS variables whose names suggest a role, in name order, capped at
/// `limit`.
pub fn role_hint_variables(
    variables: &BTreeMap<String, String>,
    limit: usize,
) -> Vec<(&str, &str)> {
    variables
        .iter()
        .filter(|(name, _)| {
            let name = name.to_lowercase();
            ROLE_HINTS.iter().any(|hint| name.contains(hint))
        })
        .take(limit)
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
}

/// Prompt sent alongside a screenshot.
pub fn vision_prompt(palette: &[String], variables: &BTreeMap<String, String>) -> String {
    let mut parts = vec![
        "You are a UI designer. Look at the screenshot of this web page and assign the \
         extracted colors to their semantic roles in the page's design system."
            .to_string(),
        palette_section(palette),
    ];
    if let Some(section) = variables_section(variables, VISION_VARIABLE_LIMIT) {
        parts.push(section);
    }
    parts.push(
        "Prefer colors you can see on large surfaces for background, body text for \
         foreground, and call-to-action buttons for primary."
            .to_string(),
    );
    parts.push(ROLE_SCHEMA.to_string());
    parts.join("\n\n")
}

/// Prompt used when no screenshot is available.
pub fn text_prompt(palette: &[String], variables: &BTreeMap<String, String>) -> String {
    let mut parts = vec![
        "You are a UI designer. Without seeing the page, assign the colors extracted from \
         its DOM to their most likely semantic roles in its design system. The list is \
         ordered by visual prominence, most prominent first."
            .to_string(),
        palette_section(palette),
    ];
    if let Some(section) = variables_section(variables, TEXT_VARIABLE_LIMIT) {
        parts.push(section);
    }
    parts.push(
        "CSS variable names are strong evidence: a variable named like a role usually \
         holds that role's color."
            .to_string(),
    );
    parts.push(ROLE_SCHEMA.to_string());
    parts.join("\n\n")
}

fn palette_section(palette: &[String]) -> String {
    format!("## Extracted colors\n\n{}", palette.join(", "))
}

fn variables_section(variables: &BTreeMap<String, String>, limit: usize) -> Option<String> {
    let hints = role_hint_variables(variables, limit);
    if hints.is_empty() {
        return None;
    }
    let lines: Vec<String> = hints
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    Some(format!("## CSS variables\n\n{}", lines.join("\n")))
}
