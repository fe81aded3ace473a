//! Model reply parsing and normalization.

use serde_json::{Map, Value};
use stackscope_extract::normalize_hex;
use stackscope_protocols::{CategorizeError, CategorizedPalette, ColorRole, PossibleSystem};

/// First balanced `{...}` block in `reply`. Braces inside JSON strings do
/// not count.
pub fn extract_json_object(reply: &str) -> Result<&str, CategorizeError> {
    let start = reply.find('{').ok_or(CategorizeError::NoJsonFound)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in reply[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&reply[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    Err(CategorizeError::NoJsonFound)
}

/// Parse a model reply into a palette, keeping only well-formed values.
pub fn parse_palette(reply: &str) -> Result<CategorizedPalette, CategorizeError> {
    let json = extract_json_object(reply)?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| CategorizeError::InvalidJson(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| CategorizeError::InvalidJson("expected an object".to_string()))?;
    Ok(normalize_palette(object))
}

/// Accept role values that are 3, 6 or 8 digit hex strings and a known
/// `possibleSystem`; drop everything else.
pub fn normalize_palette(object: &Map<String, Value>) -> CategorizedPalette {
    let mut palette = CategorizedPalette::default();
    for role in ColorRole::ALL {
        if let Some(hex) = object
            .get(role.key())
            .and_then(Value::as_str)
            .and_then(normalize_hex)
        {
            palette.set(role, hex);
        }
    }
    palette.possible_system = object
        .get("possibleSystem")
        .and_then(Value::as_str)
        .and_then(PossibleSystem::parse);
    palette
}
