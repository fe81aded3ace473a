use super::*;

fn button(bg: &str) -> ExtractedButton {
    ExtractedButton {
        background_color: bg.to_string(),
        text_color: "#FFFFFF".to_string(),
        border_radius: "6px".to_string(),
        font_weight: "600".to_string(),
        variant: ButtonVariant::Primary,
        border_color: None,
        border_width: None,
        padding: Some("8px 16px".to_string()),
        font_size: None,
        font_family: None,
        box_shadow: None,
        text_transform: None,
        letter_spacing: None,
    }
}

#[test]
fn test_font_usage_priority_order() {
    let mut usages = vec![FontUsage::Other, FontUsage::Body, FontUsage::Code, FontUsage::Heading];
    usages.sort_by_key(|u| u.priority());
    assert_eq!(
        usages,
        vec![FontUsage::Heading, FontUsage::Code, FontUsage::Body, FontUsage::Other]
    );
}

#[test]
fn test_font_serialize() {
    let font = ExtractedFont {
        family: "Inter".to_string(),
        usage: FontUsage::Heading,
    };
    let json = serde_json::to_value(&font).unwrap();
    assert_eq!(json["usage"], "heading");
}

#[test]
fn test_button_signature_distinguishes_padding() {
    let a = button("#2563EB");
    let mut b = button("#2563EB");
    assert_eq!(a.signature(), b.signature());
    b.padding = Some("12px 24px".to_string());
    assert_ne!(a.signature(), b.signature());
}

#[test]
fn test_button_serialize_skips_absent_fields() {
    let json = serde_json::to_value(button("#2563EB")).unwrap();
    assert_eq!(json["backgroundColor"], "#2563EB");
    assert_eq!(json["variant"], "primary");
    assert!(json.get("boxShadow").is_none());
    assert!(!button(ExtractedButton::TRANSPARENT).signature().is_empty());
    assert!(button(ExtractedButton::TRANSPARENT).is_transparent());
}

#[test]
fn test_possible_system_parse() {
    assert_eq!(PossibleSystem::parse("shadcn"), Some(PossibleSystem::Shadcn));
    assert_eq!(PossibleSystem::parse("bootstrap"), None);
    assert_eq!(PossibleSystem::parse("Tailwind"), None);
}

#[test]
fn test_categorized_palette_roles() {
    let mut palette = CategorizedPalette::default();
    assert_eq!(palette.assigned_roles(), 0);
    palette.set(ColorRole::Primary, "#2563EB".to_string());
    assert_eq!(palette.get(ColorRole::Primary), Some("#2563EB"));
    assert_eq!(palette.assigned_roles(), 1);

    let json = serde_json::to_value(&palette).unwrap();
    assert_eq!(json["primary"], "#2563EB");
    assert!(json.get("background").is_none());
}

#[test]
fn test_tech_signals_detected() {
    let signals = TechSignals {
        has_react: true,
        has_tailwind: true,
        ..Default::default()
    };
    assert_eq!(signals.detected(), vec!["React", "Tailwind CSS"]);

    let json = serde_json::to_value(signals).unwrap();
    assert_eq!(json["hasNextJs"], false);
    assert_eq!(json["hasReact"], true);
}

#[test]
fn test_bundle_with_screenshot() {
    let bundle = PageSignalBundle::default().with_screenshot(Some("data:image/jpeg;base64,AA".to_string()));
    assert!(bundle.screenshot.is_some());
    let json = serde_json::to_value(&bundle).unwrap();
    assert!(json.get("extractedColors").is_some());
    assert!(json.get("cssVariables").is_some());
}
