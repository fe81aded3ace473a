use super::*;
use stackscope_extract::PageSignalExtractor;
use stackscope_protocols::{ElementRef, PageInspector};

/// Output shape of the snapshot script for a small page.
const SCRIPT_OUTPUT: &str = r##"{
    "url": "https://acme.test/",
    "title": "Acme",
    "html": "<html><body><button class=\"btn\">Buy</button></body></html>",
    "elements": [
        {"tag": "html", "parent": null, "attributes": {}, "style": {"background-color": "rgba(0, 0, 0, 0)"}, "rect": {"x": 0, "y": 0, "width": 1280, "height": 900}},
        {"tag": "body", "parent": 0, "attributes": {}, "style": {"background-color": "rgb(255, 255, 255)", "color": "rgb(17, 24, 39)", "font-family": "Inter, sans-serif"}, "rect": {"x": 0, "y": 0, "width": 1280, "height": 900}},
        {"tag": "button", "parent": 1, "attributes": {"class": "btn"}, "style": {"background-color": "rgb(37, 99, 235)", "color": "rgb(255, 255, 255)", "border-radius": "6px", "font-weight": "600"}, "rect": {"x": 10, "y": 10, "width": 120, "height": 40}},
        {"tag": "svg", "parent": 1, "attributes": {}, "style": null, "rect": null}
    ],
    "styleSheets": [
        {"href": null, "rules": [{"selectorText": ":root", "declarations": [["--brand", "#2563eb"]]}]},
        {"href": "https://cdn.test/site.css", "rules": null}
    ],
    "scripts": ["https://acme.test/_next/static/main.js"],
    "stylesheets": ["https://cdn.test/site.css"],
    "metaTags": [{"name": "description", "property": null, "content": "Acme tools"}],
    "globals": ["__NEXT_DATA__"]
}"##;

#[test]
fn test_expression_passes_limit_globals_and_selector() {
    let expression = snapshot_expression(250);
    assert!(expression.starts_with("((maxElements, probedGlobals, fullyScannedSelector) =>"));
    assert!(expression.contains("})(250, ["));
    assert!(expression.contains("\"__NEXT_DATA__\""));
    assert!(expression.ends_with(&format!(", {})", json!(fully_scanned_selector()))));
    assert!(expression.contains("input[type=submit]"));
}

#[test]
fn test_skipped_count_parses() {
    let json = r#"{"url": "https://long.test/", "elements": [], "skippedElements": 1200}"#;
    let snapshot = DomSnapshot::from_json(json).unwrap();
    assert_eq!(snapshot.skipped_elements, 1200);
    assert_eq!(DomSnapshot::from_json(SCRIPT_OUTPUT).unwrap().skipped_elements, 0);
}

#[test]
fn test_script_output_parses() {
    let snapshot = DomSnapshot::from_json(SCRIPT_OUTPUT).unwrap();
    assert_eq!(snapshot.elements.len(), 4);
    assert_eq!(snapshot.tag_name(ElementRef(2)), Some("button"));
    assert_eq!(snapshot.parent(ElementRef(2)), Some(ElementRef(1)));
    assert!(snapshot.computed_style(ElementRef(3)).is_err());
    assert!(snapshot.bounding_rect(ElementRef(3)).is_err());

    let sheets = snapshot.style_sheets();
    assert!(sheets[0].is_ok());
    assert!(sheets[1].is_err());
}

#[test]
fn test_script_output_feeds_extraction() {
    let snapshot = DomSnapshot::from_json(SCRIPT_OUTPUT).unwrap();
    let bundle = PageSignalExtractor::default().extract(&snapshot);

    assert_eq!(bundle.title, "Acme");
    assert!(bundle.tech_signals.has_next_js);
    assert!(bundle.extracted_colors.contains(&"#2563EB".to_string()));
    assert_eq!(bundle.css_variables.get("--brand").map(String::as_str), Some("#2563EB"));
    assert_eq!(bundle.meta_tags.get("description").map(String::as_str), Some("Acme tools"));
}
