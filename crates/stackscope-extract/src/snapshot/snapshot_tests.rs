use super::*;

fn sample() -> (DomSnapshot, ElementRef, ElementRef) {
    let mut doc = DomSnapshot::new("https://example.com/", "Example");
    let html = doc.push(SnapshotElement::new("html"));
    let body = doc.push(SnapshotElement::new("body").child_of(html));
    let footer = doc.push(SnapshotElement::new("footer").child_of(body));
    let link = doc.push(
        SnapshotElement::new("A")
            .child_of(footer)
            .class("partner-link")
            .style("color", "rgb(37, 99, 235)")
            .size(120.0, 24.0),
    );
    (doc, footer, link)
}

#[test]
fn test_query_all_document_order() {
    let (doc, footer, link) = sample();
    let found = doc.query_all("a, footer").unwrap();
    assert_eq!(found, vec![footer, link]);
}

#[test]
fn test_query_all_invalid_selector() {
    let (doc, _, _) = sample();
    assert!(matches!(
        doc.query_all("a:hover"),
        Err(InspectError::InvalidSelector(_))
    ));
}

#[test]
fn test_tag_name_lowercased() {
    let (doc, _, link) = sample();
    assert_eq!(doc.tag_name(link), Some("a"));
    assert_eq!(doc.tag_name(ElementRef(99)), None);
}

#[test]
fn test_class_name_default() {
    let (doc, footer, link) = sample();
    assert_eq!(doc.class_name(link), "partner-link");
    assert_eq!(doc.class_name(footer), "");
    assert_eq!(doc.element_id(link), "");
}

#[test]
fn test_closest_is_inclusive() {
    let (doc, footer, link) = sample();
    assert_eq!(doc.closest(link, "footer").unwrap(), Some(footer));
    assert_eq!(doc.closest(footer, "footer").unwrap(), Some(footer));
    assert_eq!(doc.closest(link, "nav").unwrap(), None);
}

#[test]
fn test_closest_unknown_element() {
    let (doc, _, _) = sample();
    assert!(matches!(
        doc.closest(ElementRef(42), "footer"),
        Err(InspectError::ElementNotFound(42))
    ));
}

#[test]
fn test_style_and_layout_unavailable() {
    let (doc, footer, link) = sample();
    assert!(doc.computed_style(link).is_ok());
    assert!(doc.bounding_rect(link).is_ok());
    assert!(matches!(
        doc.computed_style(footer),
        Err(InspectError::StyleUnavailable(_))
    ));
    assert!(matches!(
        doc.bounding_rect(footer),
        Err(InspectError::LayoutUnavailable(_))
    ));
}

#[test]
fn test_style_sheets_cross_origin() {
    let (mut doc, _, _) = sample();
    doc.push_sheet(
        None,
        vec![StyleRule {
            selector_text: ":root".to_string(),
            declarations: vec![("--brand".to_string(), "#2563eb".to_string())],
        }],
    );
    doc.push_cross_origin_sheet("https://cdn.example.net/site.css");

    let sheets = doc.style_sheets();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].as_ref().unwrap().len(), 1);
    assert!(matches!(&sheets[1], Err(InspectError::CrossOrigin(href)) if href.contains("cdn.example.net")));
    assert_eq!(doc.stylesheet_urls(), vec!["https://cdn.example.net/site.css"]);
}

#[test]
fn test_from_json() {
    let json = r#"{
        "url": "https://example.com/",
        "title": "Example",
        "elements": [
            {"tag": "body"},
            {"tag": "button", "parent": 0,
             "attributes": {"class": "btn"},
             "style": {"background-color": "rgb(37, 99, 235)"},
             "rect": {"x": 0, "y": 0, "width": 120, "height": 40}}
        ],
        "styleSheets": [{"href": "https://cdn.example.net/a.css", "rules": null}],
        "metaTags": [{"name": "generator", "content": "WordPress 6.4"}],
        "globals": ["React"]
    }"#;
    let doc = DomSnapshot::from_json(json).unwrap();
    assert_eq!(doc.elements.len(), 2);
    assert_eq!(doc.query_all("body .btn").unwrap(), vec![ElementRef(1)]);
    assert_eq!(
        doc.computed_style(ElementRef(1)).unwrap().get("background-color"),
        Some("rgb(37, 99, 235)")
    );
    assert!(doc.style_sheets()[0].is_err());
    assert_eq!(doc.globals(), vec!["React"]);
    assert_eq!(doc.meta_tags()[0].key(), Some("generator"));
}
