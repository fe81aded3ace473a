//! Element classification: exclusion, UI components, visual weight.

use std::sync::LazyLock;

use regex::Regex;
use stackscope_protocols::{ElementRef, PageInspector};

const MEDIA_TAGS: &[&str] = &["img", "video", "canvas", "iframe", "picture", "source"];

const UI_TAGS: &[&str] = &[
    "button", "input", "select", "textarea", "nav", "header", "footer", "main", "aside", "form",
];

const UI_CLASS_MARKERS: &[&str] = &[
    "btn", "button", "card", "modal", "nav", "badge", "input", "cta", "primary", "menu", "tab",
    "dropdown", "alert", "chip", "tag", "toggle",
];

/// Largest inline icon still considered part of the UI.
const MAX_ICON_SIZE: f64 = 48.0;

static LOGO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"logo|brand|avatar|gallery|thumbnail").expect("logo pattern is valid")
});

static WIDGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"testimonial|social|intercom|drift|zendesk|crisp|hubspot|tawk|livechat|chat-widget|trusted-by|as-seen|customer-logo|client-logo",
    )
    .expect("widget pattern is valid")
});

static FOOTER_NOISE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"badge|partner|sponsor").expect("footer pattern is valid"));

/// Lowercased `class` and `id` of an element.
fn names(page: &dyn PageInspector, element: ElementRef) -> String {
    format!("{} {}", page.class_name(element), page.element_id(element)).to_lowercase()
}

/// Whether an element's colors say nothing about the site's own design:
/// media, large SVG artwork, logos and third-party widgets.
pub fn should_exclude(page: &dyn PageInspector, element: ElementRef) -> bool {
    let tag = page.tag_name(element).unwrap_or("");
    if MEDIA_TAGS.contains(&tag) {
        return true;
    }

    if tag == "svg" {
        if let Ok(rect) = page.bounding_rect(element) {
            if rect.width > MAX_ICON_SIZE || rect.height > MAX_ICON_SIZE {
                return true;
            }
        }
    }

    let mut haystack = names(page, element);
    if let Some(parent) = page.parent(element) {
        haystack.push(' ');
        haystack.push_str(&names(page, parent));
    }

    if LOGO_PATTERN.is_match(&haystack) || WIDGET_PATTERN.is_match(&haystack) {
        return true;
    }

    FOOTER_NOISE_PATTERN.is_match(&haystack)
        && matches!(page.closest(element, "footer"), Ok(Some(_)))
}

/// Whether an element is an interactive or structural UI component.
pub fn is_ui_component(page: &dyn PageInspector, element: ElementRef) -> bool {
    if page
        .tag_name(element)
        .is_some_and(|tag| UI_TAGS.contains(&tag))
    {
        return true;
    }
    let class = page.class_name(element).to_lowercase();
    UI_CLASS_MARKERS.iter().any(|marker| class.contains(marker))
}

/// Weight by rendered area. Unmeasurable elements weigh 1.
pub fn visual_weight(page: &dyn PageInspector, element: ElementRef) -> u32 {
    let Ok(rect) = page.bounding_rect(element) else {
        return 1;
    };
    match rect.area() {
        a if a < 100.0 => 1,
        a if a < 1_000.0 => 2,
        a if a < 5_000.0 => 3,
        a if a < 20_000.0 => 5,
        a if a < 50_000.0 => 7,
        _ => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DomSnapshot, SnapshotElement};

    fn page() -> (DomSnapshot, ElementRef) {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        let html = doc.push(SnapshotElement::new("html"));
        let body = doc.push(SnapshotElement::new("body").child_of(html));
        (doc, body)
    }

    #[test]
    fn test_media_tags_excluded() {
        let (mut doc, body) = page();
        let img = doc.push(SnapshotElement::new("img").child_of(body));
        let video = doc.push(SnapshotElement::new("video").child_of(body));
        let div = doc.push(SnapshotElement::new("div").child_of(body));
        assert!(should_exclude(&doc, img));
        assert!(should_exclude(&doc, video));
        assert!(!should_exclude(&doc, div));
    }

    #[test]
    fn test_svg_size_threshold() {
        let (mut doc, body) = page();
        let icon = doc.push(SnapshotElement::new("svg").child_of(body).size(24.0, 24.0));
        let art = doc.push(SnapshotElement::new("svg").child_of(body).size(400.0, 300.0));
        let unmeasured = doc.push(SnapshotElement::new("svg").child_of(body));
        assert!(!should_exclude(&doc, icon));
        assert!(should_exclude(&doc, art));
        assert!(!should_exclude(&doc, unmeasured));
    }

    #[test]
    fn test_logo_by_class_or_parent() {
        let (mut doc, body) = page();
        let logo = doc.push(SnapshotElement::new("div").child_of(body).class("site-Logo"));
        let inner = doc.push(SnapshotElement::new("span").child_of(logo));
        let deep = doc.push(SnapshotElement::new("span").child_of(inner));
        let by_id = doc.push(SnapshotElement::new("div").child_of(body).attr("id", "user-avatar"));
        assert!(should_exclude(&doc, logo));
        assert!(should_exclude(&doc, inner));
        assert!(!should_exclude(&doc, deep));
        assert!(should_exclude(&doc, by_id));
    }

    #[test]
    fn test_widgets_excluded() {
        let (mut doc, body) = page();
        let chat = doc.push(SnapshotElement::new("div").child_of(body).attr("id", "intercom-container"));
        let trusted = doc.push(SnapshotElement::new("section").child_of(body).class("trusted-by"));
        assert!(should_exclude(&doc, chat));
        assert!(should_exclude(&doc, trusted));
    }

    #[test]
    fn test_badges_only_excluded_in_footer() {
        let (mut doc, body) = page();
        let footer = doc.push(SnapshotElement::new("footer").child_of(body));
        let footer_badge = doc.push(SnapshotElement::new("div").child_of(footer).class("partner-badges"));
        let hero_badge = doc.push(SnapshotElement::new("span").child_of(body).class("badge"));
        assert!(should_exclude(&doc, footer_badge));
        assert!(!should_exclude(&doc, hero_badge));
    }

    #[test]
    fn test_is_ui_component() {
        let (mut doc, body) = page();
        let button = doc.push(SnapshotElement::new("button").child_of(body));
        let card = doc.push(SnapshotElement::new("div").child_of(body).class("pricing-Card"));
        let plain = doc.push(SnapshotElement::new("div").child_of(body).class("wrapper"));
        assert!(is_ui_component(&doc, button));
        assert!(is_ui_component(&doc, card));
        assert!(!is_ui_component(&doc, plain));
    }

    #[test]
    fn test_visual_weight_steps() {
        let (mut doc, body) = page();
        let cases = [
            (5.0, 5.0, 1),
            (10.0, 10.0, 2),
            (50.0, 50.0, 3),
            (100.0, 100.0, 5),
            (200.0, 200.0, 7),
            (500.0, 500.0, 10),
        ];
        for (w, h, expected) in cases {
            let el = doc.push(SnapshotElement::new("div").child_of(body).size(w, h));
            assert_eq!(visual_weight(&doc, el), expected, "{w}x{h}");
        }
    }

    #[test]
    fn test_visual_weight_without_layout() {
        let (mut doc, body) = page();
        let el = doc.push(SnapshotElement::new("div").child_of(body));
        assert_eq!(visual_weight(&doc, el), 1);
        assert_eq!(visual_weight(&doc, ElementRef(999)), 1);
    }
}
