use super::*;
use crate::snapshot::{DomSnapshot, SnapshotElement};
use stackscope_protocols::StyleRule;

fn page() -> (DomSnapshot, ElementRef) {
    let mut doc = DomSnapshot::new("https://example.com/", "Example");
    let html = doc.push(SnapshotElement::new("html"));
    let body = doc.push(
        SnapshotElement::new("body")
            .child_of(html)
            .style("background-color", "rgb(255, 255, 255)")
            .style("color", "rgb(0, 0, 0)")
            .size(1280.0, 3000.0),
    );
    (doc, body)
}

fn root_vars(doc: &mut DomSnapshot, vars: &[(&str, &str)]) {
    doc.push_sheet(
        None,
        vec![StyleRule {
            selector_text: ":root".to_string(),
            declarations: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }],
    );
}

fn sample<'a>(samples: &'a [ColorSample], hex: &str) -> &'a ColorSample {
    samples
        .iter()
        .find(|s| s.hex == hex)
        .unwrap_or_else(|| panic!("{hex} not sampled"))
}

#[test]
fn test_blue_cta_votes() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("p")
            .child_of(body)
            .style("color", "rgb(0, 0, 0)")
            .size(600.0, 40.0),
    );
    doc.push(
        SnapshotElement::new("button")
            .child_of(body)
            .style("background-color", "rgb(37, 99, 235)")
            .style("color", "rgb(255, 255, 255)")
            .size(160.0, 48.0),
    );

    let extractor = ColorExtractor::default();
    let samples = extractor.collect_samples(&doc);
    let blue = sample(&samples, "#2563EB");
    // 50 (primary UI) + 5 colorful x 5 area x 2 UI (general)
    assert_eq!(blue.weight, 100);
    assert!(blue.sources.contains(&ColorSource::PrimaryUi));
    assert!(blue.sources.contains(&ColorSource::GeneralBackground));
    assert!(samples.iter().all(|s| s.hex != "#FFFFFF" && s.hex != "#000000"));

    assert_eq!(extractor.extract(&doc), vec!["#2563EB"]);
}

#[test]
fn test_weak_single_source_dropped() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("div")
            .child_of(body)
            .style("background-color", "rgb(229, 231, 235)")
            .size(100.0, 100.0),
    );
    doc.push(
        SnapshotElement::new("div")
            .child_of(body)
            .style("background-color", "rgb(220, 38, 38)")
            .size(500.0, 500.0),
    );

    let extractor = ColorExtractor::default();
    let samples = extractor.collect_samples(&doc);
    assert_eq!(sample(&samples, "#E5E7EB").weight, 5);
    assert_eq!(sample(&samples, "#DC2626").weight, 50);
    assert_eq!(extractor.extract(&doc), vec!["#DC2626"]);
}

#[test]
fn test_secondary_and_general_sources_combine() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("section")
            .child_of(body)
            .style("background-color", "rgb(229, 231, 235)")
            .size(1280.0, 400.0),
    );

    let extractor = ColorExtractor::default();
    let samples = extractor.collect_samples(&doc);
    let gray = sample(&samples, "#E5E7EB");
    assert_eq!(gray.weight, 5 + 10);
    assert_eq!(gray.sources.len(), 2);
    assert_eq!(extractor.extract(&doc), vec!["#E5E7EB"]);
}

#[test]
fn test_colorful_ranks_before_heavier_neutral() {
    let (mut doc, body) = page();
    root_vars(&mut doc, &[("--border", "#6B7280"), ("--brand", "#7C3AED")]);
    for _ in 0..2 {
        doc.push(
            SnapshotElement::new("section")
                .child_of(body)
                .style("background-color", "rgb(107, 114, 128)")
                .size(1280.0, 900.0),
        );
    }

    let extractor = ColorExtractor::default();
    let samples = extractor.collect_samples(&doc);
    assert_eq!(sample(&samples, "#6B7280").weight, 35);
    assert_eq!(sample(&samples, "#7C3AED").weight, 20);
    assert_eq!(extractor.extract(&doc), vec!["#7C3AED", "#6B7280"]);
}

#[test]
fn test_css_variable_weights() {
    let (mut doc, _) = page();
    root_vars(
        &mut doc,
        &[
            ("--color-primary", "#2563EB"),
            ("--highlight", "#F59E0B"),
            ("--surface", "#10B981"),
            ("--background", "#FFFFFF"),
        ],
    );

    let samples = ColorExtractor::default().collect_samples(&doc);
    assert_eq!(sample(&samples, "#2563EB").weight, 20);
    assert_eq!(sample(&samples, "#F59E0B").weight, 10);
    assert_eq!(sample(&samples, "#10B981").weight, 5);
    assert!(samples.iter().all(|s| s.hex != "#FFFFFF"));
}

#[test]
fn test_near_duplicates_collapse() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("button")
            .child_of(body)
            .style("background-color", "rgb(37, 99, 235)")
            .size(160.0, 48.0),
    );
    root_vars(&mut doc, &[("--primary", "#2564EB")]);

    let palette = ColorExtractor::default().extract(&doc);
    assert_eq!(palette, vec!["#2563EB"]);
}

#[test]
fn test_excluded_elements_do_not_vote() {
    let (mut doc, body) = page();
    let logo = doc.push(SnapshotElement::new("a").child_of(body).class("navbar-logo"));
    doc.push(
        SnapshotElement::new("button")
            .child_of(logo)
            .style("background-color", "rgb(255, 90, 0)")
            .size(160.0, 48.0),
    );
    doc.push(
        SnapshotElement::new("img")
            .child_of(body)
            .style("background-color", "rgb(0, 128, 0)")
            .size(800.0, 600.0),
    );

    let samples = ColorExtractor::default().collect_samples(&doc);
    assert!(samples.is_empty());
}

#[test]
fn test_text_colors_vote_for_headings_and_links() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("h1")
            .child_of(body)
            .style("color", "rgb(124, 58, 237)")
            .size(800.0, 60.0),
    );
    doc.push(
        SnapshotElement::new("p")
            .child_of(body)
            .style("color", "rgb(16, 185, 129)")
            .size(800.0, 60.0),
    );

    let samples = ColorExtractor::default().collect_samples(&doc);
    let purple = sample(&samples, "#7C3AED");
    assert_eq!(purple.weight, 3);
    assert_eq!(purple.sources, BTreeSet::from([ColorSource::Text]));
    assert!(samples.iter().all(|s| s.hex != "#10B981"));
}

#[test]
fn test_general_scan_limit() {
    let (mut doc, body) = page();
    for _ in 0..5 {
        doc.push(SnapshotElement::new("div").child_of(body).size(10.0, 10.0));
    }
    doc.push(
        SnapshotElement::new("div")
            .child_of(body)
            .style("background-color", "rgb(220, 38, 38)")
            .size(500.0, 500.0),
    );

    let config = ColorConfig {
        general_scan_limit: 5,
        ..Default::default()
    };
    assert!(ColorExtractor::new(config).collect_samples(&doc).is_empty());
}

#[test]
fn test_palette_bounded_and_separated() {
    let (mut doc, _) = page();
    let vars: Vec<(String, String)> = [
        "#EF4444", "#F97316", "#F59E0B", "#EAB308", "#84CC16", "#22C55E", "#10B981", "#14B8A6",
        "#06B6D4", "#0EA5E9", "#3B82F6", "#6366F1", "#8B5CF6", "#A855F7", "#D946EF", "#EC4899",
        "#EF4445", "#3B82F7",
    ]
    .iter()
    .enumerate()
    .map(|(i, hex)| (format!("--c{i}"), hex.to_string()))
    .collect();
    let borrowed: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    root_vars(&mut doc, &borrowed);

    let palette = ColorExtractor::default().extract(&doc);
    assert_eq!(palette.len(), 8);
    for (i, a) in palette.iter().enumerate() {
        for b in &palette[i + 1..] {
            assert!(is_perceptually_distinct(a, b, 5.0, 25), "{a} vs {b}");
        }
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let (mut doc, body) = page();
    doc.push(
        SnapshotElement::new("nav")
            .child_of(body)
            .style("background-color", "rgb(17, 24, 39)")
            .size(1280.0, 64.0),
    );
    doc.push(
        SnapshotElement::new("button")
            .child_of(body)
            .style("background-color", "rgb(124, 58, 237)")
            .size(160.0, 48.0),
    );
    root_vars(&mut doc, &[("--accent", "#F59E0B")]);

    let extractor = ColorExtractor::default();
    let first = extractor.extract(&doc);
    assert_eq!(first, extractor.extract(&doc));
    assert_eq!(first[0], "#7C3AED");
}
