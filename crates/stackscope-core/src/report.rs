//! Analysis report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stackscope_protocols::{CategorizedPalette, PageSignalBundle, PaletteConfidence};
use uuid::Uuid;

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub url: String,
    pub title: String,
    /// Extracted signals, without the screenshot payload.
    pub signals: PageSignalBundle,
    pub screenshot_captured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<CategorizedPalette>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_confidence: Option<PaletteConfidence>,
    pub explanation: String,
}

impl AnalysisReport {
    pub fn new(
        mut signals: PageSignalBundle,
        categorized: Option<(CategorizedPalette, PaletteConfidence)>,
        explanation: String,
    ) -> Self {
        let screenshot_captured = signals.screenshot.take().is_some();
        let (palette, palette_confidence) = match categorized {
            Some((palette, confidence)) => (Some(palette), Some(confidence)),
            None => (None, None),
        };
        Self {
            id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            url: signals.url.clone(),
            title: signals.title.clone(),
            signals,
            screenshot_captured,
            palette,
            palette_confidence,
            explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_stripped() {
        let signals = PageSignalBundle {
            url: "https://acme.test/".to_string(),
            title: "Acme".to_string(),
            screenshot: Some("data:image/jpeg;base64,AAAA".to_string()),
            ..Default::default()
        };
        let report = AnalysisReport::new(signals, None, "Built with React.".to_string());
        assert!(report.screenshot_captured);
        assert!(report.signals.screenshot.is_none());
        assert_eq!(report.url, "https://acme.test/");
        assert_eq!(report.title, "Acme");
    }

    #[test]
    fn test_serialized_shape() {
        let palette = CategorizedPalette {
            primary: Some("#2563EB".to_string()),
            ..Default::default()
        };
        let report = AnalysisReport::new(
            PageSignalBundle::default(),
            Some((palette, PaletteConfidence::Medium)),
            "x".to_string(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("analyzedAt").is_some());
        assert_eq!(json["paletteConfidence"], "medium");
        assert_eq!(json["palette"]["primary"], "#2563EB");
        assert_eq!(json["screenshotCaptured"], false);
    }

    #[test]
    fn test_no_palette_omitted() {
        let report = AnalysisReport::new(PageSignalBundle::default(), None, "x".to_string());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("palette").is_none());
        assert!(json.get("paletteConfidence").is_none());
    }
}
