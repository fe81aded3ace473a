//! One analysis run: extract, capture, categorize, explain.

use std::sync::Arc;
use std::time::Instant;

use stackscope_capture::{CaptureSession, FullPageCapturer};
use stackscope_categorize::ColorCategorizer;
use stackscope_config::Config;
use stackscope_protocols::{
    CaptureDevice, CategorizedPalette, ChatMessage, ChatProvider, ChatRequest, PageInspector,
    PageSignalBundle, PaletteConfidence,
};
use tracing::{debug, info, warn};

use crate::error::AnalyzeError;
use crate::prompt::{SYSTEM_PROMPT, analysis_prompt};
use crate::report::AnalysisReport;

const ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Orchestrates a single page analysis.
///
/// Stages run strictly in order: extraction finishes before capture starts,
/// and the screenshot is attached before categorization.
pub struct Analyzer {
    extractor: stackscope_extract::PageSignalExtractor,
    capturer: FullPageCapturer,
    capture_enabled: bool,
    categorizer: ColorCategorizer,
    provider: Arc<dyn ChatProvider>,
    model: String,
    max_tokens: u32,
}

impl Analyzer {
    pub fn new(config: &Config, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            extractor: stackscope_extract::PageSignalExtractor::new(config.extraction.clone()),
            capturer: FullPageCapturer::new(config.capture.clone()),
            capture_enabled: config.capture.enabled,
            categorizer: ColorCategorizer::new(
                provider.clone(),
                config.provider.categorization_model(),
            ),
            provider,
            model: config.provider.model.clone(),
            max_tokens: config.provider.response_length.max_tokens(),
        }
    }

    /// Extraction only.
    pub fn extract_signals(&self, page: &dyn PageInspector) -> PageSignalBundle {
        self.extractor.extract(page)
    }

    /// Full-page screenshot with fallback; `None` when capture is disabled
    /// or every attempt failed.
    pub async fn capture_screenshot(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
    ) -> Option<String> {
        if !self.capture_enabled {
            debug!("Screenshot capture disabled");
            return None;
        }
        self.capturer
            .capture_or_fallback(device, session)
            .await
            .map(|image| image.data_url)
    }

    /// Vision categorization when a screenshot exists, then text-only, then
    /// nothing. Confidence is high only for the vision path.
    pub async fn categorize(
        &self,
        bundle: &PageSignalBundle,
    ) -> Option<(CategorizedPalette, PaletteConfidence)> {
        if bundle.extracted_colors.is_empty() {
            debug!("No colors extracted, skipping categorization");
            return None;
        }

        if let Some(screenshot) = bundle.screenshot.as_deref() {
            match self
                .categorizer
                .categorize_with_screenshot(&bundle.extracted_colors, screenshot, &bundle.css_variables)
                .await
            {
                Ok(palette) => return Some((palette, PaletteConfidence::High)),
                Err(e) => warn!("Vision categorization failed, trying text only: {}", e),
            }
        }

        match self
            .categorizer
            .categorize_text(&bundle.extracted_colors, &bundle.css_variables)
            .await
        {
            Ok(palette) => Some((palette, PaletteConfidence::Medium)),
            Err(e) => {
                warn!("Text categorization failed, continuing without color roles: {}", e);
                None
            }
        }
    }

    /// Ask the model to explain the page.
    pub async fn explain(
        &self,
        bundle: &PageSignalBundle,
        palette: Option<&CategorizedPalette>,
    ) -> Result<String, AnalyzeError> {
        let request = ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(analysis_prompt(bundle, palette)),
            ],
        )
        .with_temperature(ANALYSIS_TEMPERATURE)
        .with_max_tokens(self.max_tokens);

        let explanation = self.provider.complete(request).await?;
        if explanation.trim().is_empty() {
            return Err(AnalyzeError::EmptyAnalysis);
        }
        Ok(explanation)
    }

    /// Run every stage. Only the explanation request can fail the run.
    pub async fn analyze(
        &self,
        page: &dyn PageInspector,
        device: Option<&dyn CaptureDevice>,
        session: &CaptureSession,
    ) -> Result<AnalysisReport, AnalyzeError> {
        let started = Instant::now();
        info!(url = page.url(), "Analyzing page");

        let mut bundle = self.extract_signals(page);
        if let Some(device) = device {
            bundle.screenshot = self.capture_screenshot(device, session).await;
        }

        let categorized = self.categorize(&bundle).await;
        let explanation = self
            .explain(&bundle, categorized.as_ref().map(|(palette, _)| palette))
            .await?;

        let report = AnalysisReport::new(bundle, categorized, explanation);
        info!(
            id = %report.id,
            screenshot = report.screenshot_captured,
            confidence = ?report.palette_confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
