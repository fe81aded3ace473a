//! [`CaptureDevice`] backed by a CDP page session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use stackscope_protocols::{CaptureDevice, CaptureError, PageMetrics, ScrollPosition};
use tracing::trace;

use crate::cdp::{CdpError, PageSession};
use crate::load_retry::retry_after_load;

const MEASURE_SCRIPT: &str = r#"(() => ({
  viewportWidth: window.innerWidth,
  viewportHeight: window.innerHeight,
  totalHeight: Math.max(
    document.body ? document.body.scrollHeight : 0,
    document.documentElement ? document.documentElement.scrollHeight : 0
  ),
  devicePixelRatio: window.devicePixelRatio || 1,
  scrollX: window.scrollX,
  scrollY: window.scrollY
}))()"#;

fn scroll_script(position: ScrollPosition) -> String {
    format!(
        "(() => {{ window.scrollTo({}, {}); return {{ x: window.scrollX, y: window.scrollY }}; }})()",
        position.x, position.y
    )
}

fn unreachable(e: CdpError) -> CaptureError {
    CaptureError::PageUnreachable(e.to_string())
}

/// Measures, scrolls and screenshots one page over CDP.
///
/// A failing call is retried once after waiting for the page to finish
/// loading; a second failure surfaces as [`CaptureError::PageUnreachable`].
pub struct CdpCaptureDevice {
    page: Arc<PageSession>,
    load_timeout: Duration,
}

impl CdpCaptureDevice {
    pub fn new(page: Arc<PageSession>, load_timeout: Duration) -> Self {
        Self { page, load_timeout }
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, CaptureError> {
        let page = &self.page;
        let timeout = self.load_timeout;
        retry_after_load(
            move || page.evaluate(expression),
            move || page.wait_for_load(timeout),
        )
        .await
        .map_err(unreachable)
    }

    async fn screenshot(&self) -> Result<String, CaptureError> {
        let page = &self.page;
        let timeout = self.load_timeout;
        retry_after_load(
            move || page.capture_viewport(),
            move || page.wait_for_load(timeout),
        )
        .await
        .map_err(unreachable)
    }
}

#[async_trait]
impl CaptureDevice for CdpCaptureDevice {
    async fn measure(&self) -> Result<PageMetrics, CaptureError> {
        let value = self.evaluate(MEASURE_SCRIPT).await?;
        parse_metrics(value)
    }

    async fn scroll_to(&self, position: ScrollPosition) -> Result<ScrollPosition, CaptureError> {
        let value = self.evaluate(&scroll_script(position)).await?;
        let actual: ScrollPosition = serde_json::from_value(value)
            .map_err(|e| CaptureError::Device(format!("Unexpected scroll result: {}", e)))?;
        trace!(requested = position.y, actual = actual.y, "Scrolled");
        Ok(actual)
    }

    async fn capture_visible(&self) -> Result<Option<Vec<u8>>, CaptureError> {
        let data = self.screenshot().await?;
        decode_screenshot(&data)
    }
}

fn parse_metrics(value: Value) -> Result<PageMetrics, CaptureError> {
    serde_json::from_value(value).map_err(|e| CaptureError::InvalidMetrics(e.to_string()))
}

/// Empty data means the browser produced no frame this time.
fn decode_screenshot(data: &str) -> Result<Option<Vec<u8>>, CaptureError> {
    if data.is_empty() {
        return Ok(None);
    }
    STANDARD
        .decode(data)
        .map(Some)
        .map_err(|e| CaptureError::Image(format!("Invalid screenshot data: {}", e)))
}
