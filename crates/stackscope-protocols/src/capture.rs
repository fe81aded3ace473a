//! Screenshot capture protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Page geometry read before a capture, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Full scrollable height of the document.
    pub total_height: f64,
    pub device_pixel_ratio: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            total_height: 720.0,
            device_pixel_ratio: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl PageMetrics {
    /// Scroll position at the time of measurement.
    pub fn scroll_position(&self) -> ScrollPosition {
        ScrollPosition {
            x: self.scroll_x,
            y: self.scroll_y,
        }
    }
}

/// A scroll offset in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Capability to measure, scroll and screenshot one page.
///
/// Screenshots are a rate-limited resource of the host; callers must not
/// issue captures concurrently.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Read viewport size, document height, device pixel ratio and the
    /// current scroll offset.
    async fn measure(&self) -> Result<PageMetrics, CaptureError>;

    /// Scroll to `position`; returns the offset the page actually settled
    /// at (browsers clamp at the bottom of the document).
    async fn scroll_to(&self, position: ScrollPosition) -> Result<ScrollPosition, CaptureError>;

    /// Capture the visible viewport as encoded image bytes. `Ok(None)` means
    /// the host produced no image this time and the call may be retried.
    async fn capture_visible(&self) -> Result<Option<Vec<u8>>, CaptureError>;
}
