//! Full-page capture driver.

use stackscope_config::CaptureConfig;
use stackscope_protocols::{CaptureDevice, CaptureError, ScrollPosition};
use tracing::{debug, info, warn};

use crate::encode::{data_url, jpeg_data_url};
use crate::plan::CapturePlan;
use crate::retry::RetryPolicy;
use crate::session::{CaptureSession, SessionOutcome};
use crate::state::CaptureState;
use crate::stitch::{Tile, stitch_tiles};

/// A finished screenshot.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// `data:` URL; JPEG for stitched captures, the device's format for
    /// single shots.
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub tiles: usize,
}

/// Measures, scrolls, captures and stitches one page.
pub struct FullPageCapturer {
    config: CaptureConfig,
    retry: RetryPolicy,
}

impl FullPageCapturer {
    pub fn new(config: CaptureConfig) -> Self {
        let retry = RetryPolicy::from_config(&config);
        Self { config, retry }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Capture the whole page, closing `session` when done.
    ///
    /// Any failure leaves the session `Failed`; the scroll origin is
    /// restored on every path.
    pub async fn capture(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
    ) -> Result<CapturedImage, CaptureError> {
        let result = self.run(device, session).await;
        let outcome = match &result {
            Ok(_) => SessionOutcome::Completed,
            Err(e) => {
                session.fail();
                if e.is_cancelled() {
                    SessionOutcome::Cancelled
                } else {
                    SessionOutcome::Failed
                }
            }
        };
        session.close(device, outcome).await;
        result
    }

    /// Full page, else one viewport shot, else nothing.
    ///
    /// Cancellation skips the fallback.
    pub async fn capture_or_fallback(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
    ) -> Option<CapturedImage> {
        let error = match self.run(device, session).await {
            Ok(image) => {
                session.close(device, SessionOutcome::Completed).await;
                return Some(image);
            }
            Err(e) => e,
        };
        session.fail();

        if error.is_cancelled() {
            info!(session = %session.id(), "Capture cancelled");
            session.close(device, SessionOutcome::Cancelled).await;
            return None;
        }

        warn!(session = %session.id(), "Full-page capture failed, falling back to a single viewport: {}", error);
        // The fallback shoots whatever is on screen at the origin.
        if let Some(origin) = session.origin() {
            if let Err(e) = session.guard(device.scroll_to(origin)).await {
                debug!("Could not return to scroll origin before fallback: {}", e);
            }
        }

        let fallback = match session.transition(CaptureState::SingleShot) {
            Ok(()) => self.single_shot(device, session).await,
            Err(e) => Err(e),
        };
        match fallback {
            Ok(image) => {
                session.close(device, SessionOutcome::Completed).await;
                Some(image)
            }
            Err(e) => {
                session.fail();
                warn!(session = %session.id(), "Single viewport capture failed, continuing without a screenshot: {}", e);
                let outcome = if e.is_cancelled() {
                    SessionOutcome::Cancelled
                } else {
                    SessionOutcome::Failed
                };
                session.close(device, outcome).await;
                None
            }
        }
    }

    async fn run(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
    ) -> Result<CapturedImage, CaptureError> {
        session.transition(CaptureState::MeasuringPage)?;
        let metrics = session.guard(device.measure()).await?;
        session.record_origin(metrics.scroll_position());
        let plan = CapturePlan::new(&metrics, &self.config)?;
        debug!(
            session = %session.id(),
            tiles = plan.tile_count,
            scale = plan.scale,
            width = plan.canvas_width,
            height = plan.canvas_height,
            "Capture planned"
        );

        if plan.is_single_shot() {
            session.transition(CaptureState::SingleShot)?;
            return self.single_shot(device, session).await;
        }

        session.transition(CaptureState::TiledCapture)?;
        let origin_x = metrics.scroll_x;
        let mut tiles = Vec::with_capacity(plan.tile_count);
        for index in 0..plan.tile_count {
            let requested = plan.scroll_offset(index);
            let actual = session
                .guard(device.scroll_to(ScrollPosition {
                    x: origin_x,
                    y: requested,
                }))
                .await?;
            session.pause(self.config.settle_delay_ms).await?;

            let bytes = self.capture_tile(device, session, index).await?;
            tiles.push(Tile {
                index,
                bytes,
                overlap: (requested - actual.y).max(0.0),
            });

            if index + 1 < plan.tile_count {
                session.pause(self.config.rate_limit_delay_ms).await?;
            }
        }

        session.transition(CaptureState::Stitching)?;
        let quality = self.config.jpeg_quality;
        let data_url = tokio::task::spawn_blocking(move || {
            let canvas = stitch_tiles(&plan, &tiles)?;
            jpeg_data_url(&canvas, quality)
        })
        .await
        .map_err(|e| CaptureError::Image(format!("Stitching task failed: {}", e)))??;

        session.transition(CaptureState::Done)?;
        info!(
            session = %session.id(),
            tiles = plan.tile_count,
            width = plan.canvas_width,
            height = plan.canvas_height,
            "Captured full page"
        );
        Ok(CapturedImage {
            data_url,
            width: plan.canvas_width,
            height: plan.canvas_height,
            tiles: plan.tile_count,
        })
    }

    async fn single_shot(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
    ) -> Result<CapturedImage, CaptureError> {
        let bytes = self.capture_tile(device, session, 0).await?;
        let (width, height) = image::load_from_memory(&bytes)
            .map(|img| (img.width(), img.height()))
            .map_err(|e| CaptureError::Image(format!("Failed to decode capture: {}", e)))?;
        session.transition(CaptureState::Done)?;
        info!(session = %session.id(), width, height, "Captured single viewport");
        Ok(CapturedImage {
            data_url: data_url(&bytes),
            width,
            height,
            tiles: 1,
        })
    }

    /// Capture the current viewport, retrying per the policy.
    async fn capture_tile(
        &self,
        device: &dyn CaptureDevice,
        session: &CaptureSession,
        tile: usize,
    ) -> Result<Vec<u8>, CaptureError> {
        let mut attempt = 1;
        loop {
            match session.guard(device.capture_visible()).await {
                Ok(Some(bytes)) => return Ok(bytes),
                Ok(None) => debug!(tile, attempt, "Viewport capture returned no image"),
                Err(CaptureError::Cancelled) => return Err(CaptureError::Cancelled),
                Err(e) => debug!(tile, attempt, "Viewport capture failed: {}", e),
            }

            match self.retry.backoff(attempt) {
                Some(delay) => {
                    session.pause(delay.as_millis() as u64).await?;
                    attempt += 1;
                }
                None => {
                    return Err(CaptureError::TileFailed {
                        tile,
                        attempts: self.retry.attempts,
                    });
                }
            }
        }
    }
}

impl Default for FullPageCapturer {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

#[cfg(test)]
#[path = "capturer_tests.rs"]
mod tests;
