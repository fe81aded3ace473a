//! Capture geometry: tile layout and the bounded output canvas.

use stackscope_config::CaptureConfig;
use stackscope_protocols::{CaptureError, PageMetrics};

/// Geometry of one capture run, derived from measured page metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapturePlan {
    /// Viewport height in CSS pixels; also the scroll step between tiles.
    pub viewport_height: f64,
    /// Captured document height in CSS pixels, after the height cap.
    pub total_height: f64,
    pub device_pixel_ratio: f64,
    pub tile_count: usize,
    /// Downscale applied to every tile so the canvas fits its limits.
    pub scale: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl CapturePlan {
    /// Plan a capture, failing with `PageTooLarge` when the bounded canvas
    /// still exceeds the pixel ceiling.
    pub fn new(metrics: &PageMetrics, config: &CaptureConfig) -> Result<Self, CaptureError> {
        validate(metrics)?;

        let total_height = metrics
            .total_height
            .min(f64::from(config.max_capture_height))
            .max(metrics.viewport_height);
        let dpr = metrics.device_pixel_ratio;
        let tile_count = (total_height / metrics.viewport_height).ceil().max(1.0) as usize;

        let native_width = metrics.viewport_width * dpr;
        let native_height = total_height * dpr;
        let scale = 1.0_f64
            .min(f64::from(config.max_canvas_width) / native_width)
            .min(f64::from(config.max_canvas_height) / native_height);

        let canvas_width = (native_width * scale).round().max(1.0) as u32;
        let canvas_height = (native_height * scale).round().max(1.0) as u32;
        if u64::from(canvas_width) * u64::from(canvas_height) > config.max_canvas_pixels {
            return Err(CaptureError::PageTooLarge {
                width: canvas_width,
                height: canvas_height,
                max_pixels: config.max_canvas_pixels,
            });
        }

        Ok(Self {
            viewport_height: metrics.viewport_height,
            total_height,
            device_pixel_ratio: dpr,
            tile_count,
            scale,
            canvas_width,
            canvas_height,
        })
    }

    pub fn is_single_shot(&self) -> bool {
        self.tile_count == 1
    }

    /// Scroll offset (CSS px) requested for tile `index`.
    pub fn scroll_offset(&self, index: usize) -> f64 {
        index as f64 * self.viewport_height
    }

    /// Tile height on the canvas, in canvas pixels.
    pub fn tile_height_px(&self) -> f64 {
        self.viewport_height * self.device_pixel_ratio * self.scale
    }

    /// Canvas row at which tile `index` is drawn.
    pub fn tile_y(&self, index: usize) -> u32 {
        (index as f64 * self.tile_height_px()).round() as u32
    }

    /// Convert a CSS length to canvas pixels.
    pub fn css_to_canvas(&self, css: f64) -> u32 {
        (css * self.device_pixel_ratio * self.scale).round().max(0.0) as u32
    }
}

fn validate(metrics: &PageMetrics) -> Result<(), CaptureError> {
    let checks = [
        ("viewport width", metrics.viewport_width),
        ("viewport height", metrics.viewport_height),
        ("device pixel ratio", metrics.device_pixel_ratio),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value <= 0.0 {
            return Err(CaptureError::InvalidMetrics(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }
    if !metrics.total_height.is_finite() || metrics.total_height < 0.0 {
        return Err(CaptureError::InvalidMetrics(format!(
            "document height must be non-negative, got {}",
            metrics.total_height
        )));
    }
    Ok(())
}
