//! Browser connection and screenshot capture configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Browser (Chrome DevTools Protocol) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// CDP HTTP endpoint of a Chrome started with `--remote-debugging-port`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_seconds: u64,

    /// Upper bound on elements serialized into one DOM snapshot.
    #[serde(default = "default_max_snapshot_elements")]
    pub max_snapshot_elements: usize,

    /// Extra wait after load before extraction starts.
    #[serde(default = "default_settle_after_load")]
    pub settle_after_load_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            navigation_timeout_seconds: default_navigation_timeout(),
            max_snapshot_elements: default_max_snapshot_elements(),
            settle_after_load_ms: default_settle_after_load(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_navigation_timeout() -> u64 {
    30
}

fn default_max_snapshot_elements() -> usize {
    5000
}

fn default_settle_after_load() -> u64 {
    500
}

/// Full-page screenshot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Wait after each scroll so lazy content and animations settle.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Wait after each capture; the host rate-limits screenshots.
    #[serde(default = "default_rate_limit_delay")]
    pub rate_limit_delay_ms: u64,

    /// Document height (CSS px) beyond which the page is not captured.
    #[serde(default = "default_max_capture_height")]
    pub max_capture_height: u32,

    #[serde(default = "default_max_canvas_width")]
    pub max_canvas_width: u32,

    #[serde(default = "default_max_canvas_height")]
    pub max_canvas_height: u32,

    /// Hard ceiling on stitched canvas pixels.
    #[serde(default = "default_max_canvas_pixels")]
    pub max_canvas_pixels: u64,

    /// Attempts per viewport capture.
    #[serde(default = "default_capture_retries")]
    pub capture_retries: u32,

    /// Base backoff between capture attempts; grows linearly per attempt.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_delay_ms: default_settle_delay(),
            rate_limit_delay_ms: default_rate_limit_delay(),
            max_capture_height: default_max_capture_height(),
            max_canvas_width: default_max_canvas_width(),
            max_canvas_height: default_max_canvas_height(),
            max_canvas_pixels: default_max_canvas_pixels(),
            capture_retries: default_capture_retries(),
            retry_backoff_ms: default_retry_backoff(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_settle_delay() -> u64 {
    400
}

fn default_rate_limit_delay() -> u64 {
    600
}

fn default_max_capture_height() -> u32 {
    20_000
}

fn default_max_canvas_width() -> u32 {
    2560
}

fn default_max_canvas_height() -> u32 {
    16_384
}

fn default_max_canvas_pixels() -> u64 {
    33_554_432
}

fn default_capture_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    250
}

fn default_jpeg_quality() -> u8 {
    70
}
