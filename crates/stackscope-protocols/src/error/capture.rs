//! Screenshot capture errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The page (or the channel to it) could not be reached.
    #[error("Could not connect to page. Please refresh the page and try again. ({0})")]
    PageUnreachable(String),

    #[error("Capture of tile {tile} failed after {attempts} attempts")]
    TileFailed { tile: usize, attempts: u32 },

    #[error("Page too large to capture: {width}x{height} exceeds {max_pixels} pixels")]
    PageTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("Invalid page metrics: {0}")]
    InvalidMetrics(String),

    #[error("Image processing failed: {0}")]
    Image(String),

    #[error("Capture was cancelled")]
    Cancelled,

    #[error("Capture device error: {0}")]
    Device(String),
}

impl CaptureError {
    /// Whether the error came from an explicit cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CaptureError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_unreachable_message() {
        let err = CaptureError::PageUnreachable("session closed".to_string());
        let display = err.to_string();
        assert!(display.contains("Could not connect to page"));
        assert!(display.contains("refresh"));
    }

    #[test]
    fn test_page_too_large_message() {
        let err = CaptureError::PageTooLarge {
            width: 2560,
            height: 16384,
            max_pixels: 33_554_432,
        };
        let display = err.to_string();
        assert!(display.contains("too large"));
        assert!(display.contains("2560x16384"));
    }

    #[test]
    fn test_tile_failed_message() {
        let err = CaptureError::TileFailed { tile: 3, attempts: 3 };
        assert!(err.to_string().contains("tile 3"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(CaptureError::Cancelled.is_cancelled());
        assert!(!CaptureError::InvalidMetrics("nan".to_string()).is_cancelled());
    }
}
