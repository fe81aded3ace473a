//! Page inspection errors.
//!
//! These are per-observation failures: extractors skip the element or rule
//! that produced one and keep scanning.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InspectError {
    #[error("Element not found: {0}")]
    ElementNotFound(usize),

    #[error("Computed style unavailable for element {0}")]
    StyleUnavailable(usize),

    #[error("Layout unavailable for element {0}")]
    LayoutUnavailable(usize),

    #[error("Stylesheet is not readable (cross-origin): {0}")]
    CrossOrigin(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_origin_message() {
        let err = InspectError::CrossOrigin("https://cdn.example.com/app.css".to_string());
        assert!(err.to_string().contains("cross-origin"));
        assert!(err.to_string().contains("cdn.example.com"));
    }

    #[test]
    fn test_style_unavailable_message() {
        let err = InspectError::StyleUnavailable(42);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_invalid_selector_message() {
        let err = InspectError::InvalidSelector("a[".to_string());
        assert!(err.to_string().contains("Invalid selector"));
    }
}
