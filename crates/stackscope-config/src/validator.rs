//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{CaptureConfig, Config};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a `ConfigError`, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_provider(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_capture(config, &mut result);
        Self::validate_extraction(config, &mut result);

        Ok(result)
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if provider.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.api_key",
                "API key is not set, analysis will fail until OPENROUTER_API_KEY is provided",
            ));
        }

        if !is_http_url(&provider.base_url) {
            result.add_error(ValidationError::new(
                "provider.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if provider.model.trim().is_empty() {
            result.add_error(ValidationError::new("provider.model", "Model cannot be empty"));
        }

        if provider.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "provider.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.browser.endpoint) {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if config.browser.max_snapshot_elements == 0 {
            result.add_error(ValidationError::new(
                "browser.max_snapshot_elements",
                "max_snapshot_elements must be greater than 0",
            ));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        let capture = &config.capture;

        if capture.jpeg_quality == 0 || capture.jpeg_quality > 100 {
            result.add_error(ValidationError::new(
                "capture.jpeg_quality",
                "jpeg_quality must be between 1 and 100",
            ));
        }

        if capture.capture_retries == 0 {
            result.add_error(ValidationError::new(
                "capture.capture_retries",
                "capture_retries must be at least 1",
            ));
        }

        if capture.max_canvas_width == 0 || capture.max_canvas_height == 0 {
            result.add_error(ValidationError::new(
                "capture.max_canvas_width",
                "canvas dimensions must be greater than 0",
            ));
        }

        if capture.max_canvas_pixels == 0 {
            result.add_error(ValidationError::new(
                "capture.max_canvas_pixels",
                "max_canvas_pixels must be greater than 0",
            ));
        }

        // Only user-set limits are checked.
        let defaults = CaptureConfig::default();
        let canvas_overridden = (capture.max_canvas_width, capture.max_canvas_height, capture.max_canvas_pixels)
            != (defaults.max_canvas_width, defaults.max_canvas_height, defaults.max_canvas_pixels);
        let canvas_area = u64::from(capture.max_canvas_width) * u64::from(capture.max_canvas_height);
        if canvas_overridden && canvas_area > capture.max_canvas_pixels {
            result.add_warning(ValidationWarning::new(
                "capture.max_canvas_pixels",
                format!(
                    "max canvas {}x{} exceeds the pixel ceiling {}, very tall pages will be rejected",
                    capture.max_canvas_width, capture.max_canvas_height, capture.max_canvas_pixels
                ),
            ));
        }

        if capture.rate_limit_delay_ms < 500 && capture.enabled {
            result.add_warning(ValidationWarning::new(
                "capture.rate_limit_delay_ms",
                "rate_limit_delay_ms below 500 may trip the browser's screenshot rate limit",
            ));
        }
    }

    fn validate_extraction(config: &Config, result: &mut ValidationResult) {
        let extraction = &config.extraction;

        if extraction.colors.max_colors == 0 {
            result.add_error(ValidationError::new(
                "extraction.colors.max_colors",
                "max_colors must be greater than 0",
            ));
        }

        if extraction.colors.min_delta_e < 0.0 {
            result.add_error(ValidationError::new(
                "extraction.colors.min_delta_e",
                "min_delta_e cannot be negative",
            ));
        }

        if extraction.fonts.max_fonts == 0 {
            result.add_error(ValidationError::new(
                "extraction.fonts.max_fonts",
                "max_fonts must be greater than 0",
            ));
        }

        if extraction.buttons.max_buttons == 0 {
            result.add_error(ValidationError::new(
                "extraction.buttons.max_buttons",
                "max_buttons must be greater than 0",
            ));
        }

        if extraction.buttons.min_contrast < 1.0 {
            result.add_warning(ValidationWarning::new(
                "extraction.buttons.min_contrast",
                "min_contrast below 1.0 accepts every button",
            ));
        }

        if extraction.html_max_chars == 0 {
            result.add_warning(ValidationWarning::new(
                "extraction.html_max_chars",
                "html_max_chars is 0, page markup will not be sent to the model",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
