//! LLM provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No API key configured. Add your OpenRouter API key in the configuration.")]
    MissingApiKey,

    #[error("Invalid API key. Please check your OpenRouter API key.")]
    InvalidApiKey,

    #[error("Rate limited by the LLM provider. Please wait a moment and try again.")]
    RateLimited,

    #[error("Insufficient credits on the LLM provider account.")]
    InsufficientCredit,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Empty completion returned by model {0}")]
    EmptyCompletion(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Map an HTTP failure status to its typed error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ProviderError::InvalidApiKey,
            402 => ProviderError::InsufficientCredit,
            429 => ProviderError::RateLimited,
            _ => ProviderError::ApiError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_invalid_key() {
        let err = ProviderError::from_status(401, "unauthorized".to_string());
        assert!(matches!(err, ProviderError::InvalidApiKey));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[test]
    fn test_from_status_insufficient_credit() {
        let err = ProviderError::from_status(402, String::new());
        assert!(matches!(err, ProviderError::InsufficientCredit));
    }

    #[test]
    fn test_from_status_rate_limited() {
        let err = ProviderError::from_status(429, String::new());
        assert!(matches!(err, ProviderError::RateLimited));
        assert!(err.to_string().contains("Rate limited"));
    }

    #[test]
    fn test_from_status_generic() {
        let err = ProviderError::from_status(500, "Internal Server Error".to_string());
        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_api_key_message() {
        let err = ProviderError::MissingApiKey;
        assert!(err.to_string().contains("No API key"));
    }
}
