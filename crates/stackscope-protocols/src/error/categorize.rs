//! Palette categorization errors.

use thiserror::Error;

use super::ProviderError;

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("No JSON object found in model reply")]
    NoJsonFound,

    #[error("Invalid JSON in model reply: {0}")]
    InvalidJson(String),

    #[error("Model reply did not assign any color role")]
    NoRolesAssigned,

    #[error("Nothing to categorize: palette is empty")]
    EmptyPalette,

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_json_found_message() {
        assert!(CategorizeError::NoJsonFound.to_string().contains("No JSON"));
    }

    #[test]
    fn test_from_provider_error() {
        let err: CategorizeError = ProviderError::RateLimited.into();
        assert!(matches!(err, CategorizeError::Provider(ProviderError::RateLimited)));
        assert!(err.to_string().contains("Rate limited"));
    }
}
