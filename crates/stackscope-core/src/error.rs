//! Analysis errors.

use stackscope_protocols::ProviderError;
use thiserror::Error;

/// Failure of a whole analysis run.
///
/// Capture and categorization degrade instead of failing; only the
/// explanation request can fail a run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Analysis request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model returned an empty analysis")]
    EmptyAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_preserved() {
        let err: AnalyzeError = ProviderError::InsufficientCredit.into();
        assert!(err.to_string().contains("Insufficient credits"));
    }
}
