//! Chat provider trait definition.

use async_trait::async_trait;

use super::ChatRequest;
use crate::error::ProviderError;

/// Core trait for hosted chat-completion endpoints.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Run one completion and return the assistant's text.
    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError>;
}
