//! OpenRouter provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use stackscope_config::ProviderConfig;
use stackscope_protocols::{ChatProvider, ChatRequest, ProviderError};
use tracing::{debug, warn};

use crate::api::{ApiErrorBody, ApiRequest, ApiResponse};
use crate::converter::convert_messages;

const APP_TITLE: &str = "stackscope";

/// Chat completions over OpenRouter.
pub struct OpenRouterProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Build a provider from configuration. The API key is resolved on
    /// every call, so a key exported after start-up is picked up.
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { config, client }
    }

    /// Provider with an explicit key and endpoint (any OpenAI-compatible API).
    pub fn with_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self::new(ProviderConfig {
            api_key: Some(api_key.into()),
            base_url: api_url.into(),
            ..Default::default()
        })
    }

    fn build_request(&self, request: &ChatRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: convert_messages(&request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .header("X-Title", APP_TITLE)
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, ApiErrorBody::message_of(&text)));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn id(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .resolved_api_key()
            .ok_or(ProviderError::MissingApiKey)?;

        let api_request = self.build_request(&request);
        debug!(
            model = %api_request.model,
            messages = api_request.messages.len(),
            image = request.has_image(),
            "Sending chat completion"
        );

        let response = self.send_request(&api_key, &api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &api_response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyCompletion(request.model))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
