//! Palette categorization over a chat provider.

use std::collections::BTreeMap;
use std::sync::Arc;

use stackscope_protocols::{CategorizeError, CategorizedPalette, ChatMessage, ChatProvider, ChatRequest};
use tracing::debug;

use crate::prompt::{text_prompt, vision_prompt};
use crate::reply::parse_palette;

const CATEGORIZE_TEMPERATURE: f32 = 0.2;
const CATEGORIZE_MAX_TOKENS: u32 = 500;

/// Which prompt a categorization used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorizeMode {
    Vision,
    Text,
}

/// Assigns extracted colors to semantic roles with one model round-trip.
pub struct ColorCategorizer {
    provider: Arc<dyn ChatProvider>,
    model: String,
}

impl ColorCategorizer {
    pub fn new(provider: Arc<dyn ChatProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Categorize `palette` against a screenshot (`data:` URL).
    pub async fn categorize_with_screenshot(
        &self,
        palette: &[String],
        screenshot: &str,
        css_variables: &BTreeMap<String, String>,
    ) -> Result<CategorizedPalette, CategorizeError> {
        ensure_palette(palette)?;
        let prompt = vision_prompt(palette, css_variables);
        self.run(
            CategorizeMode::Vision,
            ChatMessage::user_with_image(prompt, screenshot),
        )
        .await
    }

    /// Categorize `palette` from text alone.
    pub async fn categorize_text(
        &self,
        palette: &[String],
        css_variables: &BTreeMap<String, String>,
    ) -> Result<CategorizedPalette, CategorizeError> {
        ensure_palette(palette)?;
        let prompt = text_prompt(palette, css_variables);
        self.run(CategorizeMode::Text, ChatMessage::user(prompt)).await
    }

    async fn run(
        &self,
        mode: CategorizeMode,
        message: ChatMessage,
    ) -> Result<CategorizedPalette, CategorizeError> {
        let request = ChatRequest::new(self.model.clone(), vec![message])
            .with_temperature(CATEGORIZE_TEMPERATURE)
            .with_max_tokens(CATEGORIZE_MAX_TOKENS);

        let reply = self.provider.complete(request).await?;
        let palette = parse_palette(&reply)?;
        if palette.assigned_roles() == 0 {
            return Err(CategorizeError::NoRolesAssigned);
        }

        debug!(
            provider = self.provider.id(),
            ?mode,
            roles = palette.assigned_roles(),
            system = ?palette.possible_system,
            "Categorized palette"
        );
        Ok(palette)
    }
}

fn ensure_palette(palette: &[String]) -> Result<(), CategorizeError> {
    if palette.is_empty() {
        Err(CategorizeError::EmptyPalette)
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "categorizer_tests.rs"]
mod tests;
