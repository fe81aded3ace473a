//! Button style types.

use serde::{Deserialize, Serialize};

/// Inferred visual variant of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Outline,
    Ghost,
}

/// A representative button style found on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedButton {
    /// `#RRGGBB`, or `transparent`.
    pub background_color: String,
    pub text_color: String,
    pub border_radius: String,
    pub font_weight: String,
    pub variant: ButtonVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

impl ExtractedButton {
    /// Background value used for buttons without a painted background.
    pub const TRANSPARENT: &'static str = "transparent";

    pub fn is_transparent(&self) -> bool {
        self.background_color == Self::TRANSPARENT
    }

    /// Dedup key: `(background, text, radius, padding, border color)`.
    pub fn signature(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.background_color,
            self.text_color,
            self.border_radius,
            self.padding.as_deref().unwrap_or(""),
            self.border_color.as_deref().unwrap_or(""),
        )
    }
}
