//! Semantic palette types.

use serde::{Deserialize, Serialize};

/// Semantic role a palette color can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Background,
    Foreground,
    Primary,
    Secondary,
    Accent,
    Muted,
    Border,
    Destructive,
}

impl ColorRole {
    pub const ALL: [ColorRole; 8] = [
        ColorRole::Background,
        ColorRole::Foreground,
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Muted,
        ColorRole::Border,
        ColorRole::Destructive,
    ];

    /// JSON key of the role.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::Foreground => "foreground",
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Muted => "muted",
            ColorRole::Border => "border",
            ColorRole::Destructive => "destructive",
        }
    }
}

/// Design system the palette most likely comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PossibleSystem {
    Tailwind,
    Shadcn,
    Radix,
    Material,
    Custom,
}

impl PossibleSystem {
    /// Exact (case-sensitive) match against the accepted names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tailwind" => Some(PossibleSystem::Tailwind),
            "shadcn" => Some(PossibleSystem::Shadcn),
            "radix" => Some(PossibleSystem::Radix),
            "material" => Some(PossibleSystem::Material),
            "custom" => Some(PossibleSystem::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PossibleSystem::Tailwind => "tailwind",
            PossibleSystem::Shadcn => "shadcn",
            PossibleSystem::Radix => "radix",
            PossibleSystem::Material => "material",
            PossibleSystem::Custom => "custom",
        }
    }
}

/// How the palette categorization was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteConfidence {
    /// Categorized with a screenshot.
    High,
    /// Categorized from extracted colors only.
    Medium,
}

/// Role → color mapping. Absent roles are omitted, never guessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedPalette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_system: Option<PossibleSystem>,
}

impl CategorizedPalette {
    pub fn get(&self, role: ColorRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    pub fn set(&mut self, role: ColorRole, hex: String) {
        *self.slot_mut(role) = Some(hex);
    }

    /// Number of roles with a color.
    pub fn assigned_roles(&self) -> usize {
        ColorRole::ALL.iter().filter(|r| self.get(**r).is_some()).count()
    }

    fn slot(&self, role: ColorRole) -> &Option<String> {
        match role {
            ColorRole::Background => &self.background,
            ColorRole::Foreground => &self.foreground,
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Muted => &self.muted,
            ColorRole::Border => &self.border,
            ColorRole::Destructive => &self.destructive,
        }
    }

    fn slot_mut(&mut self, role: ColorRole) -> &mut Option<String> {
        match role {
            ColorRole::Background => &mut self.background,
            ColorRole::Foreground => &mut self.foreground,
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Muted => &mut self.muted,
            ColorRole::Border => &mut self.border,
            ColorRole::Destructive => &mut self.destructive,
        }
    }
}
