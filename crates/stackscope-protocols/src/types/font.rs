//! Font usage types.

use serde::{Deserialize, Serialize};

/// Where a font family is used. Declaration order is output priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontUsage {
    Heading,
    Code,
    Body,
    Other,
}

impl FontUsage {
    /// Sort rank; lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            FontUsage::Heading => 0,
            FontUsage::Code => 1,
            FontUsage::Body => 2,
            FontUsage::Other => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontUsage::Heading => "heading",
            FontUsage::Code => "code",
            FontUsage::Body => "body",
            FontUsage::Other => "other",
        }
    }
}

/// A font family with its resolved usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFont {
    pub family: String,
    pub usage: FontUsage,
}
