//! Read-only page inspection protocol.
//!
//! Extractors never touch a browser directly. They read the page through
//! [`PageInspector`], which a live browser session or an in-memory
//! snapshot can implement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InspectError;

/// Opaque handle to an element, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub usize);

/// Bounding client rect in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Area in square pixels; negative extents count as empty.
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Resolved (computed) CSS properties of an element, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedStyle(BTreeMap<String, String>);

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property, e.g. `background-color`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// Read a property, treating an empty value as absent.
    pub fn get_non_empty(&self, property: &str) -> Option<&str> {
        self.get(property).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    /// Builder-style setter.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A style rule from a readable stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub selector_text: String,
    /// `(property, value)` pairs in declaration order.
    #[serde(default)]
    pub declarations: Vec<(String, String)>,
}

/// A `<meta>` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTag {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl MetaTag {
    /// `name`, falling back to `property` (Open Graph tags use the latter).
    pub fn key(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.property.as_deref())
            .filter(|k| !k.is_empty())
    }
}

/// Read-only view of a page's DOM and CSSOM.
///
/// Per-element reads are fallible on purpose: a failing element is skipped
/// by callers, it never aborts a scan.
pub trait PageInspector: Send + Sync {
    /// Document URL.
    fn url(&self) -> &str;

    /// Document title.
    fn title(&self) -> &str;

    /// Serialized document markup.
    fn html(&self) -> &str;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, InspectError>;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementRef) -> Option<&str>;

    /// Raw attribute value.
    fn attribute(&self, element: ElementRef, name: &str) -> Option<&str>;

    /// Parent element, if any.
    fn parent(&self, element: ElementRef) -> Option<ElementRef>;

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, element: ElementRef, selector: &str)
        -> Result<Option<ElementRef>, InspectError>;

    /// Computed style of the element.
    fn computed_style(&self, element: ElementRef) -> Result<ComputedStyle, InspectError>;

    /// Bounding client rect of the element.
    fn bounding_rect(&self, element: ElementRef) -> Result<Rect, InspectError>;

    /// Rules of every stylesheet, one entry per sheet. Cross-origin sheets
    /// yield [`InspectError::CrossOrigin`].
    fn style_sheets(&self) -> Vec<Result<Vec<StyleRule>, InspectError>>;

    /// `src` of every external script.
    fn scripts(&self) -> Vec<String>;

    /// `href` of every linked stylesheet.
    fn stylesheet_urls(&self) -> Vec<String>;

    /// All meta tags.
    fn meta_tags(&self) -> Vec<MetaTag>;

    /// Well-known framework globals present on `window`.
    fn globals(&self) -> Vec<String> {
        Vec::new()
    }

    /// `class` attribute, empty when absent.
    fn class_name(&self, element: ElementRef) -> &str {
        self.attribute(element, "class").unwrap_or("")
    }

    /// `id` attribute, empty when absent.
    fn element_id(&self, element: ElementRef) -> &str {
        self.attribute(element, "id").unwrap_or("")
    }
}
