//! In-memory DOM snapshot.
//!
//! A [`DomSnapshot`] is a serialized copy of everything the extractors read
//! from a page: elements in document order with their computed styles and
//! layout, readable stylesheet rules, scripts, stylesheets and meta tags.
//! The browser extension produces one with a single script evaluation;
//! tests build one by hand.

mod selector;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stackscope_protocols::{
    ComputedStyle, ElementRef, InspectError, MetaTag, PageInspector, Rect, StyleRule,
};

pub use selector::SelectorList;

/// One element of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Lowercase tag name.
    pub tag: String,

    /// Index of the parent element; always lower than the element's own.
    #[serde(default)]
    pub parent: Option<usize>,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// `None` when the style could not be read.
    #[serde(default)]
    pub style: Option<ComputedStyle>,

    /// `None` when layout could not be measured.
    #[serde(default)]
    pub rect: Option<Rect>,
}

impl SnapshotElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn child_of(mut self, parent: ElementRef) -> Self {
        self.parent = Some(parent.0);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Set one computed style property.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(ComputedStyle::new)
            .set(property, value);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(0.0, 0.0, width, height));
        self
    }
}

/// One stylesheet. `rules` is `None` when the sheet is cross-origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStyleSheet {
    #[serde(default)]
    pub href: Option<String>,

    #[serde(default)]
    pub rules: Option<Vec<StyleRule>>,
}

/// Snapshot of a page's DOM and CSSOM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub html: String,

    #[serde(default)]
    pub elements: Vec<SnapshotElement>,

    #[serde(default)]
    pub style_sheets: Vec<SnapshotStyleSheet>,

    #[serde(default)]
    pub scripts: Vec<String>,

    #[serde(default)]
    pub stylesheets: Vec<String>,

    #[serde(default)]
    pub meta_tags: Vec<MetaTag>,

    #[serde(default)]
    pub globals: Vec<String>,

    /// Elements left out of `elements` by the element cap. Matches of
    /// [`fully_scanned_selector`](crate::fully_scanned_selector) are never
    /// left out.
    #[serde(default)]
    pub skipped_elements: usize,
}

impl DomSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Parse the JSON produced by the snapshot script.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Append an element and return its handle.
    pub fn push(&mut self, element: SnapshotElement) -> ElementRef {
        self.elements.push(element);
        ElementRef(self.elements.len() - 1)
    }

    /// Append a readable stylesheet.
    pub fn push_sheet(&mut self, href: Option<&str>, rules: Vec<StyleRule>) {
        self.style_sheets.push(SnapshotStyleSheet {
            href: href.map(str::to_string),
            rules: Some(rules),
        });
    }

    /// Append a cross-origin stylesheet whose rules cannot be read.
    pub fn push_cross_origin_sheet(&mut self, href: &str) {
        self.style_sheets.push(SnapshotStyleSheet {
            href: Some(href.to_string()),
            rules: None,
        });
        self.stylesheets.push(href.to_string());
    }

    fn element(&self, element: ElementRef) -> Result<&SnapshotElement, InspectError> {
        self.elements
            .get(element.0)
            .ok_or(InspectError::ElementNotFound(element.0))
    }
}

impl PageInspector for DomSnapshot {
    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn html(&self) -> &str {
        &self.html
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, InspectError> {
        let list = SelectorList::parse(selector)?;
        Ok((0..self.elements.len())
            .filter(|i| list.matches(&self.elements, *i))
            .map(ElementRef)
            .collect())
    }

    fn tag_name(&self, element: ElementRef) -> Option<&str> {
        self.elements.get(element.0).map(|e| e.tag.as_str())
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<&str> {
        self.elements
            .get(element.0)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    fn parent(&self, element: ElementRef) -> Option<ElementRef> {
        selector::parent_of(&self.elements, element.0).map(ElementRef)
    }

    fn closest(
        &self,
        element: ElementRef,
        selector: &str,
    ) -> Result<Option<ElementRef>, InspectError> {
        let list = SelectorList::parse(selector)?;
        self.element(element)?;
        let mut current = Some(element.0);
        while let Some(index) = current {
            if list.matches(&self.elements, index) {
                return Ok(Some(ElementRef(index)));
            }
            current = selector::parent_of(&self.elements, index);
        }
        Ok(None)
    }

    fn computed_style(&self, element: ElementRef) -> Result<ComputedStyle, InspectError> {
        self.element(element)?
            .style
            .clone()
            .ok_or(InspectError::StyleUnavailable(element.0))
    }

    fn bounding_rect(&self, element: ElementRef) -> Result<Rect, InspectError> {
        self.element(element)?
            .rect
            .ok_or(InspectError::LayoutUnavailable(element.0))
    }

    fn style_sheets(&self) -> Vec<Result<Vec<StyleRule>, InspectError>> {
        self.style_sheets
            .iter()
            .map(|sheet| {
                sheet.rules.clone().ok_or_else(|| {
                    InspectError::CrossOrigin(
                        sheet.href.clone().unwrap_or_else(|| "<inline>".to_string()),
                    )
                })
            })
            .collect()
    }

    fn scripts(&self) -> Vec<String> {
        self.scripts.clone()
    }

    fn stylesheet_urls(&self) -> Vec<String> {
        self.stylesheets.clone()
    }

    fn meta_tags(&self) -> Vec<MetaTag> {
        self.meta_tags.clone()
    }

    fn globals(&self) -> Vec<String> {
        self.globals.clone()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
