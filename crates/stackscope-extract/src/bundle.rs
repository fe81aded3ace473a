//! Page signal bundle assembly.

use stackscope_config::ExtractionConfig;
use stackscope_protocols::{PageInspector, PageSignalBundle};
use tracing::info;

use crate::buttons::{BUTTON_SELECTOR, ButtonExtractor};
use crate::colors::{ColorExtractor, PRIMARY_UI_SELECTOR, SECONDARY_UI_SELECTOR};
use crate::css_vars::extract_css_variables;
use crate::fonts::{CODE_SELECTOR, FontExtractor, HEADING_SELECTOR};
use crate::signals::{collect_meta_tags, detect_tech_signals, truncate_html};

/// Every element some extractor scans without a cap: headings, code
/// blocks, button candidates and primary or secondary UI. A snapshot that
/// caps its element count must still keep all of these.
pub fn fully_scanned_selector() -> String {
    [
        HEADING_SELECTOR,
        CODE_SELECTOR,
        BUTTON_SELECTOR,
        PRIMARY_UI_SELECTOR,
        SECONDARY_UI_SELECTOR,
    ]
    .join(", ")
}

/// Runs every extractor over a page and assembles the bundle.
pub struct PageSignalExtractor {
    colors: ColorExtractor,
    fonts: FontExtractor,
    buttons: ButtonExtractor,
    html_max_chars: usize,
}

impl PageSignalExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            colors: ColorExtractor::new(config.colors),
            fonts: FontExtractor::new(config.fonts),
            buttons: ButtonExtractor::new(config.buttons),
            html_max_chars: config.html_max_chars,
        }
    }

    /// Extract all signals. Never fails: unreadable parts come back empty.
    /// The screenshot is left unset.
    pub fn extract(&self, page: &dyn PageInspector) -> PageSignalBundle {
        let scripts = page.scripts();
        let stylesheets = page.stylesheet_urls();
        let meta_tags = collect_meta_tags(&page.meta_tags());
        let tech_signals = detect_tech_signals(page, &scripts, &stylesheets, &meta_tags);

        let bundle = PageSignalBundle {
            url: page.url().to_string(),
            title: page.title().to_string(),
            html: truncate_html(page.html(), self.html_max_chars),
            scripts,
            stylesheets,
            meta_tags,
            tech_signals,
            extracted_colors: self.colors.extract(page),
            extracted_fonts: self.fonts.extract(page),
            extracted_buttons: self.buttons.extract(page),
            css_variables: extract_css_variables(page),
            screenshot: None,
        };

        info!(
            url = %bundle.url,
            colors = bundle.extracted_colors.len(),
            fonts = bundle.extracted_fonts.len(),
            buttons = bundle.extracted_buttons.len(),
            css_variables = bundle.css_variables.len(),
            "Extracted page signals"
        );
        bundle
    }
}

impl Default for PageSignalExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
