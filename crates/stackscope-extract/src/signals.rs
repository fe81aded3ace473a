//! Document-level signals: scripts, stylesheets, meta tags and the
//! framework fingerprint.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use stackscope_protocols::{MetaTag, PageInspector, TechSignals};

/// Tailwind utility classes such as `bg-blue-500`, `px-4`, `text-gray-900`.
static TAILWIND_UTILITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:bg|text|border|from|to|ring)-(?:[a-z]+)-\d{2,3}\b|\b(?:px|py|mx|my|mt|mb|pt|pb|gap)-\d+\b")
        .expect("tailwind pattern is valid")
});

/// Utility matches needed before the markup counts as Tailwind.
const TAILWIND_MIN_UTILITIES: usize = 5;

/// Fingerprint of one technology. Any marker matching is a detection.
struct TechFingerprint {
    globals: &'static [&'static str],
    /// Lowercase substrings of script or stylesheet URLs.
    assets: &'static [&'static str],
    /// Substrings of the document markup.
    markup: &'static [&'static str],
}

const REACT: TechFingerprint = TechFingerprint {
    globals: &["React", "__REACT_DEVTOOLS_GLOBAL_HOOK__"],
    assets: &["react.", "react-dom", "react.production"],
    markup: &["data-reactroot", "data-reactid"],
};

const VUE: TechFingerprint = TechFingerprint {
    globals: &["Vue", "__VUE__"],
    assets: &["vue.js", "vue.min.js", "vue.global", "vue.runtime"],
    markup: &["data-v-app", "data-server-rendered"],
};

const ANGULAR: TechFingerprint = TechFingerprint {
    globals: &["angular", "ng", "getAllAngularRootElements"],
    assets: &["angular"],
    markup: &["ng-version", "ng-app", "_nghost-", "_ngcontent-"],
};

const NEXT_JS: TechFingerprint = TechFingerprint {
    globals: &["__NEXT_DATA__", "next"],
    assets: &["/_next/"],
    markup: &["id=\"__next\"", "__NEXT_DATA__"],
};

const NUXT: TechFingerprint = TechFingerprint {
    globals: &["__NUXT__", "$nuxt"],
    assets: &["/_nuxt/"],
    markup: &["id=\"__nuxt\"", "__NUXT__"],
};

const SVELTE: TechFingerprint = TechFingerprint {
    globals: &["__svelte"],
    assets: &["svelte", "/_app/immutable/"],
    markup: &["class=\"svelte-", " svelte-"],
};

const JQUERY: TechFingerprint = TechFingerprint {
    globals: &["jQuery"],
    assets: &["jquery"],
    markup: &[],
};

const TAILWIND: TechFingerprint = TechFingerprint {
    globals: &["tailwind"],
    assets: &["tailwind"],
    markup: &[],
};

const BOOTSTRAP: TechFingerprint = TechFingerprint {
    globals: &["bootstrap"],
    assets: &["bootstrap"],
    markup: &["data-bs-toggle", "data-toggle=\"collapse\""],
};

const WORDPRESS: TechFingerprint = TechFingerprint {
    globals: &["wp"],
    assets: &["wp-content", "wp-includes"],
    markup: &["wp-content", "wp-includes"],
};

const FINGERPRINTS: [&TechFingerprint; 10] = [
    &REACT, &VUE, &ANGULAR, &NEXT_JS, &NUXT, &SVELTE, &JQUERY, &TAILWIND, &BOOTSTRAP, &WORDPRESS,
];

/// Window globals the detector looks for, deduplicated.
pub fn probed_globals() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FINGERPRINTS
        .iter()
        .flat_map(|f| f.globals.iter().copied())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

struct Evidence<'a> {
    globals: &'a [String],
    assets: Vec<String>,
    html: &'a str,
}

impl Evidence<'_> {
    fn matches(&self, fingerprint: &TechFingerprint) -> bool {
        fingerprint
            .globals
            .iter()
            .any(|g| self.globals.iter().any(|present| present == g))
            || fingerprint
                .assets
                .iter()
                .any(|marker| self.assets.iter().any(|url| url.contains(marker)))
            || fingerprint.markup.iter().any(|marker| self.html.contains(marker))
    }
}

/// Detect well-known frameworks and libraries.
pub fn detect_tech_signals(
    page: &dyn PageInspector,
    scripts: &[String],
    stylesheets: &[String],
    meta_tags: &BTreeMap<String, String>,
) -> TechSignals {
    let globals = page.globals();
    let evidence = Evidence {
        globals: &globals,
        assets: scripts
            .iter()
            .chain(stylesheets)
            .map(|url| url.to_lowercase())
            .collect(),
        html: page.html(),
    };
    let generator = meta_tags
        .get("generator")
        .map(|g| g.to_lowercase())
        .unwrap_or_default();

    let has_next_js = evidence.matches(&NEXT_JS) || generator.contains("next.js");
    let has_nuxt = evidence.matches(&NUXT) || generator.contains("nuxt");

    TechSignals {
        // Next.js implies React, Nuxt implies Vue.
        has_react: evidence.matches(&REACT) || has_next_js,
        has_vue: evidence.matches(&VUE) || has_nuxt,
        has_angular: evidence.matches(&ANGULAR),
        has_next_js,
        has_nuxt,
        has_svelte: evidence.matches(&SVELTE),
        has_jquery: evidence.matches(&JQUERY),
        has_tailwind: evidence.matches(&TAILWIND)
            || TAILWIND_UTILITY.find_iter(evidence.html).count() >= TAILWIND_MIN_UTILITIES,
        has_bootstrap: evidence.matches(&BOOTSTRAP),
        has_wordpress: evidence.matches(&WORDPRESS) || generator.contains("wordpress"),
    }
}

/// Meta tags as `name|property → content`; the first occurrence wins.
pub fn collect_meta_tags(tags: &[MetaTag]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for tag in tags {
        if let Some(key) = tag.key() {
            map.entry(key.to_string())
                .or_insert_with(|| tag.content.clone());
        }
    }
    map
}

/// Truncate to at most `max_chars` characters, on a character boundary.
pub fn truncate_html(html: &str, max_chars: usize) -> String {
    match html.char_indices().nth(max_chars) {
        Some((end, _)) => html[..end].to_string(),
        None => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::DomSnapshot;

    fn detect(doc: &DomSnapshot) -> TechSignals {
        let meta = collect_meta_tags(&doc.meta_tags);
        detect_tech_signals(doc, &doc.scripts, &doc.stylesheets, &meta)
    }

    #[test]
    fn test_plain_page_detects_nothing() {
        let doc = DomSnapshot::new("https://example.com/", "");
        assert_eq!(detect(&doc), TechSignals::default());
    }

    #[test]
    fn test_next_js_implies_react() {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        doc.scripts.push("https://example.com/_next/static/chunks/main.js".to_string());
        let signals = detect(&doc);
        assert!(signals.has_next_js);
        assert!(signals.has_react);
        assert!(!signals.has_vue);
    }

    #[test]
    fn test_globals_and_markup() {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        doc.globals = vec!["jQuery".to_string(), "__NUXT__".to_string()];
        doc.html = "<div ng-version=\"17.0.0\"></div>".to_string();
        let signals = detect(&doc);
        assert!(signals.has_jquery);
        assert!(signals.has_nuxt);
        assert!(signals.has_vue);
        assert!(signals.has_angular);
        assert!(!signals.has_react);
    }

    #[test]
    fn test_wordpress_generator() {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        doc.meta_tags.push(MetaTag {
            name: Some("generator".to_string()),
            property: None,
            content: "WordPress 6.4.2".to_string(),
        });
        assert!(detect(&doc).has_wordpress);
    }

    #[test]
    fn test_tailwind_from_utilities() {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        doc.html = r#"<div class="px-4 py-2 bg-blue-500 text-white"><p class="mt-2 text-gray-900">Hi</p></div>"#
            .to_string();
        assert!(detect(&doc).has_tailwind);

        doc.html = r#"<div class="px-4">Hi</div>"#.to_string();
        assert!(!detect(&doc).has_tailwind);
    }

    #[test]
    fn test_bootstrap_stylesheet() {
        let mut doc = DomSnapshot::new("https://example.com/", "");
        doc.stylesheets
            .push("https://cdn.jsdelivr.net/npm/Bootstrap@5.3.0/dist/css/bootstrap.min.css".to_string());
        assert!(detect(&doc).has_bootstrap);
    }

    #[test]
    fn test_collect_meta_tags() {
        let tags = vec![
            MetaTag {
                name: Some("description".to_string()),
                property: None,
                content: "First".to_string(),
            },
            MetaTag {
                name: Some("description".to_string()),
                property: None,
                content: "Second".to_string(),
            },
            MetaTag {
                name: None,
                property: Some("og:title".to_string()),
                content: "Example".to_string(),
            },
            MetaTag::default(),
        ];
        let map = collect_meta_tags(&tags);
        assert_eq!(map.len(), 2);
        assert_eq!(map["description"], "First");
        assert_eq!(map["og:title"], "Example");
    }

    #[test]
    fn test_probed_globals() {
        let names = probed_globals();
        assert!(names.contains(&"__NEXT_DATA__"));
        assert!(names.contains(&"jQuery"));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_truncate_html() {
        assert_eq!(truncate_html("<p>hello</p>", 3), "<p>");
        assert_eq!(truncate_html("short", 50), "short");
        assert_eq!(truncate_html("héllo", 2), "hé");
        assert_eq!(truncate_html("", 0), "");
    }
}
