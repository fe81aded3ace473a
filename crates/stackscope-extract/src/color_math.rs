//! Color parsing, contrast and perceptual distance.

use std::sync::LazyLock;

use palette::{FromColor, Lab, Srgb};
use regex::Regex;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*([\d.]+)\s*[,\s]\s*([\d.]+)\s*[,\s]\s*([\d.]+)\s*(?:[,/]\s*([\d.]+%?)\s*)?\)$",
    )
    .expect("rgb() pattern is valid")
});

/// Near-white and near-black values that never count as brand colors.
const BORING_COLORS: &[&str] = &[
    "#FFFFFF", "#000000", "#FEFEFE", "#FDFDFD", "#FCFCFC", "#FBFBFB", "#FAFAFA", "#F9F9F9",
    "#F8F8F8", "#010101", "#020202", "#030303",
];

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A parsed `rgb()`/`rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub rgb: Rgb,
    /// In `[0, 1]`.
    pub alpha: f64,
}

impl CssColor {
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 3, 6 or 8 digit hex color, with or without `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let normalized = normalize_hex(hex)?;
        let value = u32::from_str_radix(&normalized[1..], 16).ok()?;
        Some(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Difference between the largest and smallest channel.
    pub fn spread(self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        max - min
    }

    /// WCAG 2.x relative luminance.
    pub fn relative_luminance(self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// CIE L*a*b* under D65, `None` if the conversion is not finite.
    pub fn to_lab(self) -> Option<(f64, f64, f64)> {
        let srgb = Srgb::new(self.r, self.g, self.b).into_format::<f32>();
        let lab: Lab = Lab::from_color(srgb);
        let (l, a, b) = (f64::from(lab.l), f64::from(lab.a), f64::from(lab.b));
        (l.is_finite() && a.is_finite() && b.is_finite()).then_some((l, a, b))
    }
}

/// Parse a computed `rgb()`/`rgba()` value. Other notations are not
/// supported and yield `None`.
pub fn parse_css_color(css: &str) -> Option<CssColor> {
    let caps = RGB_FUNCTION.captures(css.trim())?;
    let channel = |i: usize| -> Option<u8> {
        let value: f64 = caps.get(i)?.as_str().parse().ok()?;
        Some(value.round().clamp(0.0, 255.0) as u8)
    };
    let rgb = Rgb::new(channel(1)?, channel(2)?, channel(3)?);

    let alpha = match caps.get(4).map(|m| m.as_str()) {
        None => 1.0,
        Some(raw) => match raw.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => raw.parse::<f64>().ok()?,
        },
    };

    Some(CssColor {
        rgb,
        alpha: alpha.clamp(0.0, 1.0),
    })
}

/// Convert a computed `rgb()`/`rgba()` value to `#RRGGBB`. Fully
/// transparent colors yield `None`.
pub fn rgb_to_hex(css: &str) -> Option<String> {
    parse_css_color(css)
        .filter(|c| !c.is_transparent())
        .map(|c| c.rgb.to_hex())
}

/// Normalize a 3, 6 or 8 digit hex color to uppercase `#RRGGBB`.
/// Three digits are expanded, an alpha suffix is dropped.
pub fn normalize_hex(input: &str) -> Option<String> {
    let digits = input.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let six = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        8 => digits[..6].to_string(),
        _ => return None,
    };
    Some(format!("#{}", six.to_ascii_uppercase()))
}

/// Whether a color could plausibly be a brand or theme color.
pub fn is_interesting_color(hex: &str) -> bool {
    let Some(rgb) = Rgb::from_hex(hex) else {
        return false;
    };
    if BORING_COLORS.contains(&rgb.to_hex().as_str()) {
        return false;
    }
    let channels = [rgb.r, rgb.g, rgb.b];
    let near_white = channels.iter().all(|c| *c > 240);
    let near_black = channels.iter().all(|c| *c < 20);
    !(rgb.spread() < 15 && (near_white || near_black))
}

/// Channel spread above 30.
pub fn is_colorful(hex: &str) -> bool {
    Rgb::from_hex(hex).is_some_and(|rgb| rgb.spread() > 30)
}

pub fn relative_luminance(hex: &str) -> Option<f64> {
    Rgb::from_hex(hex).map(Rgb::relative_luminance)
}

/// WCAG contrast ratio in `[1, 21]`.
pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    let la = relative_luminance(a)?;
    let lb = relative_luminance(b)?;
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    Some((lighter + 0.05) / (darker + 0.05))
}

/// Outcome of a perceptual comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorDistance {
    /// CIE76 distance in L*a*b*.
    DeltaE(f64),
    /// LAB was unavailable; channel comparison decided.
    RgbFallback { similar: bool },
}

/// CIE76 ΔE between two hex colors, falling back to a per-channel
/// comparison when LAB conversion fails.
pub fn perceptual_distance(a: &str, b: &str, rgb_fallback_delta: u8) -> ColorDistance {
    let (Some(ca), Some(cb)) = (Rgb::from_hex(a), Rgb::from_hex(b)) else {
        return ColorDistance::RgbFallback { similar: false };
    };
    match (ca.to_lab(), cb.to_lab()) {
        (Some((l1, a1, b1)), Some((l2, a2, b2))) => {
            let delta = ((l1 - l2).powi(2) + (a1 - a2).powi(2) + (b1 - b2).powi(2)).sqrt();
            ColorDistance::DeltaE(delta)
        }
        _ => ColorDistance::RgbFallback {
            similar: rgb_similar(ca, cb, rgb_fallback_delta),
        },
    }
}

/// Similar when every channel differs by less than `threshold`.
pub fn rgb_similar(a: Rgb, b: Rgb, threshold: u8) -> bool {
    a.r.abs_diff(b.r) < threshold && a.g.abs_diff(b.g) < threshold && a.b.abs_diff(b.b) < threshold
}

/// Whether two colors are far enough apart to both stay in a palette.
pub fn is_perceptually_distinct(a: &str, b: &str, min_delta_e: f64, rgb_fallback_delta: u8) -> bool {
    match perceptual_distance(a, b, rgb_fallback_delta) {
        ColorDistance::DeltaE(delta) => delta >= min_delta_e,
        ColorDistance::RgbFallback { similar } => !similar,
    }
}

#[cfg(test)]
#[path = "color_math_tests.rs"]
mod tests;
