//! core::color
//!
//! Color parsing and WCAG 2.1 colorimetry.
//!
//! All functions here are pure. Contrast math runs in sRGB relative
//! luminance space, the space WCAG defines its ratios in:
//!
//! ```text
//! L     = 0.2126 * R_lin + 0.7152 * G_lin + 0.0722 * B_lin
//! ratio = (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! Only `srgb` structured colors can be resolved; other color spaces are
//! accepted by the validator but cannot take part in contrast checks.

use serde::Serialize;
use serde_json::Value;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance of this color.
    pub fn luminance(self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional, case-insensitive).
///
/// # Example
///
/// ```
/// use tokencheck::core::color::{hex_to_rgb, Rgb};
///
/// assert_eq!(hex_to_rgb("#ff8000"), Some(Rgb::new(255, 128, 0)));
/// assert_eq!(hex_to_rgb("FFF"), Some(Rgb::WHITE));
/// assert_eq!(hex_to_rgb("#ff80"), None);
/// ```
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        6 => Some(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            // #abc expands to #aabbcc
            let expand = |i: usize| channel(&digits[i..=i].repeat(2));
            Some(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

/// Resolve a token color value to a hex string.
///
/// - `#...` strings pass through unchanged
/// - `{ "colorSpace": "srgb", "components": [r, g, b] }` with components in
///   `[0, 1]` is scaled to 0–255, rounded and hex-encoded
/// - Anything else (references, other color spaces, `rgb()` strings)
///   resolves to `None`
pub fn structured_color_to_hex(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.starts_with('#') => Some(s.clone()),
        Value::Object(obj) => {
            if obj.get("colorSpace").and_then(Value::as_str) != Some("srgb") {
                return None;
            }
            let components = obj.get("components")?.as_array()?;
            if components.len() < 3 {
                return None;
            }
            let mut channels = [0u8; 3];
            for (slot, component) in channels.iter_mut().zip(components) {
                *slot = unit_to_u8(component.as_f64()?);
            }
            Some(Rgb::new(channels[0], channels[1], channels[2]).to_hex())
        }
        _ => None,
    }
}

/// Resolve a token color value straight to RGB.
pub fn resolve_color(value: &Value) -> Option<Rgb> {
    structured_color_to_hex(value).and_then(|hex| hex_to_rgb(&hex))
}

/// sRGB transfer function: gamma-encoded channel in `[0, 1]` to linear light.
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.1 relative luminance of an 8-bit sRGB color, in `[0, 1]`.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let lin = |c: u8| srgb_to_linear(f64::from(c) / 255.0);
    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// WCAG 2.1 contrast ratio, in `[1, 21]`, independent of argument order.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex strings, or `None` if either fails to parse.
///
/// # Example
///
/// ```
/// use tokencheck::core::color::contrast_ratio_hex;
///
/// let ratio = contrast_ratio_hex("#000000", "#ffffff").unwrap();
/// assert!((ratio - 21.0).abs() < 1e-6);
/// ```
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    Some(contrast_ratio(hex_to_rgb(a)?, hex_to_rgb(b)?))
}

fn unit_to_u8(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}
