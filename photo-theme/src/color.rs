//! Colorimetric utilities.
//!
//! Every color that crosses the crate boundary is a lowercase `#rrggbb` string. The helpers here
//! convert between that form, 8-bit [`Rgb`] triples and floating point [`Hsl`] values, and
//! compute the WCAG relative luminance and contrast ratio used by [`crate::theme`].
//!
//! Hue is kept in degrees (`[0, 360)`) everywhere; saturation and lightness are in `[0, 1]`.

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display};

/// Black, returned for any string that is not a 6-digit hex color.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// An 8-bit sRGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// A color in HSL space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Lightness in `[0, 1]`.
    pub l: f64,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// HSV-style saturation, `(max - min) / max`.
    pub fn saturation(self) -> f64 {
        saturation(self)
    }

    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }

    fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a 6-digit hex color, with or without the leading `#`.
///
/// Digits are case-insensitive. Anything else, including the 3-digit shorthand and 8-digit colors
/// with alpha, parses as [`BLACK`].
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return BLACK;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
    Rgb::new(channel(0), channel(2), channel(4))
}

/// Format a color as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_string()
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let [r, g, b] = rgb.channels().map(|c| f64::from(c) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    // Ties between channels resolve red, then green, then blue.
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s, l)
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if hsl.s == 0.0 {
        let gray = to_byte(hsl.l);
        return Rgb::new(gray, gray, gray);
    }

    let h = hsl.h / 360.0;
    let (s, l) = (hsl.s, hsl.l);
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// HSV-style saturation of a color; `0` for black.
pub fn saturation(rgb: Rgb) -> f64 {
    let max = f64::from(rgb.r.max(rgb.g).max(rgb.b)) / 255.0;
    let min = f64::from(rgb.r.min(rgb.g).min(rgb.b)) / 255.0;
    if max == 0.0 {
        return 0.0;
    }
    (max - min) / max
}

/// Relative luminance with BT.709 coefficients.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let [r, g, b] = rgb.channels().map(|c| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Relative luminance of a hex color.
pub fn luminance(hex: &str) -> f64 {
    relative_luminance(hex_to_rgb(hex))
}

/// WCAG contrast ratio between two hex colors, in `[1, 21]`. Argument order does not matter.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let (la, lb) = (luminance(a), luminance(b));
    let (brightest, darkest) = if la >= lb { (la, lb) } else { (lb, la) };
    (brightest + 0.05) / (darkest + 0.05)
}

/// Shift HSL lightness by `delta`, clamped to `[0, 1]`.
pub fn adjust_brightness(hex: &str, delta: f64) -> String {
    let mut hsl = hex_to_rgb(hex).to_hsl();
    hsl.l = (hsl.l + delta).clamp(0.0, 1.0);
    hsl.to_rgb().to_hex()
}

/// Shift HSL saturation by `delta`, clamped to `[0, 1]`.
pub fn adjust_saturation(hex: &str, delta: f64) -> String {
    let mut hsl = hex_to_rgb(hex).to_hsl();
    hsl.s = (hsl.s + delta).clamp(0.0, 1.0);
    hsl.to_rgb().to_hex()
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(hex_to_rgb("#3b82f6"), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(hex_to_rgb("#3B82F6"), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(hex_to_rgb("1f2937"), Rgb::new(0x1f, 0x29, 0x37));
    }

    #[test]
    fn test_malformed_hex_is_black() {
        for input in ["", "#", "#fff", "#12345", "#1234567", "#3b82f6ff", "#gg0000", "red", "##3b82f6"] {
            assert_eq!(hex_to_rgb(input), BLACK, "{input:?}");
        }
    }

    #[test]
    fn test_hex_format_is_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(255, 171, 0)), "#ffab00");
        assert_eq!(Rgb::new(0, 1, 2).to_hex(), "#000102");
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#3b82f6", "#1F2937", "#a0a0a0", "0a0b0c"] {
            let rgb = hex_to_rgb(hex);
            assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), rgb);
        }
    }

    #[test]
    fn test_hsl_known_values() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_close(red.h, 0.0);
        assert_close(red.s, 1.0);
        assert_close(red.l, 0.5);

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert_close(blue.h, 240.0);

        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_close(gray.s, 0.0);
        assert_eq!(gray.to_rgb(), Rgb::new(128, 128, 128));

        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5)), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_hsl_round_trip_within_one() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = Rgb::new(r as u8, g as u8, b as u8);
                    let back = hsl_to_rgb(rgb_to_hsl(rgb));
                    for (x, y) in rgb.channels().into_iter().zip(back.channels()) {
                        assert!(x.abs_diff(y) <= 1, "{rgb} -> {back}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_saturation() {
        assert_close(saturation(BLACK), 0.0);
        assert_close(saturation(Rgb::new(200, 200, 200)), 0.0);
        assert_close(saturation(Rgb::new(200, 100, 100)), 0.5);
        assert_close(Rgb::new(255, 0, 0).saturation(), 1.0);
    }

    #[test]
    fn test_luminance_bounds() {
        assert_close(luminance("#000000"), 0.0);
        assert_close(luminance("#ffffff"), 1.0);
        assert_close(luminance("#00ff00"), 0.7152);
        assert_close(luminance("not a color"), 0.0);
    }

    #[test]
    fn test_contrast_ratio() {
        assert_close(contrast_ratio("#000000", "#ffffff"), 21.0);
        assert_close(contrast_ratio("#ffffff", "#000000"), 21.0);
        assert_close(contrast_ratio("#3b82f6", "#3b82f6"), 1.0);
    }

    #[test]
    fn test_adjustments_clamp() {
        assert_eq!(adjust_brightness("#808080", 1.0), "#ffffff");
        assert_eq!(adjust_brightness("#808080", -1.0), "#000000");
        assert_eq!(adjust_brightness("#e0e0e0", -0.8), "#141414");
        assert_eq!(adjust_saturation("#ff0000", 0.5), "#ff0000");
        assert_eq!(adjust_saturation("#c04040", -1.0), "#808080");
    }
}
