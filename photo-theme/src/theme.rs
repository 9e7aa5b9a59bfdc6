//! Theme synthesis.
//!
//! A [`Theme`] is derived from a [`Palette`] in three steps: pick a [`Polarity`] from the
//! palette's brightness, tint the dominant color into a background of that polarity, and make sure
//! the text color reads against it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::{adjust_brightness, adjust_saturation, contrast_ratio, luminance};
use crate::palette::Palette;

/// Minimum background/text contrast ratio (WCAG AA for body text).
pub const MIN_CONTRAST: f64 = 4.5;

const DOMINANT_DARK_THRESHOLD: f64 = 0.5;
const AVERAGE_DARK_THRESHOLD: f64 = 0.6;

/// Colors applied to one section of the page. All colors are lowercase `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub accent: String,
}

/// Whether a theme puts light text on a dark background or the other way round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    pub fn new(
        background: impl Into<String>,
        text: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            accent: accent.into(),
        }
    }

    /// Contrast ratio between background and text.
    pub fn contrast(&self) -> f64 {
        contrast_ratio(&self.background, &self.text)
    }
}

impl Polarity {
    /// A bright dominant color or a bright overall image is enough to go dark.
    pub fn for_palette(palette: &Palette) -> Self {
        if luminance(&palette.dominant) > DOMINANT_DARK_THRESHOLD
            || luminance(&palette.average) > AVERAGE_DARK_THRESHOLD
        {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Lightness delta applied to the dominant color to get the background.
    pub const fn background_shift(self) -> f64 {
        match self {
            Self::Light => 0.9,
            Self::Dark => -0.8,
        }
    }

    /// Saturation delta applied to the palette accent.
    pub const fn accent_boost(self) -> f64 {
        match self {
            Self::Light => 0.2,
            Self::Dark => 0.3,
        }
    }

    /// Initial text color.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Light => "#1f2937",
            Self::Dark => "#ffffff",
        }
    }

    /// Text color used when [`Polarity::text`] does not reach [`MIN_CONTRAST`].
    pub const fn fallback_text(self) -> &'static str {
        match self {
            Self::Light => "#111827",
            Self::Dark => "#f9fafb",
        }
    }
}

/// Derive a [`Theme`] from a [`Palette`].
///
/// The contrast check runs once: if the polarity's text color is below [`MIN_CONTRAST`] it is
/// replaced by [`Polarity::fallback_text`], and that replacement is not checked again.
pub fn synthesize_theme(palette: &Palette) -> Theme {
    let polarity = Polarity::for_palette(palette);
    let background = adjust_brightness(&palette.dominant, polarity.background_shift());
    let text = ensure_contrast(&background, polarity);
    let accent = adjust_saturation(&palette.accent, polarity.accent_boost());
    debug!("{polarity:?} theme: background {background}, text {text}, accent {accent}");
    Theme {
        background,
        text,
        accent,
    }
}

fn ensure_contrast(background: &str, polarity: Polarity) -> String {
    let text = polarity.text();
    let ratio = contrast_ratio(background, text);
    if ratio < MIN_CONTRAST {
        debug!("contrast {ratio:.2} of {text} on {background} too low, using fallback");
        polarity.fallback_text().to_owned()
    } else {
        text.to_owned()
    }
}
