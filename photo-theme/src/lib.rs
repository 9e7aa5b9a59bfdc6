//! # photo-theme
//!
//! Derive a background/text/accent color theme from a photo.
//!
//! An image is decoded and shrunk ([`pixels`]), summarized into a four-color [`Palette`]
//! ([`palette`]), and turned into a [`Theme`] whose text stays readable on its background
//! ([`theme`]). Palette extraction and theme synthesis are pure and never fail; only decoding can.
//!
//! ```rust
//! use photo_theme::{PixelBuffer, analyze_pixels};
//!
//! let white = PixelBuffer::new(4, 4, vec![255; 64]).unwrap();
//! let theme = analyze_pixels(&white);
//!
//! // A bright image gets a dark background with light text
//! assert_eq!(theme.background, "#141414");
//! assert_eq!(theme.text, "#ffffff");
//! ```
//!
//! Results are meant to be kept per page section in a [`ThemeRegistry`].

pub mod color;
pub mod error;
pub mod palette;
pub mod pixels;
pub mod registry;
pub mod theme;

use log::debug;

pub use error::DecodeError;
pub use palette::{Palette, extract_palette};
pub use pixels::{ImageRef, PixelBuffer, decode};
pub use registry::ThemeRegistry;
pub use theme::{Polarity, Theme, synthesize_theme};

/// Decode an image and derive its theme.
pub fn analyze_image(image: &ImageRef) -> Result<Theme, DecodeError> {
    let pixels = decode(image)?;
    Ok(analyze_pixels(&pixels))
}

/// Derive the theme of already decoded pixels.
pub fn analyze_pixels(pixels: &PixelBuffer) -> Theme {
    let palette = extract_palette(pixels.as_bytes());
    debug!("palette: {palette:?}");
    synthesize_theme(&palette)
}
