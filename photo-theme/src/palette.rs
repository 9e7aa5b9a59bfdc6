//! Palette extraction.
//!
//! Colors are grouped into coarse buckets (each channel floored to a multiple of
//! [`BUCKET_SIZE`]) and ranked by how often they occur. The two most common buckets become the
//! dominant and secondary colors, the first reasonably saturated bucket after them becomes the
//! accent, and the mean of all sampled pixels becomes the average.

use log::trace;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::ops::Range;

use crate::color::{Hsl, Rgb};

/// Only every `SAMPLE_STRIDE`-th pixel is looked at.
pub const SAMPLE_STRIDE: usize = 4;
/// Pixels with alpha below this are ignored.
pub const ALPHA_THRESHOLD: u8 = 128;
/// Quantization step per channel, giving 8 levels and 512 buckets.
pub const BUCKET_SIZE: u8 = 32;
/// Number of buckets kept after ranking.
pub const RANKED_BUCKETS: usize = 10;

/// Dominant (and average) color when nothing opaque was sampled.
pub const FALLBACK_DOMINANT: Rgb = Rgb::new(128, 128, 128);
/// Secondary color when fewer than two buckets exist.
pub const FALLBACK_SECONDARY: Rgb = Rgb::new(160, 160, 160);
/// Accent used when fewer than three buckets exist.
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x3b, 0x82, 0xf6);

/// Ranks considered when looking for an accent.
const ACCENT_CANDIDATES: Range<usize> = 2..6;
const ACCENT_MIN_SATURATION: f64 = 0.3;
/// Bounds applied when an accent has to be derived from the dominant hue.
const SYNTHESIZED_MIN_SATURATION: f64 = 0.6;
const SYNTHESIZED_LIGHTNESS: (f64, f64) = (0.4, 0.7);

/// The four-color summary of an image. All colors are lowercase `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Most frequent bucket.
    pub dominant: String,
    /// Second most frequent bucket.
    pub secondary: String,
    /// A saturated bucket, or a color derived from the dominant hue.
    pub accent: String,
    /// Mean of all sampled opaque pixels.
    pub average: String,
}

/// Bucket counts in first-seen order, plus running channel sums for the average.
#[derive(Debug, Default)]
struct Histogram {
    slots: HashMap<Rgb, usize>,
    buckets: Vec<(Rgb, usize)>,
    sum: [u64; 3],
    count: u64,
}

fn quantize(channel: u8) -> u8 {
    channel / BUCKET_SIZE * BUCKET_SIZE
}

impl Histogram {
    fn sample(pixels: &[u8]) -> Self {
        let mut histogram = Self::default();
        for px in pixels.chunks_exact(4).step_by(SAMPLE_STRIDE) {
            if px[3] < ALPHA_THRESHOLD {
                continue;
            }
            histogram.add(Rgb::new(px[0], px[1], px[2]));
        }
        histogram
    }

    fn add(&mut self, color: Rgb) {
        let key = Rgb::new(quantize(color.r), quantize(color.g), quantize(color.b));
        match self.slots.get(&key) {
            Some(&slot) => self.buckets[slot].1 += 1,
            None => {
                self.slots.insert(key, self.buckets.len());
                self.buckets.push((key, 1));
            }
        }
        self.sum[0] += u64::from(color.r);
        self.sum[1] += u64::from(color.g);
        self.sum[2] += u64::from(color.b);
        self.count += 1;
    }

    /// The most frequent buckets, most frequent first. Equal counts keep first-seen order.
    fn ranked(mut self) -> Vec<Rgb> {
        // Stable sort.
        self.buckets.sort_by(|a, b| b.1.cmp(&a.1));
        self.buckets
            .into_iter()
            .take(RANKED_BUCKETS)
            .map(|(color, _)| color)
            .collect()
    }

    fn average(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        let mean = |sum: u64| (sum as f64 / self.count as f64).round() as u8;
        Some(Rgb::new(mean(self.sum[0]), mean(self.sum[1]), mean(self.sum[2])))
    }
}

/// Summarize RGBA pixel data (4 bytes per pixel) into a [`Palette`].
///
/// Never fails: empty or fully transparent input yields the fallback colors.
pub fn extract_palette(pixels: &[u8]) -> Palette {
    let histogram = Histogram::sample(pixels);
    let average = histogram.average().unwrap_or(FALLBACK_DOMINANT);
    let ranked = histogram.ranked();
    trace!("ranked buckets: {ranked:?}");

    let dominant = ranked.first().copied().unwrap_or(FALLBACK_DOMINANT);
    let secondary = ranked.get(1).copied().unwrap_or(FALLBACK_SECONDARY);

    Palette {
        dominant: dominant.to_hex(),
        secondary: secondary.to_hex(),
        accent: select_accent(&ranked).to_hex(),
        average: average.to_hex(),
    }
}

/// Pick an accent from ranked buckets.
///
/// Ranks 2 to 5 are scanned for the first color with saturation above 0.3. If none qualifies, the
/// dominant hue is pushed to a vivid, mid-lightness color instead. With fewer than three buckets
/// the result is [`DEFAULT_ACCENT`].
pub fn select_accent(ranked: &[Rgb]) -> Rgb {
    if ranked.len() < ACCENT_CANDIDATES.start + 1 {
        return DEFAULT_ACCENT;
    }

    let end = ranked.len().min(ACCENT_CANDIDATES.end);
    if let Some(color) = ranked[ACCENT_CANDIDATES.start..end]
        .iter()
        .find(|c| c.saturation() > ACCENT_MIN_SATURATION)
    {
        return *color;
    }

    let Hsl { h, s, l } = ranked[0].to_hsl();
    let (min_l, max_l) = SYNTHESIZED_LIGHTNESS;
    Hsl::new(h, s.max(SYNTHESIZED_MIN_SATURATION), l.clamp(min_l, max_l)).to_rgb()
}
