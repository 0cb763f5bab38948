//! Page color extraction
//!
//! Reduces a decoded page image to its distinct colors. White background and
//! black border pixels are dropped; everything else is counted per exact
//! RGB triple.

use std::collections::BTreeMap;

use crate::api::MatchError;
use crate::table::{ColorSample, ColorTable};

/// Decoded 8-bit page image with interleaved channels.
///
/// 1 channel is grayscale, 2 is grayscale + alpha, 3 is RGB and 4 is RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PageImage {
    /// Wrap a pixel buffer, checking that its length fits the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, MatchError> {
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(MatchError::MalformedImage {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MatchError> {
        Self::new(width, height, 3, data)
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MatchError> {
        Self::new(width, height, 4, data)
    }

    pub fn from_luma(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MatchError> {
        Self::new(width, height, 1, data)
    }

    pub fn from_luma_alpha(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MatchError> {
        Self::new(width, height, 2, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Composite one channel over white.
#[inline]
fn over_white(c: u8, alpha: u8) -> u8 {
    let a = alpha as f64 / 255.0;
    (c as f64 * a + 255.0 * (1.0 - a)).round() as u8
}

#[inline]
fn is_background(rgb: [u8; 3]) -> bool {
    let sum: u16 = rgb.iter().map(|&c| c as u16).sum();
    sum == 765 || sum == 0
}

/// Distinct colors of a page, without white and black pixels.
///
/// Returns `Some` of an empty table when the image has no color channels,
/// `None` when every pixel was background, and otherwise the rows sorted by
/// ascending RGB.
///
/// # Example
///
/// ```
/// use colormap_match::{extract_colors, PageImage};
///
/// let page = PageImage::from_rgb(2, 1, vec![255, 255, 255, 10, 20, 30]).unwrap();
/// let table = extract_colors(&page, "p1").unwrap();
/// assert_eq!(table.samples.len(), 1);
/// assert_eq!(table.samples[0].rgb, [10, 20, 30]);
/// ```
pub fn extract_colors(image: &PageImage, page_id: &str) -> Option<ColorTable> {
    if image.channels < 3 {
        tracing::debug!(page = page_id, channels = image.channels, "No color channels");
        return Some(ColorTable::empty(page_id));
    }

    let mut counts: BTreeMap<[u8; 3], u64> = BTreeMap::new();
    for px in image.data.chunks_exact(image.channels as usize) {
        let rgb = if image.channels == 4 {
            let alpha = px[3];
            [
                over_white(px[0], alpha),
                over_white(px[1], alpha),
                over_white(px[2], alpha),
            ]
        } else {
            [px[0], px[1], px[2]]
        };
        if is_background(rgb) {
            continue;
        }
        *counts.entry(rgb).or_insert(0) += 1;
    }

    if counts.is_empty() {
        tracing::debug!(page = page_id, "Only background pixels");
        return None;
    }

    let samples: Vec<ColorSample> = counts
        .into_iter()
        .map(|(rgb, count)| ColorSample { rgb, count })
        .collect();
    let table = ColorTable::new(page_id, samples);
    tracing::debug!(
        page = page_id,
        colors = table.samples.len(),
        pixels = table.pixel_count(),
        "Extracted page colors"
    );
    Some(table)
}
