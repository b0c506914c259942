//! Exact histogram: every distinct color with its pixel count.
//!
//! Not a quantizer in the reducing sense, but the first step of the others
//! and useful on its own for images that already have few colors. Alpha is
//! ignored; every pixel counts as opaque.

use std::collections::HashMap;

use monet_hct::Argb;

use crate::error::{QuantizeError, check_input};
use crate::palette::QuantizedPalette;

/// Distinct colors of `pixels` with their counts, in order of first
/// appearance.
pub(crate) fn histogram(pixels: &[Argb]) -> Vec<(Argb, u32)> {
    let mut counts: Vec<(Argb, u32)> = Vec::new();
    let mut index: HashMap<Argb, usize> = HashMap::new();
    for pixel in pixels {
        let color = pixel.opaque();
        match index.get(&color) {
            Some(&i) => counts[i].1 = counts[i].1.saturating_add(1),
            None => {
                index.insert(color, counts.len());
                counts.push((color, 1));
            }
        }
    }
    counts
}

/// Count every distinct color.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] when `pixels` is empty.
pub fn quantize(pixels: &[Argb]) -> Result<QuantizedPalette, QuantizeError> {
    check_input(pixels, 1)?;
    Ok(QuantizedPalette::from_entries(histogram(pixels)))
}
