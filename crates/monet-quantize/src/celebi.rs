//! Wu box-cut followed by weighted k-means.
//!
//! Wu is fast and deterministic but limited to box-shaped clusters on a
//! 5-bit grid; k-means fixes both, given good seeds. Wu supplies the seeds.
//! (After M. E. Celebi, "Improving the Performance of K-Means for Color
//! Quantization", 2011.)

use monet_hct::Argb;

use crate::error::QuantizeError;
use crate::palette::QuantizedPalette;
use crate::point_provider::{PointProvider, RgbPoints};
use crate::{wsmeans, wu};

/// Quantize `pixels` to at most `max_colors` colors with their populations.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] or [`QuantizeError::ZeroColors`].
pub fn quantize(pixels: &[Argb], max_colors: usize) -> Result<QuantizedPalette, QuantizeError> {
    quantize_with(pixels, max_colors, &RgbPoints)
}

/// [`quantize`] refining with `provider` distances.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] or [`QuantizeError::ZeroColors`].
pub fn quantize_with<P: PointProvider>(
    pixels: &[Argb],
    max_colors: usize,
    provider: &P,
) -> Result<QuantizedPalette, QuantizeError> {
    let seeds: Vec<Argb> = wu::quantize(pixels, max_colors)?.colors().collect();
    wsmeans::quantize_with(pixels, &seeds, max_colors, provider)
}
