//! Seed colors from an image.
//!
//! Decoding and downscaling happen elsewhere; this takes the pixels as
//! they are.

use monet_hct::Argb;
use monet_quantize::{FALLBACK_COLOR, ScoreOptions, celebi, score};
use tracing::debug;

use crate::error::SchemeError;

/// Longest side callers should downscale to before extracting. Larger
/// images cost time without changing the result much.
pub const MAX_DIMENSION: u32 = 112;

/// Colors the quantizer is asked for before scoring.
pub const MAX_COLORS: usize = 128;

/// Up to `count` seed candidates from `pixels`, best first. When nothing
/// in the image is colorful enough the result is the fallback seed alone.
///
/// # Errors
///
/// [`SchemeError::Quantize`] when `pixels` is empty.
pub fn extract_colors(pixels: &[Argb], count: usize) -> Result<Vec<Argb>, SchemeError> {
    let palette = celebi::quantize(pixels, MAX_COLORS)?;
    let options = ScoreOptions { desired: count, fallback: FALLBACK_COLOR, filter: true };
    let ranked = score(&palette, &options);
    debug!(pixels = pixels.len(), clusters = palette.len(), seeds = ranked.len(), "extracted seed colors");
    Ok(ranked)
}

/// The best seed in `pixels`.
///
/// # Errors
///
/// Same as [`extract_colors`].
pub fn extract_color(pixels: &[Argb]) -> Result<Argb, SchemeError> {
    let ranked = extract_colors(pixels, 1)?;
    Ok(ranked.first().copied().unwrap_or(FALLBACK_COLOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monet_quantize::QuantizeError;
    use pretty_assertions::assert_eq;

    fn solid(color: u32, width: usize, height: usize) -> Vec<Argb> {
        vec![Argb(color); width * height]
    }

    // ── Solid images ──

    #[test]
    fn solid_primaries_seed_themselves() {
        for color in [0xFFFF_0000, 0xFF00_8000, 0xFF00_00FF] {
            assert_eq!(extract_color(&solid(color, 8, 8)), Ok(Argb(color)), "seed for {:08X}", color);
        }
    }

    #[test]
    fn grays_fall_back() {
        for color in [0xFF00_0000, 0xFFFF_FFFF, 0xFF80_8080] {
            assert_eq!(extract_color(&solid(color, 8, 8)), Ok(FALLBACK_COLOR), "seed for {:08X}", color);
        }
    }

    #[test]
    fn image_size_does_not_matter() {
        for (w, h) in [(1, 1), (50, 50), (150, 50)] {
            assert_eq!(extract_color(&solid(0xFFFF_0000, w, h)), Ok(Argb(0xFFFF_0000)), "{w}x{h}");
        }
    }

    // ── Mixed images ──

    #[test]
    fn dominant_color_ranks_first() {
        let mut pixels = solid(0xFF00_00FF, 90, 1);
        pixels.extend(solid(0xFFFF_0000, 10, 1));
        let ranked = extract_colors(&pixels, 4).unwrap_or_default();
        assert_eq!(ranked.first(), Some(&Argb(0xFF00_00FF)), "ranked {ranked:?}");
        assert!(ranked.len() <= 4, "ranked {ranked:?}");
    }

    // ── Errors ──

    #[test]
    fn empty_image_is_an_error() {
        assert_eq!(extract_color(&[]), Err(SchemeError::Quantize(QuantizeError::EmptyPixels)));
    }
}
