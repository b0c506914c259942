//! Argument errors for the quantizers.

use thiserror::Error;

/// Invalid input to a quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantizeError {
    #[error("cannot quantize an empty pixel buffer")]
    EmptyPixels,

    #[error("max color count must be at least 1")]
    ZeroColors,
}

/// Shared argument check for every quantizer entry point.
pub(crate) const fn check_input<T>(pixels: &[T], max_colors: usize) -> Result<(), QuantizeError> {
    if pixels.is_empty() {
        return Err(QuantizeError::EmptyPixels);
    }
    if max_colors == 0 {
        return Err(QuantizeError::ZeroColors);
    }
    Ok(())
}
