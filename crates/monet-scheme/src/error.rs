//! Errors raised while configuring or building a scheme.
//!
//! Resolution itself never fails: once a [`ColorScheme`](crate::ColorScheme)
//! exists, every role has a color.

use monet_hct::ColorError;
use monet_quantize::QuantizeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemeError {
    #[error("contrast level must be a number within [-1, 1] (got {0})")]
    InvalidContrast(f64),

    #[error("unknown color role {0:?}")]
    UnknownRole(String),

    #[error("unknown variant {0:?}")]
    UnknownVariant(String),

    #[error("unknown platform {0:?}: expected phone or watch")]
    UnknownPlatform(String),

    #[error("unknown spec version {0:?}: expected 2021 or 2025")]
    UnknownSpecVersion(String),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Quantize(#[from] QuantizeError),
}
