// SPDX-License-Identifier: MIT
//
// Argument validation errors for the public constructors. Internal numeric
// paths never produce these; they clamp instead.

use thiserror::Error;

/// Invalid input passed to a color constructor or parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("hue must be a finite number of degrees (got {0})")]
    InvalidHue(f64),

    #[error("chroma must be finite and non-negative (got {0})")]
    InvalidChroma(f64),

    #[error("tone must lie within [0, 100] (got {0})")]
    InvalidTone(f64),

    #[error("invalid hex color {0:?}: expected RRGGBB or AARRGGBB, optionally prefixed with '#'")]
    InvalidHex(String),
}
