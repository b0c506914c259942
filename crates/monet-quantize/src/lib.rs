//! # monet-quantize — image colors to scheme seeds
//!
//! Reduces a decoded pixel buffer to a handful of representative colors,
//! then ranks them as candidate seeds for a color scheme.
//!
//! ```text
//! &[Argb] pixels
//!     │
//!     ▼
//! wu.rs:        box-cut the 5-bit RGB histogram into ≤ N boxes
//!     │
//!     ▼
//! wsmeans.rs:   refine the box means with weighted k-means
//!     │
//!     ▼
//! QuantizedPalette  (color, population) pairs
//!     │
//!     ▼
//! score.rs:     rank by hue-neighborhood population and chroma
//! ```
//!
//! [`celebi`] chains the first two steps. [`map`] is the exact histogram,
//! for images that already have few colors.
//!
//! Alpha is ignored throughout: every pixel is treated as opaque.

pub mod celebi;
pub mod error;
pub mod map;
pub mod palette;
pub mod point_provider;
pub mod score;
pub mod wsmeans;
pub mod wu;

pub use error::QuantizeError;
pub use palette::QuantizedPalette;
pub use point_provider::{LabPoints, PointProvider, RgbPoints};
pub use score::{FALLBACK_COLOR, ScoreOptions, score};
