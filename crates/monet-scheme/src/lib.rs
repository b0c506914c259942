//! # monet-scheme — seed color to resolved color roles
//!
//! Builds Material color schemes: a style variant turns a seed into six
//! tonal palettes, then every semantic role (primary, on_surface, ...) is
//! given a tone that keeps it legible against what it is drawn on.
//!
//! # Architecture
//!
//! ```text
//! SchemeConfig (seed, variant, dark, contrast, platform, spec version)
//!     │
//!     ▼
//! palettes.rs:        variant rules → primary, secondary, tertiary,
//!     │               neutral, neutral variant, error palettes
//!     ▼
//! spec2021.rs,        one RoleSpec per role: palette, base tone,
//! spec2025.rs:        background, contrast curve, tone pair
//!     │
//!     ▼
//! resolve.rs:         backgrounds first, then pair rules, contrast
//!     │               targets and awkward-tone avoidance
//!     ▼
//! dynamic_scheme.rs:  per-role OnceLock cache, tone → Hct → Argb
//!     │
//!     ▼
//! scheme.rs:          ColorScheme / ColorSchemeBuilder
//! ```
//!
//! [`extract`] picks seeds from an image's pixels for the first step.
//!
//! # Spec versions
//!
//! The 2021 tables are the baseline and cover every variant. The 2025
//! tables exist for tonal spot, neutral, vibrant and expressive, branch on
//! [`Platform`], and add the `*_dim` roles. Other variants asked for 2025
//! quietly use 2021.

// Role tables are one long match.
#![allow(clippy::too_many_lines)]
// Tone, hue and chroma locals differ by a letter or two.
#![allow(clippy::similar_names)]

pub mod config;
pub mod contrast_curve;
pub mod contrast_level;
pub mod dynamic_color;
pub mod dynamic_scheme;
pub mod error;
pub mod extract;
pub mod palettes;
pub mod role;
pub mod scheme;
pub mod spec2021;
pub mod spec2025;
pub mod tone_delta_pair;
pub mod variant;

mod resolve;

pub use config::{Overrides, Platform, SchemeConfig, SpecVersion};
pub use contrast_curve::ContrastCurve;
pub use contrast_level::Contrast;
pub use dynamic_color::RoleSpec;
pub use dynamic_scheme::DynamicScheme;
pub use error::SchemeError;
pub use extract::{extract_color, extract_colors};
pub use monet_quantize::FALLBACK_COLOR;
pub use palettes::{PaletteKind, Palettes};
pub use role::Role;
pub use scheme::{ColorScheme, ColorSchemeBuilder};
pub use tone_delta_pair::{DeltaConstraint, ToneDeltaPair, TonePolarity};
pub use variant::Variant;
