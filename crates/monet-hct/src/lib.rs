// SPDX-License-Identifier: MIT
//
// monet-hct — the HCT color space for monet.
//
// Hue and chroma come from CAM16, a color appearance model; tone is CIE
// L*. Contrast between two colors is a function of tone alone, so the
// scheme engine decides tones for legibility and lets hue and chroma ride
// along. Requests outside the sRGB gamut are not errors: the solver keeps
// hue and tone and hands back the most chroma the gamut allows.
//
// Layers, bottom up:
//
//   math, argb           sRGB transfer, XYZ, L*a*b*, angle helpers
//   viewing_conditions   CAM16 environment (standard: D65, 200/π lux)
//   cam16                forward and inverse appearance model
//   solver               (hue, chroma, L*) → sRGB, gamut mapped
//   hct                  the public color type
//   palette              one hue and chroma at every tone
//   contrast             WCAG ratios measured and solved on tones
//   dislike, temperature color-theory helpers used by scheme variants

pub mod argb;
pub mod cam16;
pub mod contrast;
pub mod dislike;
pub mod error;
pub mod hct;
pub mod math;
pub mod palette;
pub mod temperature;
pub mod viewing_conditions;

mod solver;

pub use argb::Argb;
pub use cam16::Cam16;
pub use error::ColorError;
pub use hct::Hct;
pub use palette::TonalPalette;
pub use temperature::TemperatureCache;
pub use viewing_conditions::ViewingConditions;
