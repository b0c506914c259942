//! Palette generation: one seed, six tonal palettes.
//!
//! Every variant is a set of pure rules mapping the seed (and, for 2025,
//! brightness and platform) to a hue and chroma per palette. The rules are
//! selected by a single match on `(spec, variant, palette)`.
//!
//! Hue tables come in two flavors. The 2021 tables rotate the seed hue by
//! the entry whose open interval contains it; the 2025 tables use
//! half-open intervals and can also map a hue to a fixed value.

use std::sync::Arc;

use monet_hct::dislike::fix_if_disliked;
use monet_hct::math::sanitize_degrees;
use monet_hct::{Argb, Hct, TemperatureCache, TonalPalette};

use crate::config::{Overrides, Platform, SpecVersion};
use crate::variant::Variant;

/// Error palette used when no error seed is given.
const DEFAULT_ERROR_HUE: f64 = 25.0;
const DEFAULT_ERROR_CHROMA: f64 = 84.0;

/// The six palettes a scheme draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

impl PaletteKind {
    pub const ALL: [Self; 6] =
        [Self::Primary, Self::Secondary, Self::Tertiary, Self::Neutral, Self::NeutralVariant, Self::Error];
}

/// The palettes of one scheme. Shared, since schemes derived from one
/// another (the 2025 fixed roles resolve against a light copy) reuse them.
#[derive(Debug, Clone, PartialEq)]
pub struct Palettes {
    pub primary: Arc<TonalPalette>,
    pub secondary: Arc<TonalPalette>,
    pub tertiary: Arc<TonalPalette>,
    pub neutral: Arc<TonalPalette>,
    pub neutral_variant: Arc<TonalPalette>,
    pub error: Arc<TonalPalette>,
}

impl Palettes {
    #[must_use]
    pub fn get(&self, kind: PaletteKind) -> &TonalPalette {
        match kind {
            PaletteKind::Primary => &self.primary,
            PaletteKind::Secondary => &self.secondary,
            PaletteKind::Tertiary => &self.tertiary,
            PaletteKind::Neutral => &self.neutral,
            PaletteKind::NeutralVariant => &self.neutral_variant,
            PaletteKind::Error => &self.error,
        }
    }
}

/// Scheme parameters the palette rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteContext {
    pub variant: Variant,
    pub spec: SpecVersion,
    pub dark: bool,
    pub platform: Platform,
}

impl PaletteContext {
    /// The palette of `kind` derived from `seed`.
    ///
    /// Only the 2025 tables define an error rule; elsewhere `Error` yields
    /// `None`.
    #[must_use]
    pub fn palette(&self, kind: PaletteKind, seed: &Hct) -> Option<TonalPalette> {
        match self.spec {
            SpecVersion::Spec2021 => spec2021(self.variant, kind, seed),
            SpecVersion::Spec2025 => Some(spec2025(self, kind, seed)),
        }
    }

    /// All six palettes for `source`, with per-palette seed overrides.
    ///
    /// Secondary and tertiary overrides go through the primary rule, so an
    /// override color gets the same treatment the seed would. Neutral and
    /// neutral-variant overrides use their own rules. An error override
    /// uses the error rule where one exists and the primary rule
    /// otherwise; without one the error palette is hue 25, chroma 84.
    #[must_use]
    pub fn generate(&self, source: &Hct, overrides: &Overrides) -> Palettes {
        let rule = |kind: PaletteKind, seed: &Hct| {
            self.palette(kind, seed).unwrap_or_else(|| TonalPalette::from_hue_and_chroma(seed.hue(), seed.chroma()))
        };
        let from_override = |over: Option<Argb>, kind: PaletteKind, own: PaletteKind| match over {
            Some(argb) => rule(kind, &Hct::from_argb(argb)),
            None => rule(own, source),
        };

        let error = overrides.error.map_or_else(
            || TonalPalette::from_hue_and_chroma(DEFAULT_ERROR_HUE, DEFAULT_ERROR_CHROMA),
            |argb| {
                let seed = Hct::from_argb(argb);
                self.palette(PaletteKind::Error, &seed).unwrap_or_else(|| rule(PaletteKind::Primary, &seed))
            },
        );

        Palettes {
            primary: Arc::new(rule(PaletteKind::Primary, source)),
            secondary: Arc::new(from_override(overrides.secondary, PaletteKind::Primary, PaletteKind::Secondary)),
            tertiary: Arc::new(from_override(overrides.tertiary, PaletteKind::Primary, PaletteKind::Tertiary)),
            neutral: Arc::new(from_override(overrides.neutral, PaletteKind::Neutral, PaletteKind::Neutral)),
            neutral_variant: Arc::new(from_override(
                overrides.neutral_variant,
                PaletteKind::NeutralVariant,
                PaletteKind::NeutralVariant,
            )),
            error: Arc::new(error),
        }
    }
}

// ─── Hue tables ──────────────────────────────────────────────────────────────

/// 2021 rotation: `source + rotations[i]` for the `i` with
/// `hues[i] < source < hues[i + 1]`. A single rotation applies everywhere.
/// A hue sitting exactly on a breakpoint is not rotated.
#[must_use]
pub fn rotated_hue(source_hue: f64, hues: &[f64], rotations: &[f64]) -> f64 {
    if let [rotation] = rotations {
        return sanitize_degrees(source_hue + rotation);
    }
    hues.windows(2)
        .zip(rotations)
        .find(|(pair, _)| pair[0] < source_hue && source_hue < pair[1])
        .map_or(source_hue, |(_, rotation)| sanitize_degrees(source_hue + rotation))
}

/// 2025 lookup: `values[i]` for the `i` with
/// `breakpoints[i] <= source < breakpoints[i + 1]`, or the source hue when
/// no interval matches.
#[must_use]
pub fn piecewise_value(source_hue: f64, breakpoints: &[f64], values: &[f64]) -> f64 {
    breakpoints
        .windows(2)
        .zip(values)
        .find(|(pair, _)| pair[0] <= source_hue && source_hue < pair[1])
        .map_or(source_hue, |(_, &value)| sanitize_degrees(value))
}

/// 2025 rotation: the seed hue plus the piecewise rotation.
#[must_use]
pub fn rotated_hue_piecewise(source_hue: f64, breakpoints: &[f64], rotations: &[f64]) -> f64 {
    let rotation = if breakpoints.len() < 2 || rotations.is_empty() {
        0.0
    } else {
        piecewise_value(source_hue, breakpoints, rotations)
    };
    sanitize_degrees(source_hue + rotation)
}

// ─── 2021 rules ──────────────────────────────────────────────────────────────

const VIBRANT_HUES: [f64; 9] = [0.0, 41.0, 61.0, 101.0, 131.0, 181.0, 251.0, 301.0, 360.0];
const VIBRANT_SECONDARY_ROTATIONS: [f64; 9] = [18.0, 15.0, 10.0, 12.0, 15.0, 18.0, 15.0, 12.0, 12.0];
const VIBRANT_TERTIARY_ROTATIONS: [f64; 9] = [35.0, 30.0, 20.0, 25.0, 30.0, 35.0, 30.0, 25.0, 25.0];

const EXPRESSIVE_HUES: [f64; 9] = [0.0, 21.0, 51.0, 121.0, 151.0, 191.0, 271.0, 321.0, 360.0];
const EXPRESSIVE_SECONDARY_ROTATIONS: [f64; 9] = [45.0, 95.0, 45.0, 20.0, 45.0, 90.0, 45.0, 45.0, 45.0];
const EXPRESSIVE_TERTIARY_ROTATIONS: [f64; 9] = [120.0, 120.0, 20.0, 45.0, 20.0, 15.0, 20.0, 120.0, 120.0];

#[allow(clippy::too_many_lines)]
fn spec2021(variant: Variant, kind: PaletteKind, source: &Hct) -> Option<TonalPalette> {
    use PaletteKind as P;

    let hue = source.hue();
    let chroma = source.chroma();
    let at = |hue: f64, chroma: f64| Some(TonalPalette::from_hue_and_chroma(sanitize_degrees(hue), chroma));

    if kind == P::Error {
        return None;
    }

    match variant {
        Variant::TonalSpot => match kind {
            P::Primary => at(hue, 36.0),
            P::Secondary => at(hue, 16.0),
            P::Tertiary => at(hue + 60.0, 24.0),
            P::Neutral => at(hue, 6.0),
            _ => at(hue, 8.0),
        },
        Variant::Fidelity | Variant::Content => match kind {
            P::Primary => at(hue, chroma),
            P::Secondary => at(hue, (chroma - 32.0).max(chroma * 0.5)),
            P::Tertiary => {
                let cache = TemperatureCache::new(*source);
                let anchor = if variant == Variant::Fidelity {
                    cache.complement()
                } else {
                    cache.analogous(3, 6).get(2).copied().unwrap_or(*source)
                };
                Some(TonalPalette::from_hct(fix_if_disliked(anchor)))
            }
            P::Neutral => at(hue, chroma / 8.0),
            _ => at(hue, chroma / 8.0 + 4.0),
        },
        Variant::Monochrome => at(hue, 0.0),
        Variant::Neutral => match kind {
            P::Primary => at(hue, 12.0),
            P::Secondary => at(hue, 8.0),
            P::Tertiary => at(hue, 16.0),
            _ => at(hue, 2.0),
        },
        Variant::Vibrant => match kind {
            P::Primary => at(hue, 200.0),
            P::Secondary => at(rotated_hue(hue, &VIBRANT_HUES, &VIBRANT_SECONDARY_ROTATIONS), 24.0),
            P::Tertiary => at(rotated_hue(hue, &VIBRANT_HUES, &VIBRANT_TERTIARY_ROTATIONS), 32.0),
            P::Neutral => at(hue, 10.0),
            _ => at(hue, 12.0),
        },
        Variant::Expressive => match kind {
            P::Primary => at(hue + 240.0, 40.0),
            P::Secondary => at(rotated_hue(hue, &EXPRESSIVE_HUES, &EXPRESSIVE_SECONDARY_ROTATIONS), 24.0),
            P::Tertiary => at(rotated_hue(hue, &EXPRESSIVE_HUES, &EXPRESSIVE_TERTIARY_ROTATIONS), 32.0),
            P::Neutral => at(hue + 15.0, 8.0),
            _ => at(hue + 15.0, 12.0),
        },
        Variant::Rainbow => match kind {
            P::Primary => at(hue, 48.0),
            P::Secondary => at(hue, 16.0),
            P::Tertiary => at(hue + 60.0, 24.0),
            _ => at(hue, 0.0),
        },
        Variant::FruitSalad => match kind {
            P::Primary => at(hue - 50.0, 48.0),
            P::Secondary => at(hue - 50.0, 36.0),
            P::Tertiary => at(hue, 36.0),
            P::Neutral => at(hue, 10.0),
            _ => at(hue, 16.0),
        },
    }
}

// ─── 2025 rules ──────────────────────────────────────────────────────────────

const EXPRESSIVE_2025_BREAKS: [f64; 9] = [0.0, 105.0, 140.0, 204.0, 253.0, 278.0, 300.0, 333.0, 360.0];
const EXPRESSIVE_2025_SECONDARY: [f64; 8] = [-160.0, 155.0, -100.0, 96.0, -96.0, -156.0, -165.0, -160.0];
const EXPRESSIVE_2025_TERTIARY: [f64; 8] = [-165.0, 160.0, -105.0, 101.0, -101.0, -160.0, -170.0, -165.0];
const EXPRESSIVE_2025_NEUTRAL_BREAKS: [f64; 7] = [0.0, 71.0, 124.0, 253.0, 278.0, 300.0, 360.0];
const EXPRESSIVE_2025_NEUTRAL: [f64; 6] = [10.0, 0.0, 10.0, 0.0, 10.0, 0.0];

const VIBRANT_2025_BREAKS: [f64; 6] = [0.0, 38.0, 105.0, 140.0, 333.0, 360.0];
const VIBRANT_2025_SECONDARY: [f64; 5] = [-14.0, 10.0, -14.0, 10.0, -14.0];
const VIBRANT_2025_TERTIARY_BREAKS: [f64; 9] = [0.0, 38.0, 71.0, 105.0, 140.0, 161.0, 253.0, 333.0, 360.0];
const VIBRANT_2025_TERTIARY: [f64; 8] = [-72.0, 35.0, 24.0, -24.0, 62.0, 50.0, 62.0, -72.0];

const TONAL_SPOT_2025_TERTIARY_BREAKS: [f64; 6] = [0.0, 20.0, 71.0, 161.0, 333.0, 360.0];
const TONAL_SPOT_2025_TERTIARY: [f64; 5] = [-40.0, 48.0, -32.0, 40.0, -32.0];

const NEUTRAL_2025_TERTIARY_BREAKS: [f64; 8] = [0.0, 38.0, 105.0, 161.0, 204.0, 278.0, 333.0, 360.0];
const NEUTRAL_2025_TERTIARY: [f64; 7] = [-32.0, 26.0, 10.0, -39.0, 24.0, -15.0, -32.0];

const ERROR_2025_BREAKS: [f64; 9] = [0.0, 3.0, 13.0, 23.0, 33.0, 43.0, 153.0, 273.0, 360.0];
const ERROR_2025_HUES: [f64; 8] = [12.0, 22.0, 32.0, 12.0, 22.0, 32.0, 22.0, 12.0];

// 2025 only defines tonal spot, neutral, vibrant and expressive; callers
// fall back to 2021 for the rest before getting here.
#[allow(clippy::too_many_lines)]
fn spec2025(ctx: &PaletteContext, kind: PaletteKind, source: &Hct) -> TonalPalette {
    use PaletteKind as P;

    let hue = source.hue();
    let phone = ctx.platform == Platform::Phone;
    let dark = ctx.dark;
    let at = |hue: f64, chroma: f64| TonalPalette::from_hue_and_chroma(hue, chroma);
    let pick = |on_phone: f64, on_watch: f64| if phone { on_phone } else { on_watch };

    if kind == P::Error {
        let error_hue = piecewise_value(hue, &ERROR_2025_BREAKS, &ERROR_2025_HUES);
        let chroma = match ctx.variant {
            Variant::Neutral => pick(50.0, 40.0),
            Variant::Expressive => pick(64.0, 48.0),
            Variant::Vibrant => pick(80.0, 60.0),
            _ => pick(60.0, 48.0),
        };
        return at(error_hue, chroma);
    }

    match ctx.variant {
        Variant::Neutral => {
            let blue = Hct::is_blue(hue);
            let neutral_chroma = pick(1.4, 6.0);
            match kind {
                P::Primary => at(hue, if blue { pick(12.0, 16.0) } else { pick(8.0, 12.0) }),
                P::Secondary => at(hue, if blue { pick(6.0, 10.0) } else { pick(4.0, 6.0) }),
                P::Tertiary => at(
                    rotated_hue_piecewise(hue, &NEUTRAL_2025_TERTIARY_BREAKS, &NEUTRAL_2025_TERTIARY),
                    pick(20.0, 36.0),
                ),
                P::Neutral => at(hue, neutral_chroma),
                _ => at(hue, neutral_chroma * 2.2),
            }
        }
        Variant::Vibrant => {
            let neutral_hue = rotated_hue_piecewise(hue, &VIBRANT_2025_BREAKS, &VIBRANT_2025_SECONDARY);
            let neutral_chroma = if phone || Hct::is_blue(neutral_hue) { 28.0 } else { 20.0 };
            match kind {
                P::Primary => at(hue, pick(74.0, 56.0)),
                P::Secondary => at(
                    rotated_hue_piecewise(hue, &VIBRANT_2025_BREAKS, &VIBRANT_2025_SECONDARY),
                    pick(56.0, 36.0),
                ),
                P::Tertiary => {
                    at(rotated_hue_piecewise(hue, &VIBRANT_2025_TERTIARY_BREAKS, &VIBRANT_2025_TERTIARY), 56.0)
                }
                P::Neutral => at(neutral_hue, neutral_chroma),
                _ => at(neutral_hue, neutral_chroma * 1.29),
            }
        }
        Variant::Expressive => {
            let neutral_hue =
                rotated_hue_piecewise(hue, &EXPRESSIVE_2025_NEUTRAL_BREAKS, &EXPRESSIVE_2025_NEUTRAL);
            let yellow = Hct::is_yellow(neutral_hue);
            let neutral_chroma = if !phone {
                12.0
            } else if dark {
                if yellow { 6.0 } else { 14.0 }
            } else {
                18.0
            };
            match kind {
                P::Primary => at(hue, if phone { if dark { 36.0 } else { 48.0 } } else { 40.0 }),
                P::Secondary => at(
                    rotated_hue_piecewise(hue, &EXPRESSIVE_2025_BREAKS, &EXPRESSIVE_2025_SECONDARY),
                    if phone && dark { 16.0 } else { 24.0 },
                ),
                P::Tertiary => {
                    at(rotated_hue_piecewise(hue, &EXPRESSIVE_2025_BREAKS, &EXPRESSIVE_2025_TERTIARY), 48.0)
                }
                P::Neutral => at(neutral_hue, neutral_chroma),
                _ => at(neutral_hue, neutral_chroma * if yellow { 1.6 } else { 2.3 }),
            }
        }
        _ => {
            let neutral_chroma = pick(5.0, 10.0);
            match kind {
                P::Primary => at(hue, if phone && dark { 26.0 } else { 32.0 }),
                P::Secondary => at(hue, 16.0),
                P::Tertiary => at(
                    rotated_hue_piecewise(hue, &TONAL_SPOT_2025_TERTIARY_BREAKS, &TONAL_SPOT_2025_TERTIARY),
                    pick(28.0, 32.0),
                ),
                P::Neutral => at(hue, neutral_chroma),
                _ => at(hue, neutral_chroma * 1.7),
            }
        }
    }
}
