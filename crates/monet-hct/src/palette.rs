// SPDX-License-Identifier: MIT
//
// Tonal palettes: one hue and chroma, every tone.
//
// A palette is cheap to create and answers `tone(t)` by solving HCT on
// demand. Solved colors are memoized per palette behind a read/write lock;
// two threads racing on the same tone both solve it and store the same
// value.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use crate::argb::Argb;
use crate::error::ColorError;
use crate::hct::Hct;
use crate::math::{clamp_f64, sanitize_degrees};

/// Chroma requested when measuring how much chroma a tone can hold.
const MAX_CHROMA_VALUE: f64 = 200.0;

/// A hue and chroma, with colors available at any tone.
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
    key_color: Hct,
    cache: RwLock<HashMap<u64, Argb>>,
}

impl TonalPalette {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidHue`] for a non-finite hue and
    /// [`ColorError::InvalidChroma`] for a negative or non-finite chroma.
    pub fn new(hue: f64, chroma: f64) -> Result<Self, ColorError> {
        if !hue.is_finite() {
            return Err(ColorError::InvalidHue(hue));
        }
        if !chroma.is_finite() || chroma < 0.0 {
            return Err(ColorError::InvalidChroma(chroma));
        }
        Ok(Self::from_hue_and_chroma(hue, chroma))
    }

    /// Palette with the hue and chroma of `argb`, which becomes the key color.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_hct(Hct::from_argb(argb))
    }

    /// Palette with the hue and chroma of `hct`, which becomes the key color.
    #[must_use]
    pub fn from_hct(hct: Hct) -> Self {
        Self::with_key_color(hct.hue(), hct.chroma(), hct)
    }

    /// Palette with the given hue and chroma. The key color is searched
    /// for: the tone nearest 50 that can hold the requested chroma.
    ///
    /// Infallible counterpart of [`TonalPalette::new`] for computed inputs:
    /// the hue is wrapped into `[0, 360)` (non-finite reads as 0) and chroma
    /// is floored at 0 (non-finite reads as 0).
    #[must_use]
    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        let hue = if hue.is_finite() { sanitize_degrees(hue) } else { 0.0 };
        let chroma = if chroma.is_finite() { chroma.max(0.0) } else { 0.0 };
        let key_color = KeyColor::new(hue, chroma).create();
        Self::with_key_color(hue, chroma, key_color)
    }

    fn with_key_color(hue: f64, chroma: f64, key_color: Hct) -> Self {
        Self { hue, chroma, key_color, cache: RwLock::new(HashMap::new()) }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The most representative color of the palette.
    #[inline]
    #[must_use]
    pub const fn key_color(&self) -> Hct {
        self.key_color
    }

    // ─── Tones ───────────────────────────────────────────────────────────

    /// The color at `tone`, clamped into `[0, 100]`. NaN reads as 0.
    ///
    /// Tone 99 of a yellow palette is the average of tones 98 and 100;
    /// solving it directly gives a visibly greenish off-white.
    #[must_use]
    pub fn tone(&self, tone: f64) -> Argb {
        let tone = if tone.is_nan() { 0.0 } else { clamp_f64(0.0, 100.0, tone) };
        if (tone - 99.0).abs() < f64::EPSILON && Hct::is_yellow(self.hue) {
            return average_argb(self.solved(98.0), self.solved(100.0));
        }
        self.solved(tone)
    }

    /// [`tone`](Self::tone) for a tone that came from outside.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidTone`] when `tone` is outside `[0, 100]` or NaN.
    pub fn try_tone(&self, tone: f64) -> Result<Argb, ColorError> {
        if (0.0..=100.0).contains(&tone) { Ok(self.tone(tone)) } else { Err(ColorError::InvalidTone(tone)) }
    }

    /// [`tone`](Self::tone) as HCT.
    #[must_use]
    pub fn hct(&self, tone: f64) -> Hct {
        let tone = if tone.is_nan() { 0.0 } else { clamp_f64(0.0, 100.0, tone) };
        Hct::from_argb(self.solved(tone))
    }

    fn solved(&self, tone: f64) -> Argb {
        let key = tone.to_bits();
        if let Some(&argb) = self.cache.read().get(&key) {
            return argb;
        }
        let argb = Hct::solve(self.hue, self.chroma, tone).to_argb();
        self.cache.write().insert(key, argb);
        argb
    }
}

impl Clone for TonalPalette {
    fn clone(&self) -> Self {
        Self {
            hue: self.hue,
            chroma: self.chroma,
            key_color: self.key_color,
            cache: RwLock::new(self.cache.read().clone()),
        }
    }
}

impl PartialEq for TonalPalette {
    fn eq(&self, other: &Self) -> bool {
        self.hue.to_bits() == other.hue.to_bits() && self.chroma.to_bits() == other.chroma.to_bits()
    }
}

impl fmt::Debug for TonalPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TonalPalette")
            .field("hue", &self.hue)
            .field("chroma", &self.chroma)
            .field("key_color", &self.key_color)
            .finish_non_exhaustive()
    }
}

fn average_argb(a: Argb, b: Argb) -> Argb {
    let mix = |x: u8, y: u8| {
        #[allow(clippy::cast_possible_truncation)]
        let avg = (u16::from(x) + u16::from(y)).div_ceil(2) as u8;
        avg
    };
    Argb::from_rgb(mix(a.red(), b.red()), mix(a.green(), b.green()), mix(a.blue(), b.blue()))
}

// ─── Key color ───────────────────────────────────────────────────────────────

/// Binary search for the key color of a hue and chroma.
///
/// Max chroma rises with tone up to a peak, then falls. The search keeps
/// the lowest tone (pivoting around 50, where chroma is usually most
/// available) whose max chroma reaches the request, or the peak if none
/// does.
struct KeyColor {
    hue: f64,
    requested_chroma: f64,
    chroma_cache: HashMap<i32, f64>,
}

impl KeyColor {
    fn new(hue: f64, requested_chroma: f64) -> Self {
        Self { hue, requested_chroma, chroma_cache: HashMap::new() }
    }

    fn create(mut self) -> Hct {
        const PIVOT_TONE: i32 = 50;
        const TONE_STEP: i32 = 1;
        const EPSILON: f64 = 0.01;

        let mut lower = 0;
        let mut upper = 100;
        while lower < upper {
            let mid = (lower + upper) / 2;
            let is_ascending = self.max_chroma(mid) < self.max_chroma(mid + TONE_STEP);
            let sufficient = self.max_chroma(mid) >= self.requested_chroma - EPSILON;

            if sufficient {
                // Keep searching toward the pivot.
                if (lower - PIVOT_TONE).abs() < (upper - PIVOT_TONE).abs() {
                    upper = mid;
                } else {
                    if lower == mid {
                        return Hct::solve(self.hue, self.requested_chroma, f64::from(lower));
                    }
                    lower = mid;
                }
            } else if is_ascending {
                lower = mid + TONE_STEP;
            } else {
                upper = mid;
            }
        }
        Hct::solve(self.hue, self.requested_chroma, f64::from(lower))
    }

    fn max_chroma(&mut self, tone: i32) -> f64 {
        let hue = self.hue;
        *self
            .chroma_cache
            .entry(tone)
            .or_insert_with(|| Hct::solve(hue, MAX_CHROMA_VALUE, f64::from(tone)).chroma())
    }
}
