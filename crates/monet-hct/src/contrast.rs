// SPDX-License-Identifier: MIT
//
// WCAG contrast on HCT tones.
//
// Tone is L*, and L* maps one-to-one onto relative luminance, so contrast
// between two colors depends on their tones alone. That is what lets the
// scheme engine pick a tone for contrast first and apply hue and chroma
// afterwards.
//
// Ratios run from 1:1 (identical) to 21:1 (black on white).

use crate::math::{lstar_from_y, y_from_lstar};

/// Smallest possible ratio.
pub const RATIO_MIN: f64 = 1.0;

/// Largest possible ratio, black against white.
pub const RATIO_MAX: f64 = 21.0;

/// WCAG AA for large text.
pub const RATIO_30: f64 = 3.0;

/// WCAG AA for body text.
pub const RATIO_45: f64 = 4.5;

/// WCAG AAA for body text.
pub const RATIO_70: f64 = 7.0;

// A solved tone may fall short of the requested ratio by this much before
// it counts as unreachable.
const CONTRAST_RATIO_EPSILON: f64 = 0.04;

// Solved tones are pushed this far past the exact answer, since rounding
// to 8-bit RGB moves the realized L* by up to roughly this amount.
const LUMINANCE_GAMUT_MAP_TOLERANCE: f64 = 0.4;

/// Contrast ratio of two relative luminances on a 0..=100 scale.
#[must_use]
pub fn ratio_of_ys(y1: f64, y2: f64) -> f64 {
    let lighter = y1.max(y2);
    let darker = y1.min(y2);
    (lighter + 5.0) / (darker + 5.0)
}

/// Contrast ratio of two tones.
#[must_use]
pub fn ratio_of_tones(t1: f64, t2: f64) -> f64 {
    ratio_of_ys(y_from_lstar(t1), y_from_lstar(t2))
}

/// The darkest tone at least as light as `tone` that reaches `ratio`
/// against it, or `None` when even white falls short.
#[must_use]
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let dark_y = y_from_lstar(tone);
    let light_y = ratio * (dark_y + 5.0) - 5.0;
    if !(0.0..=100.0).contains(&light_y) {
        return None;
    }
    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > CONTRAST_RATIO_EPSILON {
        return None;
    }
    let answer = lstar_from_y(light_y) + LUMINANCE_GAMUT_MAP_TOLERANCE;
    (0.0..=100.0).contains(&answer).then_some(answer)
}

/// The lightest tone at most as light as `tone` that reaches `ratio`
/// against it, or `None` when even black falls short.
#[must_use]
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    if !(0.0..=100.0).contains(&dark_y) {
        return None;
    }
    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > CONTRAST_RATIO_EPSILON {
        return None;
    }
    let answer = lstar_from_y(dark_y) - LUMINANCE_GAMUT_MAP_TOLERANCE;
    (0.0..=100.0).contains(&answer).then_some(answer)
}

/// [`lighter`], settling for white when the ratio is out of reach.
#[must_use]
pub fn lighter_unsafe(tone: f64, ratio: f64) -> f64 {
    lighter(tone, ratio).unwrap_or(100.0)
}

/// [`darker`], settling for black when the ratio is out of reach.
#[must_use]
pub fn darker_unsafe(tone: f64, ratio: f64) -> f64 {
    darker(tone, ratio).unwrap_or(0.0)
}
