// SPDX-License-Identifier: MIT
//
// Scalar helpers shared by every stage of the color pipeline: angle
// sanitizing, interpolation, the sRGB transfer function and the CIE L*
// lightness curve.
//
// L* and Y are both expressed on a 0..=100 scale throughout the crate.
// Linear RGB components are also 0..=100 (not 0..=1), which keeps the
// matrices in `argb` and `solver` identical to their published forms.

// ─── Interpolation & clamping ────────────────────────────────────────────────

/// Sign of `x` as `-1.0`, `0.0` or `1.0`.
#[must_use]
pub fn signum(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Linear interpolation from `start` (t = 0) to `stop` (t = 1).
#[must_use]
pub fn lerp(start: f64, stop: f64, t: f64) -> f64 {
    (1.0 - t).mul_add(start, t * stop)
}

/// Clamp `value` into `[min, max]`. Unlike `f64::clamp` this never panics
/// when a computed range arrives inverted.
#[must_use]
pub fn clamp_f64(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

// ─── Angles ──────────────────────────────────────────────────────────────────

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Wrap an integer angle in degrees into `[0, 360)`.
#[must_use]
pub const fn sanitize_degrees_int(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// `1.0` if the shortest path from `from` to `to` increases the hue,
/// `-1.0` otherwise.
#[must_use]
pub fn rotation_direction(from: f64, to: f64) -> f64 {
    if sanitize_degrees(to - from) <= 180.0 { 1.0 } else { -1.0 }
}

/// Shortest angular distance between two hues, in `[0, 180]`.
#[must_use]
pub fn difference_degrees(a: f64, b: f64) -> f64 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

// ─── Linear algebra ──────────────────────────────────────────────────────────

/// Multiply a row-major 3×3 matrix by a column vector.
#[must_use]
pub fn matrix_multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    let dot = |m: [f64; 3]| m[0].mul_add(row[0], m[1].mul_add(row[1], m[2] * row[2]));
    [dot(matrix[0]), dot(matrix[1]), dot(matrix[2])]
}

// ─── Transfer function ───────────────────────────────────────────────────────

/// Convert an 8-bit sRGB channel to linear light on a 0..=100 scale.
#[must_use]
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040_449_936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Convert linear light on a 0..=100 scale to an 8-bit sRGB channel,
/// rounding to the nearest code and clamping out-of-range input.
#[must_use]
pub fn delinearized(component: f64) -> u8 {
    let normalized = component / 100.0;
    let encoded = if normalized <= 0.003_130_8 {
        normalized * 12.92
    } else {
        1.055_f64.mul_add(normalized.powf(1.0 / 2.4), -0.055)
    };
    // Clamped before the cast, so truncation cannot occur.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = (encoded * 255.0).round().clamp(0.0, 255.0) as u8;
    code
}

// ─── CIE lightness ───────────────────────────────────────────────────────────

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

pub(crate) fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

pub(crate) fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_EPSILON {
        ft3
    } else {
        116.0_f64.mul_add(ft, -16.0) / LAB_KAPPA
    }
}

/// Relative luminance Y (0..=100) for a CIE L* lightness.
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_inv_f((lstar + 16.0) / 116.0)
}

/// CIE L* lightness for a relative luminance Y (0..=100).
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0).mul_add(116.0, -16.0)
}
