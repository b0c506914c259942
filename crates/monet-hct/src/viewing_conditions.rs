// SPDX-License-Identifier: MIT
//
// CAM16 viewing conditions: the surround, adaptation and background
// parameters the appearance model is evaluated under.
//
// The whole workspace works in one fixed environment (`standard()`): D65
// white, an adapting luminance of 200/π · Y(L* 50)/100 ≈ 11.7 cd/m², a mid
// gray background (L* 50) and an average surround. Other conditions exist
// only for `Hct::in_viewing_conditions`.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::argb::WHITE_POINT_D65;
use crate::cam16::XYZ_TO_CAM16RGB;
use crate::math::{lerp, matrix_multiply, y_from_lstar};

/// Precomputed CAM16 environment constants.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

static STANDARD: LazyLock<ViewingConditions> =
    LazyLock::new(|| ViewingConditions::with_background_lstar(50.0));

impl ViewingConditions {
    /// The process-wide default environment.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Default environment over a background of the given L*.
    #[must_use]
    pub fn with_background_lstar(lstar: f64) -> Self {
        Self::new(
            WHITE_POINT_D65,
            200.0 / PI * y_from_lstar(50.0) / 100.0,
            lstar,
            2.0,
            false,
        )
    }

    /// Derive the model constants for an environment.
    ///
    /// `surround` runs from 0 (dark) through 1 (dim) to 2 (average).
    /// The background is floored at L* 0.1; a fully black background
    /// produces infinities in the lightness correlate.
    #[must_use]
    pub fn new(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let background_lstar = background_lstar.max(0.1);
        let [r_w, g_w, b_w] = matrix_multiply(white_point, &XYZ_TO_CAM16RGB);

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        }
        .clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / 5.0_f64.mul_add(adapting_luminance, 1.0);
        let k4 = k.powi(4);
        let k4f = 1.0 - k4;
        let fl = (0.1 * k4f * k4f).mul_add((5.0 * adapting_luminance).cbrt(), k4 * adapting_luminance);

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let adapt = |channel: f64, white: f64| {
            let factor = (fl * channel * white / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        };
        let rgb_a = [adapt(rgb_d[0], r_w), adapt(rgb_d[1], g_w), adapt(rgb_d[2], b_w)];
        let aw = 2.0_f64.mul_add(rgb_a[0], 0.05_f64.mul_add(rgb_a[2], rgb_a[1])) * nbb;

        Self { n, aw, nbb, ncb, c, nc, rgb_d, fl, fl_root: fl.powf(0.25), z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_constants() {
        let vc = ViewingConditions::standard();
        assert!((vc.fl - 0.388_481_453_780_035_3).abs() < 1e-12, "F_L: {}", vc.fl);
        assert!((vc.rgb_d[0] - 1.021_177_702_757_52).abs() < 1e-12, "D_R: {}", vc.rgb_d[0]);
        assert!((vc.n - 0.184_186_518_512_444_16).abs() < 1e-9, "n: {}", vc.n);
        assert!((vc.c - 0.69).abs() < 1e-12, "c: {}", vc.c);
    }

    #[test]
    fn dark_background_is_floored() {
        let black = ViewingConditions::with_background_lstar(0.0);
        assert!(black.n > 0.0 && black.nbb.is_finite(), "n: {}, nbb: {}", black.n, black.nbb);
    }
}
