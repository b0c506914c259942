// SPDX-License-Identifier: MIT
//
// CAM16 color appearance model.
//
// Single-character variable names (j, c, h, m, s, q, a, b) are the
// standard correlate names in the CAM16 literature.
#![allow(clippy::many_single_char_names)]
//
// Forward direction (sRGB → XYZ → cone space → adapted responses →
// correlates) is closed form. The reverse direction here only works from a
// complete (J, C, h) triple; producing a color from an *independent* hue,
// chroma and L* needs the search in `solver`.
//
//   Argb ──► XYZ ──► CAM16 RGB ──► chromatic adaptation ──► (J, C, h, M, s, Q)
//                                                             │
//                                            CAM16-UCS (J*, a*, b*) for distance

use crate::argb::Argb;
use crate::math::{matrix_multiply, signum};
use crate::viewing_conditions::ViewingConditions;

pub(crate) const XYZ_TO_CAM16RGB: [[f64; 3]; 3] = [
    [0.401_288, 0.650_173, -0.051_461],
    [-0.250_268, 1.204_414, 0.045_854],
    [-0.002_079, 0.048_952, 0.953_127],
];

pub(crate) const CAM16RGB_TO_XYZ: [[f64; 3]; 3] = [
    [1.862_067_86, -1.011_254_63, 0.149_186_77],
    [0.387_526_54, 0.621_447_44, -0.008_973_98],
    [-0.015_841_50, -0.034_122_94, 1.049_964_44],
];

// ─── Cam16 ───────────────────────────────────────────────────────────────────

/// Appearance correlates of a color under some viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, `[0, 360)`.
    pub hue: f64,
    /// Chroma.
    pub chroma: f64,
    /// Lightness.
    pub j: f64,
    /// Brightness.
    pub q: f64,
    /// Colorfulness.
    pub m: f64,
    /// Saturation.
    pub s: f64,
    /// CAM16-UCS lightness.
    pub jstar: f64,
    /// CAM16-UCS red-green axis.
    pub astar: f64,
    /// CAM16-UCS yellow-blue axis.
    pub bstar: f64,
}

impl Cam16 {
    /// Correlates of `argb` under the standard viewing conditions.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::standard())
    }

    /// Correlates of `argb` under `vc`.
    #[must_use]
    pub fn from_argb_in(argb: Argb, vc: &ViewingConditions) -> Self {
        let [x, y, z] = argb.to_xyz();
        Self::from_xyz_in(x, y, z, vc)
    }

    /// Correlates of a CIE XYZ color (Y on a 0..=100 scale) under `vc`.
    #[must_use]
    pub fn from_xyz_in(x: f64, y: f64, z: f64, vc: &ViewingConditions) -> Self {
        let [r_c, g_c, b_c] = matrix_multiply([x, y, z], &XYZ_TO_CAM16RGB);

        let adapt = |cone: f64, discount: f64| {
            let d = discount * cone;
            let af = (vc.fl * d.abs() / 100.0).powf(0.42);
            signum(d) * 400.0 * af / (af + 27.13)
        };
        let r_a = adapt(r_c, vc.rgb_d[0]);
        let g_a = adapt(g_c, vc.rgb_d[1]);
        let b_a = adapt(b_c, vc.rgb_d[2]);

        // Opponent dimensions.
        let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let atan_degrees = b.atan2(a).to_degrees();
        let hue = if atan_degrees < 0.0 {
            atan_degrees + 360.0
        } else if atan_degrees >= 360.0 {
            atan_degrees - 360.0
        } else {
            atan_degrees
        };
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = 4.0 / vc.c * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = (1.64 - 0.29_f64.powf(vc.n)).powf(0.73) * t.powf(0.9);
        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * vc.fl_root;
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();

        let (jstar, astar, bstar) = ucs(j, m, hue_radians);
        Self { hue, chroma, j, q, m, s, jstar, astar, bstar }
    }

    /// Build from lightness, chroma and hue under the standard conditions.
    #[must_use]
    pub fn from_jch(j: f64, c: f64, h: f64) -> Self {
        Self::from_jch_in(j, c, h, ViewingConditions::standard())
    }

    /// Build from lightness, chroma and hue under `vc`.
    #[must_use]
    pub fn from_jch_in(j: f64, c: f64, h: f64, vc: &ViewingConditions) -> Self {
        let q = 4.0 / vc.c * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;
        let m = c * vc.fl_root;
        let alpha = c / (j / 100.0).sqrt();
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();
        let (jstar, astar, bstar) = ucs(j, m, h.to_radians());
        Self { hue: h, chroma: c, j, q, m, s, jstar, astar, bstar }
    }

    /// Build from CAM16-UCS coordinates under the standard conditions.
    #[must_use]
    pub fn from_ucs(jstar: f64, astar: f64, bstar: f64) -> Self {
        Self::from_ucs_in(jstar, astar, bstar, ViewingConditions::standard())
    }

    /// Build from CAM16-UCS coordinates under `vc`.
    #[must_use]
    pub fn from_ucs_in(jstar: f64, astar: f64, bstar: f64, vc: &ViewingConditions) -> Self {
        let m_prime = astar.hypot(bstar);
        let m = ((m_prime * 0.0228).exp() - 1.0) / 0.0228;
        let c = m / vc.fl_root;
        let mut h = bstar.atan2(astar).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        let j = jstar / (1.0 - (jstar - 100.0) * 0.007);
        Self::from_jch_in(j, c, h, vc)
    }

    /// Perceptual distance in CAM16-UCS.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dj = self.jstar - other.jstar;
        let da = self.astar - other.astar;
        let db = self.bstar - other.bstar;
        let de_prime = db.mul_add(db, dj.mul_add(dj, da * da)).sqrt();
        1.41 * de_prime.powf(0.63)
    }

    /// The sRGB color these correlates describe under the standard conditions.
    #[must_use]
    pub fn to_argb(&self) -> Argb {
        self.viewed(ViewingConditions::standard())
    }

    /// The sRGB color these correlates describe under `vc`.
    #[must_use]
    pub fn viewed(&self, vc: &ViewingConditions) -> Argb {
        let [x, y, z] = self.xyz_in(vc);
        Argb::from_xyz(x, y, z)
    }

    /// CIE XYZ these correlates describe under `vc`.
    #[must_use]
    pub fn xyz_in(&self, vc: &ViewingConditions) -> [f64; 3] {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };

        let t = (alpha / (1.64 - 0.29_f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();

        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        let unadapt = |adapted: f64, discount: f64| {
            let base = (27.13 * adapted.abs() / (400.0 - adapted.abs())).max(0.0);
            signum(adapted) * (100.0 / vc.fl) * base.powf(1.0 / 0.42) / discount
        };
        let r_f = unadapt(r_a, vc.rgb_d[0]);
        let g_f = unadapt(g_a, vc.rgb_d[1]);
        let b_f = unadapt(b_a, vc.rgb_d[2]);

        matrix_multiply([r_f, g_f, b_f], &CAM16RGB_TO_XYZ)
    }
}

fn ucs(j: f64, m: f64, hue_radians: f64) -> (f64, f64, f64) {
    let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
    let mstar = 1.0 / 0.0228 * (0.0228 * m).ln_1p();
    (jstar, mstar * hue_radians.cos(), mstar * hue_radians.sin())
}
