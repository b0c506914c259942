// SPDX-License-Identifier: MIT
//
// HCT: CAM16 hue and chroma paired with CIE L* as tone.
//
// Tone is what contrast is measured on (L* maps directly to relative
// luminance), while hue and chroma come from the appearance model and stay
// perceptually stable as tone moves. That split is what lets a palette hold
// hue and chroma fixed and slide tone to satisfy contrast.
//
// An `Hct` always stores the packed color it was resolved to. The hue,
// chroma and tone fields are the *measured* values of that color, not the
// request, so an out-of-gamut request reports the chroma it actually got.

use std::fmt;

use crate::argb::Argb;
use crate::cam16::Cam16;
use crate::error::ColorError;
use crate::math::lstar_from_y;
use crate::solver::solve_to_argb;
use crate::viewing_conditions::ViewingConditions;

/// A color in hue, chroma and tone.
#[derive(Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite hue, negative or non-finite chroma, and tone
    /// outside `[0, 100]`. Chroma above the gamut limit is *not* an error;
    /// it is reduced to the most the gamut offers.
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Result<Self, ColorError> {
        if !hue.is_finite() {
            return Err(ColorError::InvalidHue(hue));
        }
        if !chroma.is_finite() || chroma < 0.0 {
            return Err(ColorError::InvalidChroma(chroma));
        }
        if !(0.0..=100.0).contains(&tone) {
            return Err(ColorError::InvalidTone(tone));
        }
        Ok(Self::solve(hue, chroma, tone))
    }

    /// Resolve (hue, chroma, tone) to the nearest displayable color.
    ///
    /// Infallible counterpart of [`Hct::new`] for internal computations:
    /// tone is clamped into `[0, 100]` and chroma is reduced to the gamut
    /// limit.
    #[must_use]
    pub fn solve(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_argb(solve_to_argb(hue, chroma, tone.clamp(0.0, 100.0)))
    }

    /// Measure a packed color. Lossless: `Hct::from_argb(c).to_argb() == c`.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self { hue: cam.hue, chroma: cam.chroma, tone: argb.lstar(), argb }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Hue angle in degrees, `[0, 360)`.
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

    /// L*, `[0, 100]`.
    #[inline]
    #[must_use]
    pub const fn tone(&self) -> f64 {
        self.tone
    }

    #[inline]
    #[must_use]
    pub const fn to_argb(&self) -> Argb {
        self.argb
    }

    // ─── Derived colors ──────────────────────────────────────────────────

    /// Same hue and chroma at another tone.
    #[must_use]
    pub fn with_tone(&self, tone: f64) -> Self {
        Self::solve(self.hue, self.chroma, tone)
    }

    /// Same tone and chroma at another hue.
    #[must_use]
    pub fn with_hue(&self, hue: f64) -> Self {
        Self::solve(hue, self.chroma, self.tone)
    }

    /// Same hue and tone at another chroma.
    #[must_use]
    pub fn with_chroma(&self, chroma: f64) -> Self {
        Self::solve(self.hue, chroma, self.tone)
    }

    /// How this color looks over a background other than the standard
    /// mid-gray, expressed back in standard HCT.
    ///
    /// The color is viewed under `vc`, and the XYZ that produces is
    /// measured again under the standard conditions.
    #[must_use]
    pub fn in_viewing_conditions(&self, vc: &ViewingConditions) -> Self {
        let cam = Cam16::from_argb(self.argb);
        let [x, y, z] = cam.xyz_in(vc);
        let recast = Cam16::from_xyz_in(x, y, z, ViewingConditions::standard());
        Self::solve(recast.hue, recast.chroma, lstar_from_y(y))
    }

    // ─── Hue classes ─────────────────────────────────────────────────────

    /// Hue in `[250, 270)`.
    #[must_use]
    pub fn is_blue(hue: f64) -> bool {
        (250.0..270.0).contains(&hue)
    }

    /// Hue in `[105, 125)`.
    #[must_use]
    pub fn is_yellow(hue: f64) -> bool {
        (105.0..125.0).contains(&hue)
    }

    /// Hue in `[170, 207)`.
    #[must_use]
    pub fn is_cyan(hue: f64) -> bool {
        (170.0..207.0).contains(&hue)
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Hct> for Argb {
    fn from(hct: Hct) -> Self {
        hct.argb
    }
}

impl fmt::Debug for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hct({:.2}, {:.2}, {:.2} = {})",
            self.hue, self.chroma, self.tone, self.argb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::difference_degrees;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Round trip ──────────────────────────────────────────────────

    #[test]
    fn argb_round_trip_is_lossless() {
        for rgb in (0..=0x00FF_FFFF_u32).step_by(0x0001_3579) {
            let argb = Argb::from_rgb24(rgb);
            assert_eq!(Hct::from_argb(argb).to_argb(), argb);
        }
    }

    #[test]
    fn solving_measured_triple_reproduces_color() {
        for r in (0..=255_u8).step_by(15) {
            for g in (0..=255_u8).step_by(15) {
                for b in (0..=255_u8).step_by(15) {
                    let argb = Argb::from_rgb(r, g, b);
                    let hct = Hct::from_argb(argb);
                    let solved = Hct::solve(hct.hue(), hct.chroma(), hct.tone());
                    assert_eq!(solved.to_argb(), argb, "{hct:?}");
                }
            }
        }
    }

    // ── Gamut ───────────────────────────────────────────────────────

    #[test]
    fn excess_chroma_is_clamped_not_rejected() {
        for hue in [0.0, 27.0, 90.0, 142.0, 200.0, 282.0, 330.0] {
            for tone in [20.0, 50.0, 80.0] {
                let max = Hct::solve(hue, 1000.0, tone);
                let beyond = Hct::new(hue, 5000.0, tone).unwrap();
                assert!(approx_eq(max.tone(), tone, 1.0), "tone at h{hue} t{tone}: {max:?}");
                assert!(approx_eq(beyond.chroma(), max.chroma(), 1e-9), "{beyond:?} vs {max:?}");
                assert!(beyond.chroma() < 200.0, "{beyond:?}");
                let drift = difference_degrees(beyond.hue(), hue);
                assert!(drift < 3.0, "hue at h{hue} t{tone} drifted {drift:.2}: {beyond:?}");
            }
        }
    }

    #[test]
    fn in_gamut_request_is_honored() {
        let hct = Hct::new(270.0, 30.0, 50.0).unwrap();
        assert!(approx_eq(hct.hue(), 270.0, 0.5), "{hct:?}");
        assert!(approx_eq(hct.chroma(), 30.0, 0.5), "{hct:?}");
        assert!(approx_eq(hct.tone(), 50.0, 0.5), "{hct:?}");
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(Hct::new(0.0, -1.0, 50.0), Err(ColorError::InvalidChroma(-1.0)));
        assert_eq!(Hct::new(0.0, 10.0, 100.5), Err(ColorError::InvalidTone(100.5)));
        assert!(matches!(Hct::new(f64::NAN, 10.0, 50.0), Err(ColorError::InvalidHue(_))));
    }

    // ── Derived ─────────────────────────────────────────────────────

    #[test]
    fn with_tone_keeps_hue() {
        let base = Hct::from_argb(Argb(0xFF5C_6BC0));
        let light = base.with_tone(90.0);
        assert!(approx_eq(light.tone(), 90.0, 0.5), "{light:?}");
        assert!(approx_eq(light.hue(), base.hue(), 2.0), "{light:?} vs {base:?}");
    }

    #[test]
    fn standard_conditions_are_identity() {
        let hct = Hct::from_argb(Argb(0xFF5C_6BC0));
        let same = hct.in_viewing_conditions(ViewingConditions::standard());
        assert_eq!(same.to_argb(), hct.to_argb());
    }

    #[test]
    fn dark_background_shifts_appearance() {
        let hct = Hct::from_argb(Argb(0xFF5C_6BC0));
        let over_black = hct.in_viewing_conditions(&ViewingConditions::with_background_lstar(0.0));
        assert!(over_black.to_argb() != hct.to_argb(), "{over_black:?}");
    }

    #[test]
    fn hue_classes() {
        assert!(Hct::is_blue(260.0) && !Hct::is_blue(270.0));
        assert!(Hct::is_yellow(105.0) && !Hct::is_yellow(125.0));
        assert!(Hct::is_cyan(190.0) && !Hct::is_cyan(169.9));
    }
}
