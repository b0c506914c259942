//! Where k-means measures distance.
//!
//! The refinement pass works on 3-component points. RGB is the default;
//! L*a*b* clusters closer to perception at the cost of a conversion per
//! distinct color.

use monet_hct::Argb;

/// Maps colors to points and back, and measures point distance.
pub trait PointProvider: Sync {
    fn from_argb(&self, argb: Argb) -> [f64; 3];

    fn to_argb(&self, point: [f64; 3]) -> Argb;

    /// Squared distance. Only compared, never rooted, except for the
    /// movement threshold.
    fn distance(&self, a: [f64; 3], b: [f64; 3]) -> f64 {
        let d0 = a[0] - b[0];
        let d1 = a[1] - b[1];
        let d2 = a[2] - b[2];
        d0.mul_add(d0, d1.mul_add(d1, d2 * d2))
    }
}

/// Points are the 8-bit channel values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbPoints;

impl PointProvider for RgbPoints {
    fn from_argb(&self, argb: Argb) -> [f64; 3] {
        [f64::from(argb.red()), f64::from(argb.green()), f64::from(argb.blue())]
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn to_argb(&self, point: [f64; 3]) -> Argb {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Argb::from_rgb(channel(point[0]), channel(point[1]), channel(point[2]))
    }
}

/// Points are CIE L*a*b*.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabPoints;

impl PointProvider for LabPoints {
    fn from_argb(&self, argb: Argb) -> [f64; 3] {
        argb.to_lab()
    }

    fn to_argb(&self, point: [f64; 3]) -> Argb {
        Argb::from_lab(point[0], point[1], point[2])
    }
}
