// SPDX-License-Identifier: MIT
//
// Packed 32-bit ARGB colors and their conversions to CIE XYZ and L*a*b*.
//
// Single-character variable names (r, g, b, x, y, z, l, a) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// The sRGB ↔ XYZ matrices are the D65 ones used by the appearance model in
// `cam16`, so a color that leaves through `to_xyz` and comes back through
// `from_xyz` lands on the same 8-bit code.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;
use crate::math::{self, delinearized, lab_f, lab_inv_f, linearized, matrix_multiply};

pub(crate) const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_338_95, 0.357_620_64, 0.180_510_42],
    [0.2126, 0.7152, 0.0722],
    [0.019_321_41, 0.119_163_82, 0.950_344_78],
];

pub(crate) const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.241_377_479_238_868_5, -1.537_665_240_285_185_1, -0.498_853_668_462_680_53],
    [-0.969_145_251_300_532_1, 1.875_885_345_106_787_2, 0.041_565_856_169_120_61],
    [0.055_620_936_896_913_05, -0.203_955_245_647_421_23, 1.057_179_911_122_033_5],
];

/// CIE standard illuminant D65, Y normalized to 100.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

// ─── Argb ────────────────────────────────────────────────────────────────────

/// A packed `0xAARRGGBB` color.
///
/// This is the interchange format of the whole workspace: quantizer input
/// and output, scorer candidates and resolved scheme roles are all `Argb`.
/// Every perceptual conversion treats the color as opaque.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Opaque color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque color from a 24-bit `0xRRGGBB` value; any high byte is ignored.
    #[inline]
    #[must_use]
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Whether the alpha channel is fully opaque.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 255
    }

    /// Same color with the alpha channel forced to 255.
    #[inline]
    #[must_use]
    pub const fn opaque(self) -> Self {
        Self(self.0 | 0xFF00_0000)
    }

    /// Same color with the given alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// The 24-bit `0xRRGGBB` part.
    #[inline]
    #[must_use]
    pub const fn rgb24(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    // ─── Linear RGB ──────────────────────────────────────────────────────

    /// Opaque color from linear RGB components on a 0..=100 scale.
    #[must_use]
    pub fn from_linrgb(linrgb: [f64; 3]) -> Self {
        Self::from_rgb(
            delinearized(linrgb[0]),
            delinearized(linrgb[1]),
            delinearized(linrgb[2]),
        )
    }

    /// Linear RGB components on a 0..=100 scale.
    #[must_use]
    pub fn to_linrgb(self) -> [f64; 3] {
        [linearized(self.red()), linearized(self.green()), linearized(self.blue())]
    }

    // ─── XYZ ─────────────────────────────────────────────────────────────

    /// Opaque color from CIE XYZ (Y on a 0..=100 scale).
    #[must_use]
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::from_linrgb(matrix_multiply([x, y, z], &XYZ_TO_SRGB))
    }

    /// CIE XYZ with Y on a 0..=100 scale.
    #[must_use]
    pub fn to_xyz(self) -> [f64; 3] {
        matrix_multiply(self.to_linrgb(), &SRGB_TO_XYZ)
    }

    // ─── L*a*b* ──────────────────────────────────────────────────────────

    /// Opaque color from CIE L*a*b* under D65.
    #[must_use]
    pub fn from_lab(l: f64, a: f64, b: f64) -> Self {
        let fy = (l + 16.0) / 116.0;
        let fx = a / 500.0 + fy;
        let fz = fy - b / 200.0;
        Self::from_xyz(
            lab_inv_f(fx) * WHITE_POINT_D65[0],
            lab_inv_f(fy) * WHITE_POINT_D65[1],
            lab_inv_f(fz) * WHITE_POINT_D65[2],
        )
    }

    /// CIE L*a*b* under D65.
    #[must_use]
    pub fn to_lab(self) -> [f64; 3] {
        let [x, y, z] = self.to_xyz();
        let fx = lab_f(x / WHITE_POINT_D65[0]);
        let fy = lab_f(y / WHITE_POINT_D65[1]);
        let fz = lab_f(z / WHITE_POINT_D65[2]);
        [116.0_f64.mul_add(fy, -16.0), 500.0 * (fx - fy), 200.0 * (fy - fz)]
    }

    // ─── Lightness ───────────────────────────────────────────────────────

    /// The gray whose CIE L* is `lstar`.
    #[must_use]
    pub fn from_lstar(lstar: f64) -> Self {
        let component = delinearized(math::y_from_lstar(lstar));
        Self::from_rgb(component, component, component)
    }

    /// CIE L* lightness, which is also the HCT tone.
    #[must_use]
    pub fn lstar(self) -> f64 {
        math::lstar_from_y(self.to_xyz()[1])
    }

    // ─── Hex ─────────────────────────────────────────────────────────────

    /// `#RRGGBB`, uppercase. Alpha is not printed.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.rgb24())
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb(#{:08X})", self.0)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Argb {
    type Err = ColorError;

    /// Accepts `RGB`, `RRGGBB` and `AARRGGBB`, with or without a leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s.trim()).ok_or_else(|| ColorError::InvalidHex(s.to_owned()))
    }
}

fn parse_hex(s: &str) -> Option<Argb> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();

    match digits.len() {
        // RGB
        3 => {
            let r = parse_hex_digit(digits[0])?;
            let g = parse_hex_digit(digits[1])?;
            let b = parse_hex_digit(digits[2])?;
            Some(Argb::from_rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // RRGGBB
        6 => {
            let r = parse_hex_byte(&digits[0..2])?;
            let g = parse_hex_byte(&digits[2..4])?;
            let b = parse_hex_byte(&digits[4..6])?;
            Some(Argb::from_rgb(r, g, b))
        }
        // AARRGGBB
        8 => {
            let a = parse_hex_byte(&digits[0..2])?;
            let r = parse_hex_byte(&digits[2..4])?;
            let g = parse_hex_byte(&digits[4..6])?;
            let b = parse_hex_byte(&digits[6..8])?;
            Some(Argb::from_rgb(r, g, b).with_alpha(a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Channels ────────────────────────────────────────────────────

    #[test]
    fn channels_unpack() {
        let c = Argb(0x80_12_34_56);
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (0x80, 0x12, 0x34, 0x56));
        assert!(!c.is_opaque());
        assert!(c.opaque().is_opaque());
        assert_eq!(Argb::from_rgb(0x12, 0x34, 0x56), Argb::from_rgb24(0xAB12_3456));
    }

    // ── Hex ─────────────────────────────────────────────────────────

    #[test]
    fn parse_hex_forms() {
        assert_eq!("#5C6BC0".parse::<Argb>(), Ok(Argb(0xFF5C_6BC0)));
        assert_eq!("5c6bc0".parse::<Argb>(), Ok(Argb(0xFF5C_6BC0)));
        assert_eq!("#f00".parse::<Argb>(), Ok(Argb(0xFFFF_0000)));
        assert_eq!("#80FF0000".parse::<Argb>(), Ok(Argb(0x80FF_0000)));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!("#12345".parse::<Argb>().is_err());
        assert!("#GGGGGG".parse::<Argb>().is_err());
        assert!("".parse::<Argb>().is_err());
    }

    #[test]
    fn display_is_uppercase_rgb() {
        assert_eq!(Argb(0xFF5C_6BC0).to_string(), "#5C6BC0");
        assert_eq!(format!("{:?}", Argb(0xFF5C_6BC0)), "Argb(#FF5C6BC0)");
    }

    // ── XYZ & Lab ───────────────────────────────────────────────────

    #[test]
    fn xyz_round_trip() {
        for argb in [Argb::BLACK, Argb::WHITE, Argb(0xFF5C_6BC0), Argb(0xFF00_FF00), Argb(0xFF7F_7F7F)] {
            let [x, y, z] = argb.to_xyz();
            assert_eq!(Argb::from_xyz(x, y, z), argb);
        }
    }

    #[test]
    fn lab_round_trip() {
        for argb in [Argb(0xFFFF_0000), Argb(0xFF12_3456), Argb(0xFFFE_DCBA)] {
            let [l, a, b] = argb.to_lab();
            assert_eq!(Argb::from_lab(l, a, b), argb);
        }
    }

    #[test]
    fn white_lab_is_neutral() {
        let [l, a, b] = Argb::WHITE.to_lab();
        assert!((l - 100.0).abs() < 0.01, "L*: {l}");
        assert!(a.abs() < 0.01 && b.abs() < 0.01, "a*b*: {a} {b}");
    }

    // ── Lightness ───────────────────────────────────────────────────

    #[test]
    fn lstar_of_grays() {
        assert!(Argb::BLACK.lstar().abs() < 1e-9);
        assert!((Argb::WHITE.lstar() - 100.0).abs() < 0.01);
        let mid = Argb::from_lstar(50.0);
        assert_eq!(mid.red(), mid.blue());
        assert!((mid.lstar() - 50.0).abs() < 0.5, "gray L*: {}", mid.lstar());
    }
}
