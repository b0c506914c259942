// SPDX-License-Identifier: MIT
//
// Dark yellow-greens are consistently rated unpleasant ("bile", "mold").
// Palettes that would anchor on one get lightened out of the band instead.

use crate::hct::Hct;

/// Tone a disliked color is moved to.
const FIXED_TONE: f64 = 70.0;

/// Whether `hct` falls in the disliked band: hue 90–111, chroma above 16,
/// tone below 65 (all rounded).
#[must_use]
pub fn is_disliked(hct: &Hct) -> bool {
    let hue = hct.hue().round();
    let hue_passes = (90.0..=111.0).contains(&hue);
    let chroma_passes = hct.chroma().round() > 16.0;
    let tone_passes = hct.tone().round() < 65.0;
    hue_passes && chroma_passes && tone_passes
}

/// `hct` lightened to tone 70 if it is disliked, otherwise `hct` itself.
#[must_use]
pub fn fix_if_disliked(hct: Hct) -> Hct {
    if is_disliked(&hct) {
        Hct::solve(hct.hue(), hct.chroma(), FIXED_TONE)
    } else {
        hct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argb::Argb;
    use pretty_assertions::assert_eq;

    #[test]
    fn skin_tones_are_liked() {
        // Monk skin tone scale.
        let skin = [
            0xFFF6_EDE4, 0xFFF3_E7DB, 0xFFF7_EAD0, 0xFFEA_DABA, 0xFFD7_BD96,
            0xFFA0_7E56, 0xFF82_5C43, 0xFF60_4134, 0xFF3A_312A, 0xFF29_2420,
        ];
        for argb in skin {
            let hct = Hct::from_argb(Argb(argb));
            assert!(!is_disliked(&hct), "{hct:?}");
        }
    }

    #[test]
    fn bile_colors_are_disliked() {
        for argb in [0xFF95_884B, 0xFF71_6B40, 0xFFB0_8E00, 0xFF4C_4308, 0xFF46_4521] {
            let hct = Hct::from_argb(Argb(argb));
            assert!(is_disliked(&hct), "{hct:?}");
        }
    }

    #[test]
    fn bile_colors_become_liked() {
        for argb in [0xFF95_884B, 0xFF71_6B40, 0xFFB0_8E00, 0xFF4C_4308, 0xFF46_4521] {
            let fixed = fix_if_disliked(Hct::from_argb(Argb(argb)));
            assert!(!is_disliked(&fixed), "{fixed:?}");
        }
    }

    #[test]
    fn tone_67_is_left_alone() {
        let color = Hct::solve(100.0, 50.0, 67.0);
        assert!(!is_disliked(&color), "{color:?}");
        assert_eq!(fix_if_disliked(color).to_argb(), color.to_argb());
    }
}
