//! Style variants.

use std::fmt;
use std::str::FromStr;

use crate::config::SpecVersion;
use crate::error::SchemeError;

/// How a seed is turned into palettes.
///
/// Each variant is a set of hue and chroma rules, one per palette; the
/// rules themselves live in [`palettes`](crate::palettes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum Variant {
    /// Calm, low-chroma accents around the seed hue.
    #[default]
    TonalSpot,
    /// The seed itself as primary container, chroma kept.
    Fidelity,
    /// Like fidelity, with an analogous tertiary.
    Content,
    /// Grayscale.
    Monochrome,
    /// Nearly grayscale, a hint of the seed hue.
    Neutral,
    /// Maximum chroma primary, rotated secondary and tertiary.
    Vibrant,
    /// Primary hue rotated away from the seed.
    Expressive,
    /// Colorful accents over gray surfaces.
    Rainbow,
    /// Primary and secondary rotated back from the seed.
    FruitSalad,
}

impl Variant {
    pub const ALL: [Self; 9] = [
        Self::TonalSpot,
        Self::Fidelity,
        Self::Content,
        Self::Monochrome,
        Self::Neutral,
        Self::Vibrant,
        Self::Expressive,
        Self::Rainbow,
        Self::FruitSalad,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TonalSpot => "tonal-spot",
            Self::Fidelity => "fidelity",
            Self::Content => "content",
            Self::Monochrome => "monochrome",
            Self::Neutral => "neutral",
            Self::Vibrant => "vibrant",
            Self::Expressive => "expressive",
            Self::Rainbow => "rainbow",
            Self::FruitSalad => "fruit-salad",
        }
    }

    /// Whether the 2025 tables define this variant.
    #[must_use]
    pub const fn supports(self, spec: SpecVersion) -> bool {
        match spec {
            SpecVersion::Spec2021 => true,
            SpecVersion::Spec2025 => {
                matches!(self, Self::TonalSpot | Self::Neutral | Self::Vibrant | Self::Expressive)
            }
        }
    }

    /// Fidelity and content keep the seed's chroma.
    #[must_use]
    pub const fn is_fidelity(self) -> bool {
        matches!(self, Self::Fidelity | Self::Content)
    }

    #[must_use]
    pub const fn is_monochrome(self) -> bool {
        matches!(self, Self::Monochrome)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; `-`, `_` and spaces are ignored, so `TONAL_SPOT`,
/// `tonal-spot` and `tonalspot` all parse.
impl FromStr for Variant {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|v| squash(v.name()) == wanted)
            .ok_or_else(|| SchemeError::UnknownVariant(s.to_string()))
    }
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '-' | '_' | ' ')).map(|c| c.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>(), Ok(variant));
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!("FRUIT_SALAD".parse::<Variant>(), Ok(Variant::FruitSalad));
        assert_eq!("tonalspot".parse::<Variant>(), Ok(Variant::TonalSpot));
        assert_eq!("pastel".parse::<Variant>(), Err(SchemeError::UnknownVariant("pastel".into())));
    }

    #[test]
    fn spec_2025_covers_four_variants() {
        let supported: Vec<Variant> =
            Variant::ALL.into_iter().filter(|v| v.supports(SpecVersion::Spec2025)).collect();
        assert_eq!(supported, vec![
            Variant::TonalSpot,
            Variant::Neutral,
            Variant::Vibrant,
            Variant::Expressive
        ]);
        assert!(Variant::ALL.iter().all(|v| v.supports(SpecVersion::Spec2021)));
    }
}
