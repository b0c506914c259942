//! Scheme build parameters.

use std::fmt;
use std::str::FromStr;

use monet_hct::Argb;
use monet_quantize::FALLBACK_COLOR;

use crate::contrast_level::Contrast;
use crate::error::SchemeError;
use crate::variant::Variant;

/// Target device class. The 2025 tables differ per platform; the 2021
/// tables ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum Platform {
    #[default]
    Phone,
    Watch,
}

impl Platform {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Watch => "watch",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(Self::Phone),
            "watch" => Ok(Self::Watch),
            _ => Err(SchemeError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Which revision of the role tables resolves the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecVersion {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "2021"))]
    Spec2021,
    #[cfg_attr(feature = "serde", serde(rename = "2025"))]
    Spec2025,
}

impl SpecVersion {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spec2021 => "2021",
            Self::Spec2025 => "2025",
        }
    }

    /// The version actually used for `variant`: 2025 falls back to 2021
    /// for variants it does not define.
    #[must_use]
    pub const fn for_variant(self, variant: Variant) -> Self {
        if variant.supports(self) { self } else { Self::Spec2021 }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecVersion {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().trim_start_matches("spec") {
            "2021" => Ok(Self::Spec2021),
            "2025" => Ok(Self::Spec2025),
            _ => Err(SchemeError::UnknownSpecVersion(s.to_string())),
        }
    }
}

/// Seeds that replace the main seed for individual palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default, rename_all = "kebab-case"))]
pub struct Overrides {
    pub secondary: Option<Argb>,
    pub tertiary: Option<Argb>,
    pub neutral: Option<Argb>,
    pub neutral_variant: Option<Argb>,
    pub error: Option<Argb>,
}

/// Everything needed to build a [`ColorScheme`](crate::ColorScheme).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default, rename_all = "kebab-case"))]
pub struct SchemeConfig {
    pub seed: Argb,
    pub variant: Variant,
    pub dark: bool,
    pub contrast: Contrast,
    pub platform: Platform,
    pub spec_version: SpecVersion,
    pub overrides: Overrides,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            seed: FALLBACK_COLOR,
            variant: Variant::default(),
            dark: false,
            contrast: Contrast::default(),
            platform: Platform::default(),
            spec_version: SpecVersion::default(),
            overrides: Overrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = SchemeConfig::default();
        assert_eq!(config.seed, Argb(0xFF42_85F4));
        assert_eq!(config.variant, Variant::TonalSpot);
        assert!(!config.dark);
        assert_eq!(config.contrast, Contrast::STANDARD);
        assert_eq!(config.platform, Platform::Phone);
        assert_eq!(config.spec_version, SpecVersion::Spec2021);
        assert_eq!(config.overrides, Overrides::default());
    }

    // ── Serde ───────────────────────────────────────────────────────

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let config = SchemeConfig {
            seed: Argb(0xFF5C_6BC0),
            variant: Variant::Vibrant,
            dark: true,
            contrast: Contrast::new(0.5).unwrap(),
            platform: Platform::Watch,
            spec_version: SpecVersion::Spec2025,
            overrides: Overrides { tertiary: Some(Argb(0xFF00_8000)), ..Overrides::default() },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""spec-version":"2025""#), "{json}");
        assert!(json.contains(r#""platform":"watch""#), "{json}");
        assert_eq!(serde_json::from_str::<SchemeConfig>(&json).unwrap(), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_fields_default_and_validate() {
        let partial: SchemeConfig = serde_json::from_str(r#"{"variant":"fruit-salad","dark":true}"#).unwrap();
        assert_eq!(partial, SchemeConfig { variant: Variant::FruitSalad, dark: true, ..SchemeConfig::default() });
        assert!(serde_json::from_str::<SchemeConfig>(r#"{"contrast":2.0}"#).is_err());
    }

    #[test]
    fn spec_falls_back_for_unsupported_variants() {
        assert_eq!(SpecVersion::Spec2025.for_variant(Variant::Vibrant), SpecVersion::Spec2025);
        let unsupported =
            [Variant::Fidelity, Variant::Content, Variant::Monochrome, Variant::Rainbow, Variant::FruitSalad];
        for variant in unsupported {
            assert_eq!(SpecVersion::Spec2025.for_variant(variant), SpecVersion::Spec2021, "{variant}");
        }
        assert_eq!(SpecVersion::Spec2021.for_variant(Variant::Vibrant), SpecVersion::Spec2021);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Watch".parse::<Platform>(), Ok(Platform::Watch));
        assert_eq!("2025".parse::<SpecVersion>(), Ok(SpecVersion::Spec2025));
        assert_eq!("spec2021".parse::<SpecVersion>(), Ok(SpecVersion::Spec2021));
        assert!("tablet".parse::<Platform>().is_err());
        assert!("2030".parse::<SpecVersion>().is_err());
    }
}
