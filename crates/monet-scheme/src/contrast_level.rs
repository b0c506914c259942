//! The user-facing contrast preference.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemeError;

/// A contrast level in `[-1, 1]`.
///
/// `0` is the default design. Negative levels trade legibility for a
/// softer look; positive levels raise every contrast curve toward its
/// accessible maximum.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Contrast(f64);

impl Contrast {
    pub const REDUCED: Self = Self(-1.0);
    pub const STANDARD: Self = Self(0.0);
    pub const MEDIUM: Self = Self(0.5);
    pub const HIGH: Self = Self(1.0);

    /// # Errors
    ///
    /// [`SchemeError::InvalidContrast`] for NaN or a level outside `[-1, 1]`.
    pub fn new(level: f64) -> Result<Self, SchemeError> {
        if (-1.0..=1.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(SchemeError::InvalidContrast(level))
        }
    }

    #[inline]
    #[must_use]
    pub const fn level(self) -> f64 {
        self.0
    }
}

impl Default for Contrast {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<f64> for Contrast {
    type Error = SchemeError;

    fn try_from(level: f64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Contrast> for f64 {
    fn from(contrast: Contrast) -> Self {
        contrast.0
    }
}

impl fmt::Display for Contrast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts a named level (`reduced`, `low`, `standard`, `medium`, `high`)
/// or a number.
impl FromStr for Contrast {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reduced" | "low" => Ok(Self::REDUCED),
            "standard" => Ok(Self::STANDARD),
            "medium" => Ok(Self::MEDIUM),
            "high" => Ok(Self::HIGH),
            other => other.parse::<f64>().map_or(Err(SchemeError::InvalidContrast(f64::NAN)), Self::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_closed_range() {
        for level in [-1.0, -0.25, 0.0, 0.5, 1.0] {
            assert_eq!(Contrast::new(level).map(Contrast::level), Ok(level));
        }
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        for level in [-1.000_1, 1.5, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(Contrast::new(level), Err(SchemeError::InvalidContrast(level)));
        }
        assert!(matches!(Contrast::new(f64::NAN), Err(SchemeError::InvalidContrast(v)) if v.is_nan()));
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("high".parse::<Contrast>(), Ok(Contrast::HIGH));
        assert_eq!("Reduced".parse::<Contrast>(), Ok(Contrast::REDUCED));
        assert_eq!("low".parse::<Contrast>(), Ok(Contrast::REDUCED));
        assert_eq!("0.5".parse::<Contrast>(), Ok(Contrast::MEDIUM));
        assert!("2".parse::<Contrast>().is_err());
        assert!("loud".parse::<Contrast>().is_err());
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(Contrast::default(), Contrast::STANDARD);
    }
}
