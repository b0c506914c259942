//! The catalogue of color roles.
//!
//! A role is a stable identifier such as `on_primary_container`. Its
//! resolution rule depends on the spec version and lives in
//! [`spec2021`](crate::spec2021) and [`spec2025`](crate::spec2025); this
//! module only names roles and orders them.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemeError;

macro_rules! roles {
    ($($variant:ident => $name:literal,)*) => {
        /// A semantic color role.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
        pub enum Role {
            $($variant,)*
        }

        impl Role {
            /// Every role, standard roles first, then key colors, then the
            /// 2025 dim roles.
            pub const ALL: [Self; Self::COUNT] = [$(Self::$variant,)*];

            /// snake_case name, e.g. `surface_container_high`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

roles! {
    Primary => "primary",
    OnPrimary => "on_primary",
    PrimaryContainer => "primary_container",
    OnPrimaryContainer => "on_primary_container",
    PrimaryFixed => "primary_fixed",
    PrimaryFixedDim => "primary_fixed_dim",
    OnPrimaryFixed => "on_primary_fixed",
    OnPrimaryFixedVariant => "on_primary_fixed_variant",
    Secondary => "secondary",
    OnSecondary => "on_secondary",
    SecondaryContainer => "secondary_container",
    OnSecondaryContainer => "on_secondary_container",
    SecondaryFixed => "secondary_fixed",
    SecondaryFixedDim => "secondary_fixed_dim",
    OnSecondaryFixed => "on_secondary_fixed",
    OnSecondaryFixedVariant => "on_secondary_fixed_variant",
    Tertiary => "tertiary",
    OnTertiary => "on_tertiary",
    TertiaryContainer => "tertiary_container",
    OnTertiaryContainer => "on_tertiary_container",
    TertiaryFixed => "tertiary_fixed",
    TertiaryFixedDim => "tertiary_fixed_dim",
    OnTertiaryFixed => "on_tertiary_fixed",
    OnTertiaryFixedVariant => "on_tertiary_fixed_variant",
    Error => "error",
    OnError => "on_error",
    ErrorContainer => "error_container",
    OnErrorContainer => "on_error_container",
    Surface => "surface",
    OnSurface => "on_surface",
    SurfaceDim => "surface_dim",
    SurfaceBright => "surface_bright",
    SurfaceContainerLowest => "surface_container_lowest",
    SurfaceContainerLow => "surface_container_low",
    SurfaceContainer => "surface_container",
    SurfaceContainerHigh => "surface_container_high",
    SurfaceContainerHighest => "surface_container_highest",
    SurfaceVariant => "surface_variant",
    OnSurfaceVariant => "on_surface_variant",
    Background => "background",
    OnBackground => "on_background",
    Outline => "outline",
    OutlineVariant => "outline_variant",
    Shadow => "shadow",
    Scrim => "scrim",
    InverseSurface => "inverse_surface",
    InverseOnSurface => "inverse_on_surface",
    InversePrimary => "inverse_primary",
    SurfaceTint => "surface_tint",
    PrimaryPaletteKeyColor => "primary_palette_key_color",
    SecondaryPaletteKeyColor => "secondary_palette_key_color",
    TertiaryPaletteKeyColor => "tertiary_palette_key_color",
    NeutralPaletteKeyColor => "neutral_palette_key_color",
    NeutralVariantPaletteKeyColor => "neutral_variant_palette_key_color",
    ErrorPaletteKeyColor => "error_palette_key_color",
    PrimaryDim => "primary_dim",
    SecondaryDim => "secondary_dim",
    TertiaryDim => "tertiary_dim",
    ErrorDim => "error_dim",
}

impl Role {
    pub const COUNT: usize = 59;

    const ALL_SLICE: &[Self] = &Self::ALL;

    /// The roles every scheme exposes, in catalogue order.
    pub const STANDARD: &[Self] = Self::ALL_SLICE.split_at(49).0;

    /// Position in [`ALL`](Self::ALL), usable as an arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look a role up by name, ignoring case. Words may be joined by `_`
    /// or `-`, or not separated at all: `onPrimary`, `on-primary` and
    /// `ON_PRIMARY` are the same role.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnknownRole`] if nothing matches.
    pub fn from_name(name: &str) -> Result<Self, SchemeError> {
        let wanted = normalize_name(name);
        Self::ALL
            .into_iter()
            .find(|role| normalize_name(role.name()) == wanted)
            .ok_or_else(|| SchemeError::UnknownRole(name.to_string()))
    }

    /// Only `_fixed_dim` roles are exempt from the 2025 background tone
    /// snapping.
    #[must_use]
    pub const fn is_fixed_dim(self) -> bool {
        matches!(self, Self::PrimaryFixedDim | Self::SecondaryFixedDim | Self::TertiaryFixedDim)
    }
}

// One separator style per name: `_` wins if present, otherwise `-`.
fn normalize_name(name: &str) -> String {
    let stripped = if name.contains('_') {
        name.replace('_', "")
    } else {
        name.replace('-', "")
    };
    stripped.to_lowercase()
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn catalogue_is_consistent() {
        assert_eq!(Role::ALL.len(), Role::COUNT);
        for (i, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i, "{role}");
        }
        assert_eq!(Role::STANDARD.len(), 49);
        assert_eq!(Role::STANDARD.last(), Some(&Role::SurfaceTint));
    }

    #[test]
    fn names_are_unique_after_normalizing() {
        let names: HashSet<String> = Role::ALL.iter().map(|r| normalize_name(r.name())).collect();
        assert_eq!(names.len(), Role::COUNT);
    }

    #[test]
    fn lookup_accepts_any_separator_and_case() {
        for name in ["on_primary_container", "on-primary-container", "ON_PRIMARY_CONTAINER", "onPrimaryContainer"] {
            assert_eq!(Role::from_name(name), Ok(Role::OnPrimaryContainer), "{name}");
        }
        assert_eq!("surface_tint".parse::<Role>(), Ok(Role::SurfaceTint));
    }

    #[test]
    fn lookup_rejects_unknown() {
        assert_eq!(Role::from_name("primary_shade"), Err(SchemeError::UnknownRole("primary_shade".into())));
        assert!(Role::from_name("").is_err());
    }

    #[test]
    fn fixed_dim_roles() {
        let dims: Vec<Role> = Role::ALL.into_iter().filter(|r| r.is_fixed_dim()).collect();
        assert_eq!(dims, vec![Role::PrimaryFixedDim, Role::SecondaryFixedDim, Role::TertiaryFixedDim]);
        assert!(dims.iter().all(|r| r.name().ends_with("_fixed_dim")));
    }
}
