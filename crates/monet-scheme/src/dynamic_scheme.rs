//! A scheme's inputs plus a lazily filled cache of resolved roles.
//!
//! Roles resolve on first request and depend on each other through
//! backgrounds and tone pairs. Each role has one slot in an arena indexed
//! by [`Role::index`]; a slot is written once and never changes, so a
//! scheme can be shared between threads after construction.

use std::sync::OnceLock;

use monet_hct::{Argb, Hct, TonalPalette};

use crate::config::{Platform, SchemeConfig, SpecVersion};
use crate::contrast_level::Contrast;
use crate::dynamic_color::RoleSpec;
use crate::palettes::{PaletteContext, PaletteKind, Palettes};
use crate::resolve;
use crate::role::Role;
use crate::variant::Variant;
use crate::{spec2021, spec2025};

#[derive(Debug, Clone, Default)]
struct Slot {
    tone: OnceLock<f64>,
    hct: OnceLock<Hct>,
}

#[derive(Debug, Clone)]
pub struct DynamicScheme {
    source: Hct,
    variant: Variant,
    dark: bool,
    contrast: Contrast,
    platform: Platform,
    spec: SpecVersion,
    palettes: Palettes,
    slots: Box<[Slot]>,
}

impl DynamicScheme {
    /// A scheme for `source` with palettes derived from it alone. A spec
    /// version the variant does not support falls back to 2021.
    #[must_use]
    pub fn new(
        source: Hct,
        variant: Variant,
        dark: bool,
        contrast: Contrast,
        platform: Platform,
        spec: SpecVersion,
    ) -> Self {
        Self::from_config(&SchemeConfig {
            seed: source.to_argb(),
            variant,
            dark,
            contrast,
            platform,
            spec_version: spec,
            ..SchemeConfig::default()
        })
    }

    #[must_use]
    pub fn from_config(config: &SchemeConfig) -> Self {
        let source = Hct::from_argb(config.seed);
        let spec = config.spec_version.for_variant(config.variant);
        let context = PaletteContext { variant: config.variant, spec, dark: config.dark, platform: config.platform };
        let palettes = context.generate(&source, &config.overrides);
        Self {
            source,
            variant: config.variant,
            dark: config.dark,
            contrast: config.contrast,
            platform: config.platform,
            spec,
            palettes,
            slots: empty_slots(),
        }
    }

    /// Same palettes, different brightness and contrast. Nothing resolved
    /// in `self` carries over.
    #[must_use]
    pub fn derive(&self, dark: bool, contrast: Contrast) -> Self {
        Self {
            source: self.source,
            variant: self.variant,
            dark,
            contrast,
            platform: self.platform,
            spec: self.spec,
            palettes: self.palettes.clone(),
            slots: empty_slots(),
        }
    }

    // ─── Inputs ──────────────────────────────────────────────────────────

    #[must_use]
    pub const fn source(&self) -> &Hct {
        &self.source
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    #[must_use]
    pub const fn contrast(&self) -> Contrast {
        self.contrast
    }

    #[must_use]
    pub const fn contrast_level(&self) -> f64 {
        self.contrast.level()
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn is_phone(&self) -> bool {
        self.platform == Platform::Phone
    }

    /// The spec version in effect, after falling back for the variant.
    #[must_use]
    pub const fn spec_version(&self) -> SpecVersion {
        self.spec
    }

    #[must_use]
    pub const fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    #[must_use]
    pub fn palette(&self, kind: PaletteKind) -> &TonalPalette {
        self.palettes.get(kind)
    }

    pub(crate) const fn is_monochrome(&self) -> bool {
        self.variant.is_monochrome()
    }

    pub(crate) const fn is_fidelity(&self) -> bool {
        self.variant.is_fidelity()
    }

    /// `dark` in dark schemes, `light` in light ones.
    pub(crate) const fn pick(&self, dark: f64, light: f64) -> f64 {
        if self.dark { dark } else { light }
    }

    // ─── Roles ───────────────────────────────────────────────────────────

    /// Whether this scheme's spec version defines `role`.
    #[must_use]
    pub fn supports(&self, role: Role) -> bool {
        self.role_spec(role).is_some()
    }

    pub(crate) fn role_spec(&self, role: Role) -> Option<RoleSpec> {
        match self.spec {
            SpecVersion::Spec2021 => spec2021::role(role),
            SpecVersion::Spec2025 => spec2025::role(role),
        }
    }

    /// Resolved tone of `role`, or `None` if the spec version lacks it.
    #[must_use]
    pub fn tone(&self, role: Role) -> Option<f64> {
        self.supports(role).then(|| self.tone_of(role))
    }

    /// Resolved color of `role` in HCT.
    #[must_use]
    pub fn hct(&self, role: Role) -> Option<Hct> {
        let spec = self.role_spec(role)?;
        Some(*self.slots[role.index()].hct.get_or_init(|| {
            let palette = self.palette(spec.palette);
            let tone = self.tone_of(role);
            let multiplier = spec.chroma_multiplier.map_or(1.0, |m| m(self));
            if (multiplier - 1.0).abs() < f64::EPSILON {
                Hct::from_argb(palette.tone(tone))
            } else {
                Hct::solve(palette.hue(), palette.chroma() * multiplier, tone)
            }
        }))
    }

    #[must_use]
    pub fn argb(&self, role: Role) -> Option<Argb> {
        self.hct(role).map(|hct| hct.to_argb())
    }

    /// Resolved tone, for the role tables. Roles missing from the spec
    /// version resolve to mid gray; the tables never ask for one.
    pub(crate) fn tone_of(&self, role: Role) -> f64 {
        *self.slots[role.index()].tone.get_or_init(|| {
            self.role_spec(role).map_or(resolve::MISSING_ROLE_TONE, |spec| resolve::tone(self, role, &spec))
        })
    }

    /// Tone `role` resolves to in the light, standard-contrast version of
    /// this scheme.
    pub(crate) fn light_standard_tone(&self, role: Role) -> f64 {
        self.derive(false, Contrast::STANDARD).tone_of(role)
    }
}

fn empty_slots() -> Box<[Slot]> {
    (0..Role::COUNT).map(|_| Slot::default()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEED: Argb = Argb(0xFF5C_6BC0);

    fn scheme(dark: bool, spec: SpecVersion) -> DynamicScheme {
        DynamicScheme::new(Hct::from_argb(SEED), Variant::TonalSpot, dark, Contrast::STANDARD, Platform::Phone, spec)
    }

    #[test]
    fn dim_roles_exist_only_in_2025() {
        let old = scheme(false, SpecVersion::Spec2021);
        let new = scheme(false, SpecVersion::Spec2025);
        assert_eq!(old.tone(Role::PrimaryDim), None);
        assert!(new.tone(Role::PrimaryDim).is_some());
        assert!(old.supports(Role::Primary) && new.supports(Role::Primary));
    }

    #[test]
    fn unsupported_variant_falls_back_to_2021() {
        let s = DynamicScheme::new(
            Hct::from_argb(SEED),
            Variant::Fidelity,
            false,
            Contrast::STANDARD,
            Platform::Phone,
            SpecVersion::Spec2025,
        );
        assert_eq!(s.spec_version(), SpecVersion::Spec2021);
    }

    #[test]
    fn resolution_is_memoized() {
        let s = scheme(true, SpecVersion::Spec2021);
        let first = s.hct(Role::OnPrimaryContainer);
        assert_eq!(s.hct(Role::OnPrimaryContainer), first);
        assert!(s.slots[Role::PrimaryContainer.index()].tone.get().is_some(), "dependency cached too");
    }

    #[test]
    fn derive_keeps_palettes_and_drops_cache() {
        let s = scheme(true, SpecVersion::Spec2021);
        let _ = s.tone(Role::Primary);
        let light = s.derive(false, Contrast::HIGH);
        assert!(!light.is_dark());
        assert_eq!(light.palettes(), s.palettes());
        assert!(light.slots[Role::Primary.index()].tone.get().is_none());
    }

    #[test]
    fn chroma_multiplier_changes_chroma_not_tone() {
        let s = scheme(false, SpecVersion::Spec2025);
        let (Some(hct), Some(tone)) = (s.hct(Role::SurfaceContainerHighest), s.tone(Role::SurfaceContainerHighest))
        else {
            panic!("surface container highest must resolve");
        };
        assert!((hct.tone() - tone).abs() < 0.5, "tone {} vs {tone}", hct.tone());
        assert!(hct.chroma() > s.palette(PaletteKind::Neutral).chroma(), "chroma {}", hct.chroma());
    }
}
