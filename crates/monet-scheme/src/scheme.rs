//! The public face of the engine: build a scheme, read role colors.

use monet_hct::{Argb, Hct};
use tracing::debug;

use crate::config::{Overrides, Platform, SchemeConfig, SpecVersion};
use crate::contrast_level::Contrast;
use crate::dynamic_scheme::DynamicScheme;
use crate::error::SchemeError;
use crate::role::Role;
use crate::variant::Variant;

/// A resolved color scheme. Roles are computed on first access and
/// cached.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    scheme: DynamicScheme,
}

impl ColorScheme {
    #[must_use]
    pub fn builder() -> ColorSchemeBuilder {
        ColorSchemeBuilder::default()
    }

    /// Default scheme (tonal spot, light, standard contrast) for `seed`.
    #[must_use]
    pub fn from_seed(seed: Argb) -> Self {
        Self::builder().seed(seed).build()
    }

    #[must_use]
    pub fn from_config(config: &SchemeConfig) -> Self {
        let effective = config.spec_version.for_variant(config.variant);
        if effective != config.spec_version {
            debug!(
                variant = %config.variant,
                requested = %config.spec_version,
                using = %effective,
                "variant has no rules for the requested spec version, falling back"
            );
        }
        debug!(
            seed = %config.seed,
            variant = %config.variant,
            dark = config.dark,
            contrast = %config.contrast,
            platform = %config.platform,
            spec = %effective,
            "building color scheme"
        );
        Self { scheme: DynamicScheme::from_config(config) }
    }

    /// The underlying scheme, for tone-level access.
    #[must_use]
    pub const fn dynamic(&self) -> &DynamicScheme {
        &self.scheme
    }

    #[must_use]
    pub fn source(&self) -> Argb {
        self.scheme.source().to_argb()
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    /// Color of `role`, or `None` for a role the spec version lacks.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<Argb> {
        self.scheme.argb(role)
    }

    #[must_use]
    pub fn hct(&self, role: Role) -> Option<Hct> {
        self.scheme.hct(role)
    }

    /// Color of the role called `name`.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnknownRole`] if no role has that name or this
    /// scheme's spec version does not define it.
    pub fn get_by_name(&self, name: &str) -> Result<Argb, SchemeError> {
        let role = Role::from_name(name)?;
        self.get(role).ok_or_else(|| SchemeError::UnknownRole(name.to_string()))
    }

    /// The standard roles with their colors, in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Argb)> + '_ {
        Role::STANDARD.iter().filter_map(|&role| self.get(role).map(|argb| (role, argb)))
    }

    /// Every role this scheme defines, key colors and dim roles included.
    pub fn iter_all(&self) -> impl Iterator<Item = (Role, Argb)> + '_ {
        Role::ALL.into_iter().filter_map(|role| self.get(role).map(|argb| (role, argb)))
    }
}

/// Fluent [`SchemeConfig`].
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct ColorSchemeBuilder {
    config: SchemeConfig,
}

impl ColorSchemeBuilder {
    pub const fn seed(mut self, seed: Argb) -> Self {
        self.config.seed = seed;
        self
    }

    pub const fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant;
        self
    }

    pub const fn dark(mut self, dark: bool) -> Self {
        self.config.dark = dark;
        self
    }

    pub const fn contrast(mut self, contrast: Contrast) -> Self {
        self.config.contrast = contrast;
        self
    }

    /// # Errors
    ///
    /// [`SchemeError::InvalidContrast`] outside `[-1, 1]`.
    pub fn contrast_level(self, level: f64) -> Result<Self, SchemeError> {
        Ok(self.contrast(Contrast::new(level)?))
    }

    pub const fn platform(mut self, platform: Platform) -> Self {
        self.config.platform = platform;
        self
    }

    pub const fn spec_version(mut self, spec: SpecVersion) -> Self {
        self.config.spec_version = spec;
        self
    }

    pub const fn overrides(mut self, overrides: Overrides) -> Self {
        self.config.overrides = overrides;
        self
    }

    pub const fn config(&self) -> &SchemeConfig {
        &self.config
    }

    #[must_use]
    pub fn build(self) -> ColorScheme {
        ColorScheme::from_config(&self.config)
    }
}

impl From<SchemeConfig> for ColorSchemeBuilder {
    fn from(config: SchemeConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic_color::RoleSpec;
    use crate::palettes::PaletteKind;
    use crate::tone_delta_pair::DeltaConstraint;
    use monet_hct::contrast::ratio_of_tones;
    use monet_hct::TonalPalette;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const SEED: Argb = Argb(0xFF5C_6BC0);
    const LEVELS: [f64; 4] = [-1.0, 0.0, 0.5, 1.0];
    /// Rounding to 8-bit channels moves tones a little.
    const REALIZED_SLACK: f64 = 0.15;

    const SEEDS: [Argb; 5] =
        [Argb(0xFF5C_6BC0), Argb(0xFFFF_0000), Argb(0xFF00_FF00), Argb(0xFFB3_A300), Argb(0xFF80_8080)];

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn scheme(
        seed: Argb,
        variant: Variant,
        dark: bool,
        level: f64,
        platform: Platform,
        spec: SpecVersion,
    ) -> ColorScheme {
        ColorScheme::builder()
            .seed(seed)
            .variant(variant)
            .dark(dark)
            .contrast_level(level)
            .unwrap()
            .platform(platform)
            .spec_version(spec)
            .build()
    }

    fn realized_tone(s: &ColorScheme, role: Role) -> f64 {
        s.get(role).unwrap().lstar()
    }

    /// Every (scheme, role, spec) a property should hold for.
    fn each_role(
        spec: SpecVersion,
        variants: &[Variant],
        platforms: &[Platform],
        mut check: impl FnMut(&ColorScheme, Role, RoleSpec),
    ) {
        for seed in SEEDS {
            for &variant in variants {
                for &platform in platforms {
                    for dark in [false, true] {
                        for level in LEVELS {
                            let s = scheme(seed, variant, dark, level, platform, spec);
                            for role in Role::ALL {
                                if let Some(record) = s.dynamic().role_spec(role) {
                                    check(&s, role, record);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn assert_contrast(s: &ColorScheme, role: Role, record: &RoleSpec) {
        let d = s.dynamic();
        let (Some(bg), Some(curve)) = ((record.background)(d), (record.contrast_curve)(d)) else {
            return;
        };
        let level = d.contrast_level();
        let bg_tone = d.tone(bg).unwrap();
        let wanted = curve.get(level).min(ratio_of_tones(bg_tone, 0.0).max(ratio_of_tones(bg_tone, 100.0)));
        let ratio = ratio_of_tones(realized_tone(s, role), realized_tone(s, bg));
        assert!(
            ratio >= wanted - REALIZED_SLACK,
            "{role} on {bg} ({:?} dark {} level {level} seed {}): {ratio:.2} < {wanted:.2}",
            d.variant(),
            d.is_dark(),
            s.source()
        );
    }

    // ── End to end ──────────────────────────────────────────────────

    #[test]
    fn primary_for_indigo_seed() {
        let light = scheme(SEED, Variant::TonalSpot, false, 0.0, Platform::Phone, SpecVersion::Spec2021);
        let dark = scheme(SEED, Variant::TonalSpot, true, 0.0, Platform::Phone, SpecVersion::Spec2021);
        let expected = TonalPalette::from_hue_and_chroma(Hct::from_argb(SEED).hue(), 36.0);

        assert_eq!(light.dynamic().tone(Role::Primary), Some(40.0));
        assert_eq!(dark.dynamic().tone(Role::Primary), Some(80.0));
        assert_eq!(light.get(Role::Primary), Some(expected.tone(40.0)));
        assert_eq!(dark.get(Role::Primary), Some(expected.tone(80.0)));

        let (l, d) = (light.hct(Role::Primary).unwrap(), dark.hct(Role::Primary).unwrap());
        assert!(approx_eq(l.hue(), d.hue(), 2.0), "hue {} vs {}", l.hue(), d.hue());
    }

    #[test]
    fn indigo_seed_standard_roles() {
        let light = scheme(SEED, Variant::TonalSpot, false, 0.0, Platform::Phone, SpecVersion::Spec2021);
        let dark = scheme(SEED, Variant::TonalSpot, true, 0.0, Platform::Phone, SpecVersion::Spec2021);
        let tone = |s: &ColorScheme, r: Role| s.dynamic().tone(r).unwrap();

        assert_eq!(tone(&light, Role::OnPrimary), 100.0);
        assert_eq!(tone(&light, Role::PrimaryContainer), 90.0);
        assert_eq!(tone(&light, Role::SurfaceDim), 87.0);
        assert_eq!(tone(&light, Role::OnPrimaryFixed), 10.0);
        assert_eq!(tone(&dark, Role::OnPrimary), 20.0);
        assert_eq!(tone(&dark, Role::PrimaryContainer), 30.0);
        assert_eq!(tone(&dark, Role::SurfaceBright), 24.0);
    }

    #[test]
    fn default_seed_is_the_fallback() {
        let s = ColorScheme::builder().build();
        assert_eq!(s.source(), crate::FALLBACK_COLOR);
    }

    // ── Lookup ──────────────────────────────────────────────────────

    #[test]
    fn lookup_by_name() {
        let s = ColorScheme::from_seed(SEED);
        assert_eq!(s.get_by_name("on-primary"), Ok(s.get(Role::OnPrimary).unwrap()));
        assert_eq!(s.get_by_name("nope"), Err(SchemeError::UnknownRole("nope".into())));
        // 2021 has no dim roles.
        assert_eq!(s.get_by_name("primary_dim"), Err(SchemeError::UnknownRole("primary_dim".into())));
    }

    #[test]
    fn iteration_covers_standard_roles() {
        let s = ColorScheme::from_seed(SEED);
        let roles: Vec<Role> = s.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, Role::STANDARD.to_vec());
        assert_eq!(s.iter_all().count(), Role::COUNT - 4);

        let new = scheme(SEED, Variant::TonalSpot, false, 0.0, Platform::Phone, SpecVersion::Spec2025);
        assert_eq!(new.iter_all().count(), Role::COUNT);
    }

    #[test]
    fn contrast_level_is_validated() {
        assert!(ColorScheme::builder().contrast_level(1.5).is_err());
        assert!(ColorScheme::builder().contrast_level(f64::NAN).is_err());
        assert!(ColorScheme::builder().contrast_level(-1.0).is_ok());
    }

    #[test]
    fn spec_fallback_for_unsupported_variants() {
        let unsupported =
            [Variant::Fidelity, Variant::Content, Variant::Monochrome, Variant::Rainbow, Variant::FruitSalad];
        for variant in unsupported {
            let s = scheme(SEED, variant, false, 0.0, Platform::Phone, SpecVersion::Spec2025);
            assert_eq!(s.dynamic().spec_version(), SpecVersion::Spec2021, "{variant}");
        }
        let s = scheme(SEED, Variant::Vibrant, false, 0.0, Platform::Phone, SpecVersion::Spec2025);
        assert_eq!(s.dynamic().spec_version(), SpecVersion::Spec2025);
    }

    #[test]
    fn overrides_reach_the_palettes() {
        let overrides = Overrides { tertiary: Some(Argb(0xFF00_8000)), ..Overrides::default() };
        let s = ColorScheme::builder().seed(SEED).overrides(overrides).build();
        let tertiary = s.dynamic().palette(PaletteKind::Tertiary).hue();
        let green = Hct::from_argb(Argb(0xFF00_8000)).hue();
        assert!(approx_eq(tertiary, green, 1.0), "tertiary hue {tertiary} vs {green}");
    }

    // ── Contrast ────────────────────────────────────────────────────

    #[test]
    fn contrast_holds_2021() {
        each_role(SpecVersion::Spec2021, &Variant::ALL, &[Platform::Phone], |s, role, record| {
            assert_contrast(s, role, &record);
        });
    }

    #[test]
    fn contrast_holds_2025() {
        let variants = [Variant::TonalSpot, Variant::Neutral, Variant::Vibrant, Variant::Expressive];
        each_role(SpecVersion::Spec2025, &variants, &[Platform::Phone, Platform::Watch], |s, role, record| {
            assert_contrast(s, role, &record);
        });
    }

    #[test]
    fn fixed_text_reads_on_both_fixed_colors() {
        for dark in [false, true] {
            for level in LEVELS {
                let s = scheme(SEED, Variant::TonalSpot, dark, level, Platform::Phone, SpecVersion::Spec2021);
                let text = realized_tone(&s, Role::OnPrimaryFixed);
                for bg in [Role::PrimaryFixed, Role::PrimaryFixedDim] {
                    let ratio = ratio_of_tones(text, realized_tone(&s, bg));
                    let wanted = crate::ContrastCurve::new(4.5, 7.0, 11.0, 21.0).get(level).min(4.5);
                    assert!(ratio >= wanted - REALIZED_SLACK, "on {bg} dark {dark} level {level}: {ratio:.2}");
                }
            }
        }
    }

    // ── Tone delta ──────────────────────────────────────────────────

    #[test]
    fn tone_delta_holds_2021() {
        each_role(SpecVersion::Spec2021, &Variant::ALL, &[Platform::Phone], |s, role, record| {
            let d = s.dynamic();
            if let Some(pair) = (record.tone_delta_pair)(d) {
                let gap = (d.tone(pair.role_a).unwrap() - d.tone(pair.role_b).unwrap()).abs();
                assert!(gap >= pair.delta - 1e-6, "{role}: {} / {} gap {gap}", pair.role_a, pair.role_b);
            }
        });
    }

    #[test]
    fn tone_delta_holds_2025_where_it_is_a_minimum() {
        let variants = [Variant::TonalSpot, Variant::Neutral, Variant::Vibrant, Variant::Expressive];
        each_role(SpecVersion::Spec2025, &variants, &[Platform::Phone, Platform::Watch], |s, role, record| {
            let d = s.dynamic();
            let Some(pair) = (record.tone_delta_pair)(d) else {
                return;
            };
            let gap = (d.tone(pair.role_a).unwrap() - d.tone(pair.role_b).unwrap()).abs();
            match pair.constraint {
                DeltaConstraint::Farther => assert!(gap >= pair.delta - 1e-6, "{role}: gap {gap}"),
                DeltaConstraint::Exact => assert!(gap <= pair.delta + 1e-6, "{role}: gap {gap}"),
                DeltaConstraint::Nearer => {}
            }
        });
    }

    // ── Role graph ──────────────────────────────────────────────────

    #[test]
    fn role_graph_is_acyclic() {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit(d: &DynamicScheme, role: Role, marks: &mut HashMap<Role, Mark>, path: &mut Vec<Role>) {
            match marks.get(&role) {
                Some(Mark::Done) => return,
                Some(Mark::Visiting) => panic!("cycle: {path:?} -> {role}"),
                None => {}
            }
            marks.insert(role, Mark::Visiting);
            path.push(role);
            if let Some(record) = d.role_spec(role) {
                let partner = (record.tone_delta_pair)(d).and_then(|p| p.partner(role));
                for dep in record.dependencies(d, role) {
                    // 2021 pairs read their partner's base tone, not its
                    // resolved one, so that edge is not followed.
                    if d.spec_version() == SpecVersion::Spec2021 && Some(dep) == partner {
                        continue;
                    }
                    visit(d, dep, marks, path);
                }
            }
            path.pop();
            marks.insert(role, Mark::Done);
        }

        for spec in [SpecVersion::Spec2021, SpecVersion::Spec2025] {
            for platform in [Platform::Phone, Platform::Watch] {
                for dark in [false, true] {
                    let s = scheme(SEED, Variant::TonalSpot, dark, 0.0, platform, spec);
                    let mut marks = HashMap::new();
                    for role in Role::ALL {
                        visit(s.dynamic(), role, &mut marks, &mut Vec::new());
                    }
                }
            }
        }
    }

    #[test]
    fn every_role_resolves_in_every_configuration() {
        for spec in [SpecVersion::Spec2021, SpecVersion::Spec2025] {
            for variant in Variant::ALL {
                for platform in [Platform::Phone, Platform::Watch] {
                    let s = scheme(SEED, variant, true, 1.0, platform, spec);
                    for (role, _) in s.iter_all() {
                        let tone = s.dynamic().tone(role).unwrap();
                        assert!((0.0..=100.0).contains(&tone), "{role} in {variant}: {tone}");
                    }
                }
            }
        }
    }

    // ── Monotonicity ────────────────────────────────────────────────

    #[test]
    fn on_primary_contrast_rises_with_level() {
        for dark in [false, true] {
            let ratios: Vec<f64> = [-1.0, -0.5, 0.0, 0.5, 1.0]
                .into_iter()
                .map(|level| {
                    let s = scheme(SEED, Variant::TonalSpot, dark, level, Platform::Phone, SpecVersion::Spec2021);
                    ratio_of_tones(realized_tone(&s, Role::OnPrimary), realized_tone(&s, Role::Primary))
                })
                .collect();
            for pair in ratios.windows(2) {
                assert!(pair[1] >= pair[0] - 0.01, "dark {dark}: {ratios:?}");
            }
        }
    }

    /// Each role's ratio against its background, where it has one.
    fn ratios(s: &ColorScheme) -> HashMap<Role, (f64, f64)> {
        let d = s.dynamic();
        Role::ALL
            .into_iter()
            .filter_map(|role| {
                let record = d.role_spec(role)?;
                (record.contrast_curve)(d)?;
                let bg_tone = d.tone((record.background)(d)?)?;
                Some((role, (bg_tone, ratio_of_tones(bg_tone, d.tone(role)?))))
            })
            .collect()
    }

    #[test]
    fn contrast_never_drops_as_level_rises() {
        let levels = [-1.0, -0.5, 0.0, 0.5, 1.0];
        let versions = [
            (SpecVersion::Spec2021, Variant::ALL.to_vec()),
            (SpecVersion::Spec2025, vec![Variant::TonalSpot, Variant::Neutral, Variant::Vibrant, Variant::Expressive]),
        ];
        for (spec, variants) in versions {
            for seed in SEEDS {
                for &variant in &variants {
                    for dark in [false, true] {
                        let at = |level| ratios(&scheme(seed, variant, dark, level, Platform::Phone, spec));
                        let by_level: Vec<_> = levels.into_iter().map(at).collect();
                        for (i, pair) in by_level.windows(2).enumerate() {
                            for (role, &(bg_low, low)) in &pair[0] {
                                let Some(&(bg_high, high)) = pair[1].get(role) else {
                                    continue;
                                };
                                // Only comparable while the background stays put.
                                if (bg_low - bg_high).abs() > 1e-9 {
                                    continue;
                                }
                                assert!(
                                    high >= low - 0.01,
                                    "{spec:?} {seed} {variant} dark {dark} {role}: {low:.2} at {} > {high:.2} at {}",
                                    levels[i],
                                    levels[i + 1]
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
