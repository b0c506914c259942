//! Tone resolution: from a role's record to its final tone.
//!
//! ```text
//! base tone ── contrast against background ── pair delta ── band snap
//!                                                              │
//!                          2021: bounded re-check of contrast ◄┤
//!                          2025: repair toward every limit    ◄┘
//! ```
//!
//! The per-version rules follow the published algorithms closely. They
//! can leave a tone short of its contrast target in corner cases (a pair
//! expansion clamped at 0 or 100, a 2025 band snap crossing the target),
//! so each version ends with a check that moves the tone the least
//! distance needed to satisfy the limits again.

use monet_hct::contrast::{darker, lighter, ratio_of_tones};
use monet_hct::math::clamp_f64;
use tracing::trace;

use crate::config::SpecVersion;
use crate::dynamic_color::{RoleSpec, foreground_tone, tone_prefers_light_foreground};
use crate::dynamic_scheme::DynamicScheme;
use crate::role::Role;
use crate::tone_delta_pair::{DeltaConstraint, ToneDeltaPair};

/// Tone of a role the active table does not define.
pub const MISSING_ROLE_TONE: f64 = 50.0;

/// Slack allowed when re-checking a resolved contrast ratio.
const RATIO_SLACK: f64 = 0.05;

/// Tolerance for delta comparisons between tones.
const TONE_EPSILON: f64 = 1e-9;

/// Passes of the 2021 pair re-check before giving up.
const MAX_PAIR_PASSES: usize = 3;

pub fn tone(s: &DynamicScheme, role: Role, spec: &RoleSpec) -> f64 {
    match s.spec_version() {
        SpecVersion::Spec2021 => tone_2021(s, role, spec),
        SpecVersion::Spec2025 => {
            let tone = tone_2025(s, role, spec);
            repair_2025(s, role, spec, tone)
        }
    }
}

/// Background tone and the ratio `spec` asks for against it, when the
/// role has both.
fn contrast_target(s: &DynamicScheme, spec: &RoleSpec) -> Option<(f64, f64)> {
    let background = (spec.background)(s)?;
    let curve = (spec.contrast_curve)(s)?;
    Some((s.tone_of(background), curve.get(s.contrast_level())))
}

/// The ratio actually reachable against `bg_tone`, capped at `desired`.
fn achievable_ratio(bg_tone: f64, desired: f64) -> f64 {
    desired.min(ratio_of_tones(bg_tone, 0.0).max(ratio_of_tones(bg_tone, 100.0)))
}

fn meets(bg_tone: f64, tone: f64, desired: f64) -> bool {
    ratio_of_tones(bg_tone, tone) >= achievable_ratio(bg_tone, desired) - RATIO_SLACK
}

/// Keep `tone` if it reaches `ratio` against `bg_tone`; otherwise the
/// foreground tone that does.
fn reach(tone: f64, bg_tone: f64, ratio: f64) -> f64 {
    if ratio_of_tones(bg_tone, tone) >= ratio { tone } else { foreground_tone(bg_tone, ratio) }
}

/// [`reach`], and at reduced contrast also let a tone with more contrast
/// than asked for drift toward the background. It never moves away, so a
/// lower level never reads stronger than a higher one.
fn with_contrast(s: &DynamicScheme, tone: f64, bg_tone: f64, ratio: f64) -> f64 {
    if s.contrast_level() >= 0.0 || ratio_of_tones(bg_tone, tone) < ratio {
        return reach(tone, bg_tone, ratio);
    }
    let relaxed = foreground_tone(bg_tone, ratio);
    if ratio_of_tones(bg_tone, relaxed) < ratio_of_tones(bg_tone, tone) { relaxed } else { tone }
}

/// Text on two backgrounds at once: find a tone clearing both, preferring
/// the light side when either background wants light text.
fn with_second_background(s: &DynamicScheme, spec: &RoleSpec, tone: f64, bg_tone: f64, ratio: f64) -> f64 {
    let Some(second) = (spec.second_background)(s) else {
        return tone;
    };
    let second_tone = s.tone_of(second);
    let upper = bg_tone.max(second_tone);
    let lower = bg_tone.min(second_tone);
    if ratio_of_tones(upper, tone) >= ratio && ratio_of_tones(lower, tone) >= ratio {
        return tone;
    }

    let light = lighter(upper, ratio);
    let dark = darker(lower, ratio);
    if tone_prefers_light_foreground(bg_tone) || tone_prefers_light_foreground(second_tone) {
        return light.unwrap_or(100.0);
    }
    match (light, dark) {
        (Some(light), None) => light,
        (_, dark) => dark.unwrap_or(0.0),
    }
}

// ─── 2021 ────────────────────────────────────────────────────────────────────

fn tone_2021(s: &DynamicScheme, role: Role, spec: &RoleSpec) -> f64 {
    if let Some(tone) = (spec.tone_delta_pair)(s).and_then(|pair| paired_tone_2021(s, role, spec, &pair)) {
        return tone;
    }

    let base = (spec.tone)(s);
    let Some((bg_tone, ratio)) = contrast_target(s, spec) else {
        return base;
    };
    let mut tone = with_contrast(s, base, bg_tone, ratio);

    // Backgrounds keep out of 50..60, where neither black nor white text
    // reads well.
    if spec.is_background && (50.0..60.0).contains(&tone) {
        tone = if ratio_of_tones(49.0, bg_tone) >= ratio { 49.0 } else { 60.0 };
    }
    with_second_background(s, spec, tone, bg_tone, ratio)
}

/// Tones of a nearer/farther pair, kept `delta` apart with the farther one
/// on the far side from the background.
struct PairTones {
    nearer: f64,
    farther: f64,
    delta: f64,
    /// +1 in dark schemes (farther is lighter), -1 in light ones.
    direction: f64,
}

impl PairTones {
    const fn gap(&self) -> f64 {
        (self.farther - self.nearer) * self.direction
    }

    /// Push the farther tone out, then the nearer one back, until `delta`
    /// apart or both are pinned.
    fn expand(&mut self) {
        if self.gap() < self.delta {
            self.farther = clamp_f64(0.0, 100.0, self.nearer + self.delta * self.direction);
            if self.gap() < self.delta {
                self.nearer = clamp_f64(0.0, 100.0, self.farther - self.delta * self.direction);
            }
        }
    }

    fn snap_nearer_out_of_band(&mut self) {
        if self.direction > 0.0 {
            self.nearer = 60.0;
            self.farther = self.farther.max(self.nearer + self.delta);
        } else {
            self.nearer = 49.0;
            self.farther = self.farther.min(self.nearer - self.delta);
        }
    }

    fn avoid_band(&mut self, stay_together: bool) {
        let band = 50.0..60.0;
        if band.contains(&self.nearer) {
            self.snap_nearer_out_of_band();
        } else if band.contains(&self.farther) {
            if stay_together {
                self.snap_nearer_out_of_band();
            } else {
                self.farther = if self.direction > 0.0 { 60.0 } else { 49.0 };
            }
        }
    }
}

fn paired_tone_2021(s: &DynamicScheme, role: Role, spec: &RoleSpec, pair: &ToneDeltaPair) -> Option<f64> {
    let (nearer, farther) =
        if pair.a_is_nearer(s.is_dark()) { (pair.role_a, pair.role_b) } else { (pair.role_b, pair.role_a) };
    let nearer_spec = s.role_spec(nearer)?;
    let farther_spec = s.role_spec(farther)?;

    let mut tones = PairTones {
        nearer: (nearer_spec.tone)(s),
        farther: (farther_spec.tone)(s),
        delta: pair.delta,
        direction: if s.is_dark() { 1.0 } else { -1.0 },
    };

    let level = s.contrast_level();
    let targets = match ((spec.background)(s), (nearer_spec.contrast_curve)(s), (farther_spec.contrast_curve)(s)) {
        (Some(bg), Some(near_curve), Some(far_curve)) => {
            Some((s.tone_of(bg), near_curve.get(level), far_curve.get(level)))
        }
        _ => None,
    };

    // Pairs only move to reach their targets. Pulling one member toward
    // the background would make the expansion push the other one out.
    if let Some((bg_tone, near_ratio, far_ratio)) = targets {
        tones.nearer = reach(tones.nearer, bg_tone, near_ratio);
        tones.farther = reach(tones.farther, bg_tone, far_ratio);
    }
    tones.expand();
    tones.avoid_band(pair.stay_together);

    if let Some((bg_tone, near_ratio, far_ratio)) = targets {
        for pass in 0..MAX_PAIR_PASSES {
            let mut changed = false;
            if !meets(bg_tone, tones.nearer, near_ratio) {
                tones.nearer = foreground_tone(bg_tone, near_ratio);
                changed = true;
            }
            if !meets(bg_tone, tones.farther, far_ratio) {
                tones.farther = foreground_tone(bg_tone, far_ratio);
                changed = true;
            }
            if !changed {
                break;
            }
            tones.expand();
            trace!(%role, pass, nearer = tones.nearer, farther = tones.farther, "re-checked pair contrast");
        }
    }

    Some(if role == nearer { tones.nearer } else { tones.farther })
}

// ─── 2025 ────────────────────────────────────────────────────────────────────

/// Backgrounds other than fixed-dim jump over 50..65: up to 65 from 57,
/// down to 49 below it.
fn snap_background_2025(role: Role, spec: &RoleSpec, tone: f64) -> f64 {
    if !spec.is_background || role.is_fixed_dim() {
        tone
    } else if tone >= 57.0 {
        clamp_f64(65.0, 100.0, tone)
    } else {
        clamp_f64(0.0, 49.0, tone)
    }
}

/// The partner's resolved tone and this role's signed offset from it.
fn pair_reference(s: &DynamicScheme, role: Role, pair: &ToneDeltaPair) -> Option<(f64, f64)> {
    let reference = pair.partner(role)?;
    let sign = if role == pair.role_a { 1.0 } else { -1.0 };
    Some((s.tone_of(reference), pair.signed_delta(s.is_dark()) * sign))
}

fn tone_2025(s: &DynamicScheme, role: Role, spec: &RoleSpec) -> f64 {
    let pair = (spec.tone_delta_pair)(s);
    if let Some((pair, (reference, offset))) = pair.and_then(|p| pair_reference(s, role, &p).map(|r| (p, r))) {
        let own = (spec.tone)(s);
        let target = reference + offset;
        let mut tone = match pair.constraint {
            DeltaConstraint::Exact => clamp_f64(0.0, 100.0, target),
            DeltaConstraint::Nearer if offset > 0.0 => clamp_f64(0.0, 100.0, clamp_f64(reference, target, own)),
            DeltaConstraint::Nearer => clamp_f64(0.0, 100.0, clamp_f64(target, reference, own)),
            DeltaConstraint::Farther if offset > 0.0 => clamp_f64(target, 100.0, own),
            DeltaConstraint::Farther => clamp_f64(0.0, target, own),
        };
        if let Some((bg_tone, ratio)) = contrast_target(s, spec) {
            tone = with_contrast(s, tone, bg_tone, ratio);
        }
        return snap_background_2025(role, spec, tone);
    }

    let base = (spec.tone)(s);
    let Some((bg_tone, ratio)) = contrast_target(s, spec) else {
        return base;
    };
    let tone = snap_background_2025(role, spec, with_contrast(s, base, bg_tone, ratio));
    with_second_background(s, spec, tone, bg_tone, ratio)
}

/// What a 2025 tone must satisfy, highest priority first. When not all
/// can hold, the lowest priorities give way.
struct Limits {
    /// Background tone and the ratio to reach against it.
    contrast: Option<(f64, f64)>,
    /// Constraint, reference tone and signed offset from it.
    pair: Option<(DeltaConstraint, f64, f64)>,
    /// Stay out of the 49..65 band.
    band: bool,
}

impl Limits {
    const CONTRAST: u8 = 3;
    const PAIR: u8 = 2;
    const BAND: u8 = 1;
    const NEARER: u8 = 0;

    fn new(s: &DynamicScheme, role: Role, spec: &RoleSpec) -> Self {
        let contrast = contrast_target(s, spec);
        let pair = (spec.tone_delta_pair)(s)
            .and_then(|p| pair_reference(s, role, &p).map(|(reference, offset)| (p.constraint, reference, offset)));
        Self { contrast, pair, band: spec.is_background && !role.is_fixed_dim() }
    }

    /// Whether `tone` meets every limit of priority `floor` or above.
    fn admits(&self, tone: f64, floor: u8) -> bool {
        if Self::CONTRAST >= floor && self.contrast.is_some_and(|(bg_tone, ratio)| !meets(bg_tone, tone, ratio)) {
            return false;
        }
        if let Some((constraint, reference, offset)) = self.pair {
            let (priority, ok) = match constraint {
                DeltaConstraint::Farther if offset > 0.0 => (Self::PAIR, tone - reference >= offset - TONE_EPSILON),
                DeltaConstraint::Farther => (Self::PAIR, tone - reference <= offset + TONE_EPSILON),
                DeltaConstraint::Exact => {
                    (Self::PAIR, (tone - clamp_f64(0.0, 100.0, reference + offset)).abs() < TONE_EPSILON)
                }
                DeltaConstraint::Nearer => {
                    let (low, high) =
                        if offset > 0.0 { (reference, reference + offset) } else { (reference + offset, reference) };
                    (Self::NEARER, (low..=high).contains(&tone))
                }
            };
            if priority >= floor && !ok {
                return false;
            }
        }
        !(self.band && Self::BAND >= floor && tone > 49.0 && tone < 65.0)
    }
}

/// Move `tone` the least distance that satisfies the highest-priority
/// limits that can be satisfied together. Ties go to the darker tone.
fn repair_2025(s: &DynamicScheme, role: Role, spec: &RoleSpec, tone: f64) -> f64 {
    let limits = Limits::new(s, role, spec);
    if limits.admits(tone, Limits::NEARER) {
        return tone;
    }

    let mut candidates = vec![tone];
    if let Some((bg_tone, ratio)) = limits.contrast {
        candidates.push(foreground_tone(bg_tone, ratio));
    }
    if let Some((_, reference, offset)) = limits.pair {
        candidates.extend([reference, clamp_f64(0.0, 100.0, reference + offset)]);
    }
    if limits.band {
        candidates.extend([49.0, 65.0]);
    }
    candidates.extend((0..=100).map(f64::from));

    for floor in Limits::NEARER..=Limits::CONTRAST {
        let best = candidates
            .iter()
            .copied()
            .filter(|&c| limits.admits(c, floor))
            .min_by(|a, b| (a - tone).abs().total_cmp(&(b - tone).abs()).then(a.total_cmp(b)));
        if let Some(repaired) = best {
            trace!(%role, from = tone, to = repaired, floor, "repaired tone");
            return repaired;
        }
    }
    tone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::contrast_level::Contrast;
    use crate::variant::Variant;
    use monet_hct::{Argb, Hct};

    fn scheme(dark: bool, level: f64, spec: SpecVersion) -> DynamicScheme {
        DynamicScheme::new(
            Hct::from_argb(Argb(0xFF5C_6BC0)),
            Variant::TonalSpot,
            dark,
            Contrast::new(level).unwrap(),
            Platform::Phone,
            spec,
        )
    }

    fn tone_of(s: &DynamicScheme, role: Role) -> f64 {
        s.tone(role).unwrap()
    }

    // ── Pair geometry ───────────────────────────────────────────────

    #[test]
    fn expand_pushes_farther_first() {
        let mut tones = PairTones { nearer: 90.0, farther: 85.0, delta: 10.0, direction: -1.0 };
        tones.expand();
        assert_eq!((tones.nearer, tones.farther), (90.0, 80.0));
    }

    #[test]
    fn expand_pulls_nearer_back_when_farther_is_pinned() {
        let mut tones = PairTones { nearer: 95.0, farther: 99.0, delta: 10.0, direction: 1.0 };
        tones.expand();
        assert_eq!((tones.nearer, tones.farther), (90.0, 100.0));
    }

    #[test]
    fn band_moves_pairs_together() {
        let mut tones = PairTones { nearer: 40.0, farther: 55.0, delta: 10.0, direction: 1.0 };
        tones.avoid_band(true);
        assert_eq!((tones.nearer, tones.farther), (60.0, 70.0));

        let mut apart = PairTones { nearer: 40.0, farther: 55.0, delta: 10.0, direction: 1.0 };
        apart.avoid_band(false);
        assert_eq!((apart.nearer, apart.farther), (40.0, 60.0));
    }

    // ── 2021 ────────────────────────────────────────────────────────

    #[test]
    fn container_pair_keeps_delta() {
        for dark in [false, true] {
            for level in [-1.0, 0.0, 0.5, 1.0] {
                let s = scheme(dark, level, SpecVersion::Spec2021);
                let gap = (tone_of(&s, Role::Primary) - tone_of(&s, Role::PrimaryContainer)).abs();
                assert!(gap >= 10.0 - 1e-6, "dark {dark} level {level}: gap {gap}");
            }
        }
    }

    #[test]
    fn backgrounds_avoid_the_awkward_band() {
        for level in [-1.0, 0.0, 0.5, 1.0] {
            let s = scheme(false, level, SpecVersion::Spec2021);
            for role in [Role::Primary, Role::PrimaryContainer, Role::PrimaryFixed, Role::PrimaryFixedDim] {
                let t = tone_of(&s, role);
                assert!(!(50.0..60.0).contains(&t), "{role} at level {level}: {t}");
            }
        }
    }

    #[test]
    fn reduced_contrast_leaves_fixed_pair_in_place() {
        // The pair already clears 1:1, so lower levels must not shift it.
        for dark in [false, true] {
            for level in [-1.0, -0.5, 0.0] {
                let s = scheme(dark, level, SpecVersion::Spec2021);
                assert_eq!(tone_of(&s, Role::PrimaryFixed), 90.0, "dark {dark} level {level}");
                assert_eq!(tone_of(&s, Role::PrimaryFixedDim), 80.0, "dark {dark} level {level}");
            }
        }
    }

    #[test]
    fn reduced_contrast_only_moves_toward_the_background() {
        let standard = scheme(false, 0.0, SpecVersion::Spec2021);
        let reduced = scheme(false, -1.0, SpecVersion::Spec2021);
        let bg = tone_of(&standard, Role::Primary);
        let before = ratio_of_tones(bg, tone_of(&standard, Role::OnPrimary));
        let after = ratio_of_tones(bg, tone_of(&reduced, Role::OnPrimary));
        assert!(after < before, "{after:.2} vs {before:.2}");
        assert!(after >= 4.5 - 0.05, "{after:.2}");
    }

    // ── 2025 ────────────────────────────────────────────────────────

    #[test]
    fn fixed_dim_is_exactly_five_darker() {
        for dark in [false, true] {
            let s = scheme(dark, 0.0, SpecVersion::Spec2025);
            let gap = tone_of(&s, Role::PrimaryFixed) - tone_of(&s, Role::PrimaryFixedDim);
            assert!((gap - 5.0).abs() < 1e-6, "dark {dark}: gap {gap}");
        }
    }

    #[test]
    fn fixed_takes_the_light_standard_container_tone() {
        let light = scheme(false, 0.0, SpecVersion::Spec2025);
        assert_eq!(tone_of(&light, Role::PrimaryFixed), tone_of(&light, Role::PrimaryContainer));

        // Dark schemes keep their own palettes but read the light tone.
        let dark = scheme(true, 1.0, SpecVersion::Spec2025);
        let light_twin = dark.derive(false, Contrast::STANDARD);
        assert_eq!(tone_of(&dark, Role::PrimaryFixed), tone_of(&light_twin, Role::PrimaryContainer));
    }

    #[test]
    fn repair_leaves_satisfied_tones_alone() {
        let s = scheme(false, 0.0, SpecVersion::Spec2025);
        let spec = s.role_spec(Role::OnSurface).unwrap();
        let tone = tone_2025(&s, Role::OnSurface, &spec);
        assert_eq!(repair_2025(&s, Role::OnSurface, &spec, tone), tone);
    }

    #[test]
    fn limits_rank_contrast_over_band() {
        let limits = Limits { contrast: Some((100.0, 4.5)), pair: None, band: true };
        // 60 falls short on white; 49 clears both contrast and band.
        assert!(!limits.admits(60.0, Limits::NEARER));
        assert!(limits.admits(49.0, Limits::NEARER));
        assert!(!limits.admits(90.0, Limits::CONTRAST));
    }
}
