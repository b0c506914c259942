//! Role table for the 2021 spec.
//!
//! Tones are mostly fixed per brightness, with contrast curves pulling
//! foregrounds away from their backgrounds as the contrast level rises.
//! Dim roles do not exist here.

use monet_hct::dislike::fix_if_disliked;
use monet_hct::Hct;

use crate::contrast_curve::ContrastCurve;
use crate::dynamic_color::{PairFn, RoleSpec, ToneFn, foreground_tone};
use crate::dynamic_scheme::DynamicScheme;
use crate::palettes::PaletteKind;
use crate::role::Role;
use crate::tone_delta_pair::{TonePolarity, ToneDeltaPair};

use crate::palettes::PaletteKind::{Error, Neutral, NeutralVariant, Primary, Secondary, Tertiary};

/// The brighter of the two surface extremes: what text is checked against.
pub fn highest_surface(s: &DynamicScheme) -> Option<Role> {
    Some(if s.is_dark() { Role::SurfaceBright } else { Role::SurfaceDim })
}

/// The tone, searched away from `tone`, at which `hue` reaches `chroma`.
/// Stops at the chroma peak or within 0.4 of the target.
pub fn find_desired_chroma_by_tone(hue: f64, chroma: f64, tone: f64, by_decreasing_tone: bool) -> f64 {
    let mut answer = tone;
    let mut closest = Hct::solve(hue, chroma, tone);
    if closest.chroma() >= chroma {
        return answer;
    }

    let mut peak = closest.chroma();
    let step = if by_decreasing_tone { -1.0 } else { 1.0 };
    while closest.chroma() < chroma {
        answer += step;
        if !(0.0..=100.0).contains(&answer) {
            return answer.clamp(0.0, 100.0);
        }
        let candidate = Hct::solve(hue, chroma, answer);
        if peak > candidate.chroma() || (candidate.chroma() - chroma).abs() < 0.4 {
            break;
        }
        if (candidate.chroma() - chroma).abs() < (closest.chroma() - chroma).abs() {
            closest = candidate;
        }
        peak = peak.max(candidate.chroma());
    }
    answer
}

fn curve(low: f64, normal: f64, medium: f64, high: f64) -> Option<ContrastCurve> {
    Some(ContrastCurve::new(low, normal, medium, high))
}

fn key_tone(s: &DynamicScheme, kind: PaletteKind) -> f64 {
    s.palette(kind).key_color().tone()
}

// ─── Accent tones ────────────────────────────────────────────────────────────

fn primary_tone(s: &DynamicScheme) -> f64 {
    if s.is_monochrome() { s.pick(100.0, 0.0) } else { s.pick(80.0, 40.0) }
}

fn primary_container_tone(s: &DynamicScheme) -> f64 {
    if s.is_fidelity() {
        s.source().tone()
    } else if s.is_monochrome() {
        s.pick(85.0, 25.0)
    } else {
        s.pick(30.0, 90.0)
    }
}

fn on_primary_container_tone(s: &DynamicScheme) -> f64 {
    if s.is_fidelity() {
        foreground_tone(primary_container_tone(s), 4.5)
    } else if s.is_monochrome() {
        s.pick(0.0, 100.0)
    } else {
        s.pick(90.0, 30.0)
    }
}

fn secondary_container_tone(s: &DynamicScheme) -> f64 {
    let initial = s.pick(30.0, 90.0);
    if s.is_monochrome() {
        return s.pick(30.0, 85.0);
    }
    if !s.is_fidelity() {
        return initial;
    }
    let palette = s.palette(Secondary);
    find_desired_chroma_by_tone(palette.hue(), palette.chroma(), initial, !s.is_dark())
}

fn on_secondary_container_tone(s: &DynamicScheme) -> f64 {
    if s.is_monochrome() {
        s.pick(90.0, 10.0)
    } else if s.is_fidelity() {
        foreground_tone(secondary_container_tone(s), 4.5)
    } else {
        s.pick(90.0, 30.0)
    }
}

fn tertiary_tone(s: &DynamicScheme) -> f64 {
    if s.is_monochrome() { s.pick(90.0, 25.0) } else { s.pick(80.0, 40.0) }
}

fn tertiary_container_tone(s: &DynamicScheme) -> f64 {
    if s.is_monochrome() {
        s.pick(60.0, 49.0)
    } else if s.is_fidelity() {
        fix_if_disliked(s.palette(Tertiary).hct(s.source().tone())).tone()
    } else {
        s.pick(30.0, 90.0)
    }
}

fn on_tertiary_container_tone(s: &DynamicScheme) -> f64 {
    if s.is_monochrome() {
        s.pick(0.0, 100.0)
    } else if s.is_fidelity() {
        foreground_tone(tertiary_container_tone(s), 4.5)
    } else {
        s.pick(90.0, 30.0)
    }
}

/// `mono` for monochrome schemes, `other` for everything else.
fn mono_or(s: &DynamicScheme, mono: f64, other: f64) -> f64 {
    if s.is_monochrome() { mono } else { other }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// Resolution record of `role`, or `None` for the dim roles.
#[allow(clippy::too_many_lines)]
pub fn role(role: Role) -> Option<RoleSpec> {
    let spec = match role {
        Role::PrimaryPaletteKeyColor => RoleSpec::new(Primary, |s| key_tone(s, Primary)),
        Role::SecondaryPaletteKeyColor => RoleSpec::new(Secondary, |s| key_tone(s, Secondary)),
        Role::TertiaryPaletteKeyColor => RoleSpec::new(Tertiary, |s| key_tone(s, Tertiary)),
        Role::NeutralPaletteKeyColor => RoleSpec::new(Neutral, |s| key_tone(s, Neutral)),
        Role::NeutralVariantPaletteKeyColor => RoleSpec::new(NeutralVariant, |s| key_tone(s, NeutralVariant)),
        Role::ErrorPaletteKeyColor => RoleSpec::new(Error, |s| key_tone(s, Error)),

        // ── Surfaces ──
        Role::Background | Role::Surface => RoleSpec::new(Neutral, |s| s.pick(6.0, 98.0)).as_background(),
        Role::OnBackground => RoleSpec::new(Neutral, |s| s.pick(90.0, 10.0))
            .on(|_| Some(Role::Background), |_| curve(3.0, 3.0, 4.5, 7.0)),
        Role::SurfaceDim => RoleSpec::new(Neutral, |s| {
            if s.is_dark() { 6.0 } else { ContrastCurve::new(87.0, 87.0, 80.0, 75.0).get(s.contrast_level()) }
        })
        .as_background(),
        Role::SurfaceBright => RoleSpec::new(Neutral, |s| {
            if s.is_dark() { ContrastCurve::new(24.0, 24.0, 29.0, 34.0).get(s.contrast_level()) } else { 98.0 }
        })
        .as_background(),
        Role::SurfaceContainerLowest => RoleSpec::new(Neutral, |s| {
            if s.is_dark() { ContrastCurve::new(4.0, 4.0, 2.0, 0.0).get(s.contrast_level()) } else { 100.0 }
        })
        .as_background(),
        Role::SurfaceContainerLow => RoleSpec::new(Neutral, |s| {
            let curve = if s.is_dark() {
                ContrastCurve::new(10.0, 10.0, 11.0, 12.0)
            } else {
                ContrastCurve::new(96.0, 96.0, 96.0, 95.0)
            };
            curve.get(s.contrast_level())
        })
        .as_background(),
        Role::SurfaceContainer => RoleSpec::new(Neutral, |s| {
            let curve = if s.is_dark() {
                ContrastCurve::new(12.0, 12.0, 16.0, 20.0)
            } else {
                ContrastCurve::new(94.0, 94.0, 92.0, 90.0)
            };
            curve.get(s.contrast_level())
        })
        .as_background(),
        Role::SurfaceContainerHigh => RoleSpec::new(Neutral, |s| {
            let curve = if s.is_dark() {
                ContrastCurve::new(17.0, 17.0, 21.0, 25.0)
            } else {
                ContrastCurve::new(92.0, 92.0, 88.0, 85.0)
            };
            curve.get(s.contrast_level())
        })
        .as_background(),
        Role::SurfaceContainerHighest => RoleSpec::new(Neutral, |s| {
            let curve = if s.is_dark() {
                ContrastCurve::new(22.0, 22.0, 26.0, 30.0)
            } else {
                ContrastCurve::new(90.0, 90.0, 84.0, 80.0)
            };
            curve.get(s.contrast_level())
        })
        .as_background(),
        Role::OnSurface => {
            RoleSpec::new(Neutral, |s| s.pick(90.0, 10.0)).on(highest_surface, |_| curve(4.5, 7.0, 11.0, 21.0))
        }
        Role::SurfaceVariant => RoleSpec::new(NeutralVariant, |s| s.pick(30.0, 90.0)).as_background(),
        Role::OnSurfaceVariant => {
            RoleSpec::new(NeutralVariant, |s| s.pick(80.0, 30.0)).on(highest_surface, |_| curve(3.0, 4.5, 7.0, 11.0))
        }
        Role::InverseSurface => RoleSpec::new(Neutral, |s| s.pick(90.0, 20.0)),
        Role::InverseOnSurface => RoleSpec::new(Neutral, |s| s.pick(20.0, 95.0))
            .on(|_| Some(Role::InverseSurface), |_| curve(4.5, 7.0, 11.0, 21.0)),
        Role::Outline => {
            RoleSpec::new(NeutralVariant, |s| s.pick(60.0, 50.0)).on(highest_surface, |_| curve(1.5, 3.0, 4.5, 7.0))
        }
        Role::OutlineVariant => {
            RoleSpec::new(NeutralVariant, |s| s.pick(30.0, 80.0)).on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5))
        }
        Role::Shadow | Role::Scrim => RoleSpec::new(Neutral, |_| 0.0),
        Role::SurfaceTint => RoleSpec::new(Primary, |s| s.pick(80.0, 40.0)).as_background(),

        // ── Primary ──
        Role::Primary => RoleSpec::new(Primary, primary_tone)
            .as_background()
            .on(highest_surface, |_| curve(3.0, 4.5, 7.0, 7.0))
            .paired(|_| Some(container_pair(Role::PrimaryContainer, Role::Primary))),
        Role::OnPrimary => RoleSpec::new(Primary, |s| {
            if s.is_monochrome() { s.pick(10.0, 90.0) } else { s.pick(20.0, 100.0) }
        })
            .on(|_| Some(Role::Primary), |_| curve(4.5, 7.0, 11.0, 21.0)),
        Role::PrimaryContainer => RoleSpec::new(Primary, primary_container_tone)
            .as_background()
            .on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5))
            .paired(|_| Some(container_pair(Role::PrimaryContainer, Role::Primary))),
        Role::OnPrimaryContainer => RoleSpec::new(Primary, on_primary_container_tone)
            .on(|_| Some(Role::PrimaryContainer), |_| curve(3.0, 4.5, 7.0, 11.0)),
        Role::InversePrimary => RoleSpec::new(Primary, |s| s.pick(40.0, 80.0))
            .on(|_| Some(Role::InverseSurface), |_| curve(3.0, 4.5, 7.0, 7.0)),

        // ── Secondary ──
        Role::Secondary => RoleSpec::new(Secondary, |s| s.pick(80.0, 40.0))
            .as_background()
            .on(highest_surface, |_| curve(3.0, 4.5, 7.0, 7.0))
            .paired(|_| Some(container_pair(Role::SecondaryContainer, Role::Secondary))),
        Role::OnSecondary => RoleSpec::new(Secondary, |s| {
            if s.is_monochrome() { s.pick(10.0, 100.0) } else { s.pick(20.0, 100.0) }
        })
            .on(|_| Some(Role::Secondary), |_| curve(4.5, 7.0, 11.0, 21.0)),
        Role::SecondaryContainer => RoleSpec::new(Secondary, secondary_container_tone)
            .as_background()
            .on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5))
            .paired(|_| Some(container_pair(Role::SecondaryContainer, Role::Secondary))),
        Role::OnSecondaryContainer => RoleSpec::new(Secondary, on_secondary_container_tone)
            .on(|_| Some(Role::SecondaryContainer), |_| curve(3.0, 4.5, 7.0, 11.0)),

        // ── Tertiary ──
        Role::Tertiary => RoleSpec::new(Tertiary, tertiary_tone)
            .as_background()
            .on(highest_surface, |_| curve(3.0, 4.5, 7.0, 7.0))
            .paired(|_| Some(container_pair(Role::TertiaryContainer, Role::Tertiary))),
        Role::OnTertiary => RoleSpec::new(Tertiary, |s| {
            if s.is_monochrome() { s.pick(10.0, 90.0) } else { s.pick(20.0, 100.0) }
        })
            .on(|_| Some(Role::Tertiary), |_| curve(4.5, 7.0, 11.0, 21.0)),
        Role::TertiaryContainer => RoleSpec::new(Tertiary, tertiary_container_tone)
            .as_background()
            .on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5))
            .paired(|_| Some(container_pair(Role::TertiaryContainer, Role::Tertiary))),
        Role::OnTertiaryContainer => RoleSpec::new(Tertiary, on_tertiary_container_tone)
            .on(|_| Some(Role::TertiaryContainer), |_| curve(3.0, 4.5, 7.0, 11.0)),

        // ── Error ──
        Role::Error => RoleSpec::new(Error, |s| s.pick(80.0, 40.0))
            .as_background()
            .on(highest_surface, |_| curve(3.0, 4.5, 7.0, 7.0))
            .paired(|_| Some(container_pair(Role::ErrorContainer, Role::Error))),
        Role::OnError => {
            RoleSpec::new(Error, |s| s.pick(20.0, 100.0)).on(|_| Some(Role::Error), |_| curve(4.5, 7.0, 11.0, 21.0))
        }
        Role::ErrorContainer => RoleSpec::new(Error, |s| s.pick(30.0, 90.0))
            .as_background()
            .on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5))
            .paired(|_| Some(container_pair(Role::ErrorContainer, Role::Error))),
        Role::OnErrorContainer => RoleSpec::new(Error, |s| mono_or(s, s.pick(90.0, 10.0), s.pick(90.0, 30.0)))
            .on(|_| Some(Role::ErrorContainer), |_| curve(3.0, 4.5, 7.0, 11.0)),

        // ── Fixed ──
        Role::PrimaryFixed => fixed(Primary, |s| mono_or(s, 40.0, 90.0), |_| Some(PRIMARY_FIXED_PAIR)),
        Role::PrimaryFixedDim => fixed(Primary, |s| mono_or(s, 30.0, 80.0), |_| Some(PRIMARY_FIXED_PAIR)),
        Role::OnPrimaryFixed => RoleSpec::new(Primary, |s| mono_or(s, 100.0, 10.0))
            .on(|_| Some(Role::PrimaryFixedDim), |_| curve(4.5, 7.0, 11.0, 21.0))
            .also_on(|_| Some(Role::PrimaryFixed)),
        Role::OnPrimaryFixedVariant => RoleSpec::new(Primary, |s| mono_or(s, 90.0, 30.0))
            .on(|_| Some(Role::PrimaryFixedDim), |_| curve(3.0, 4.5, 7.0, 11.0))
            .also_on(|_| Some(Role::PrimaryFixed)),
        Role::SecondaryFixed => fixed(Secondary, |s| mono_or(s, 80.0, 90.0), |_| Some(SECONDARY_FIXED_PAIR)),
        Role::SecondaryFixedDim => fixed(Secondary, |s| mono_or(s, 70.0, 80.0), |_| Some(SECONDARY_FIXED_PAIR)),
        Role::OnSecondaryFixed => RoleSpec::new(Secondary, |_| 10.0)
            .on(|_| Some(Role::SecondaryFixedDim), |_| curve(4.5, 7.0, 11.0, 21.0))
            .also_on(|_| Some(Role::SecondaryFixed)),
        Role::OnSecondaryFixedVariant => RoleSpec::new(Secondary, |s| mono_or(s, 25.0, 30.0))
            .on(|_| Some(Role::SecondaryFixedDim), |_| curve(3.0, 4.5, 7.0, 11.0))
            .also_on(|_| Some(Role::SecondaryFixed)),
        Role::TertiaryFixed => fixed(Tertiary, |s| mono_or(s, 40.0, 90.0), |_| Some(TERTIARY_FIXED_PAIR)),
        Role::TertiaryFixedDim => fixed(Tertiary, |s| mono_or(s, 30.0, 80.0), |_| Some(TERTIARY_FIXED_PAIR)),
        Role::OnTertiaryFixed => RoleSpec::new(Tertiary, |s| mono_or(s, 100.0, 10.0))
            .on(|_| Some(Role::TertiaryFixedDim), |_| curve(4.5, 7.0, 11.0, 21.0))
            .also_on(|_| Some(Role::TertiaryFixed)),
        Role::OnTertiaryFixedVariant => RoleSpec::new(Tertiary, |s| mono_or(s, 90.0, 30.0))
            .on(|_| Some(Role::TertiaryFixedDim), |_| curve(3.0, 4.5, 7.0, 11.0))
            .also_on(|_| Some(Role::TertiaryFixed)),

        Role::PrimaryDim | Role::SecondaryDim | Role::TertiaryDim | Role::ErrorDim => return None,
    };
    Some(spec)
}

const fn container_pair(container: Role, accent: Role) -> ToneDeltaPair {
    ToneDeltaPair::new(container, accent, 10.0, TonePolarity::Nearer, false)
}

/// Fixed and fixed-dim share one pair: fixed is lighter by 10 and they
/// cross the 50–59 band together.
const PRIMARY_FIXED_PAIR: ToneDeltaPair =
    ToneDeltaPair::new(Role::PrimaryFixed, Role::PrimaryFixedDim, 10.0, TonePolarity::Lighter, true);
const SECONDARY_FIXED_PAIR: ToneDeltaPair =
    ToneDeltaPair::new(Role::SecondaryFixed, Role::SecondaryFixedDim, 10.0, TonePolarity::Lighter, true);
const TERTIARY_FIXED_PAIR: ToneDeltaPair =
    ToneDeltaPair::new(Role::TertiaryFixed, Role::TertiaryFixedDim, 10.0, TonePolarity::Lighter, true);

fn fixed(palette: PaletteKind, tone: ToneFn, pair: PairFn) -> RoleSpec {
    RoleSpec::new(palette, tone).as_background().on(highest_surface, |_| curve(1.0, 1.0, 3.0, 4.5)).paired(pair)
}
