//! Role table for the 2025 spec.
//!
//! Differences from 2021, in short:
//!
//! - accent tones chase the palette's chroma peak (`t_max_c`) instead of
//!   sitting at fixed tones
//! - surfaces and containers boost neutral chroma with per-variant
//!   multipliers
//! - the watch platform gets its own backgrounds and pairs
//! - each accent has a `_dim` role
//! - foreground tones start from their background and let the contrast
//!   curve push them out
//!
//! Key colors, shadow, scrim and surface tint are unchanged and come from
//! the 2021 table.

use monet_hct::math::clamp_f64;
use monet_hct::{Hct, TonalPalette};

use crate::contrast_curve::ContrastCurve;
use crate::dynamic_color::RoleSpec;
use crate::dynamic_scheme::DynamicScheme;
use crate::palettes::PaletteKind::{Error, Neutral, NeutralVariant, Primary, Secondary, Tertiary};
use crate::role::Role;
use crate::spec2021::{self, highest_surface};
use crate::tone_delta_pair::{DeltaConstraint, TonePolarity, ToneDeltaPair};
use crate::variant::Variant;

// ─── Tone search ─────────────────────────────────────────────────────────────

/// Walk from `tone` one step at a time toward the chroma peak of `hue`,
/// keeping the tone with the most chroma seen. Stops once `chroma` is
/// reached or the walk leaves `[0, 100]`.
#[must_use]
pub fn find_best_tone_for_chroma(hue: f64, chroma: f64, tone: f64, by_decreasing_tone: bool) -> f64 {
    let step = if by_decreasing_tone { -1.0 } else { 1.0 };
    let mut answer = tone;
    let mut best = Hct::solve(hue, chroma, answer);
    let mut tone = tone;
    while best.chroma() < chroma {
        if !(0.0..=100.0).contains(&tone) {
            break;
        }
        tone += step;
        let candidate = Hct::solve(hue, chroma, tone);
        if best.chroma() < candidate.chroma() {
            best = candidate;
            answer = tone;
        }
    }
    answer
}

/// Lightest tone at which `palette` reaches its chroma (scaled by
/// `multiplier`), clamped to `[lower, upper]`.
#[must_use]
pub fn t_max_c_with(palette: &TonalPalette, lower: f64, upper: f64, multiplier: f64) -> f64 {
    let tone = find_best_tone_for_chroma(palette.hue(), palette.chroma() * multiplier, 100.0, true);
    clamp_f64(lower, upper, tone)
}

#[must_use]
pub fn t_max_c(palette: &TonalPalette, lower: f64, upper: f64) -> f64 {
    t_max_c_with(palette, lower, upper, 1.0)
}

/// Darkest tone at which `palette` reaches its chroma, clamped to
/// `[lower, upper]`.
#[must_use]
pub fn t_min_c(palette: &TonalPalette, lower: f64, upper: f64) -> f64 {
    clamp_f64(lower, upper, find_best_tone_for_chroma(palette.hue(), palette.chroma(), 0.0, false))
}

/// The standard curve for a contrast ratio: `ratio` at reduced and
/// standard contrast, stepping up the ladder 3, 4.5, 7, 11, 21 above.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn contrast_curve_for(ratio: f64) -> ContrastCurve {
    const LADDER: [(f64, ContrastCurve); 8] = [
        (1.5, ContrastCurve::new(1.5, 1.5, 3.0, 4.5)),
        (3.0, ContrastCurve::new(3.0, 3.0, 4.5, 7.0)),
        (4.5, ContrastCurve::new(4.5, 4.5, 7.0, 11.0)),
        (6.0, ContrastCurve::new(6.0, 6.0, 7.0, 11.0)),
        (7.0, ContrastCurve::new(7.0, 7.0, 11.0, 21.0)),
        (9.0, ContrastCurve::new(9.0, 9.0, 11.0, 21.0)),
        (11.0, ContrastCurve::new(11.0, 11.0, 21.0, 21.0)),
        (21.0, ContrastCurve::new(21.0, 21.0, 21.0, 21.0)),
    ];
    LADDER
        .iter()
        .find(|(r, _)| *r == ratio)
        .map_or_else(|| ContrastCurve::new(ratio, ratio, 7.0, 21.0), |(_, curve)| *curve)
}

fn curve(ratio: f64) -> Option<ContrastCurve> {
    Some(contrast_curve_for(ratio))
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

/// Resolved tone of whatever `role` sits on, or 50 if it sits on nothing.
/// The starting tone of every 2025 foreground.
fn background_tone(s: &DynamicScheme, role: Role) -> f64 {
    self::role(role).and_then(|spec| (spec.background)(s)).map_or(50.0, |bg| s.tone_of(bg))
}

fn neutral_is_yellow(s: &DynamicScheme) -> bool {
    Hct::is_yellow(s.palette(Neutral).hue())
}

/// Light surface tone: yellow neutrals, Vibrant, everything else.
fn light_surface(s: &DynamicScheme, yellow: f64, vibrant: f64, other: f64) -> f64 {
    if neutral_is_yellow(s) {
        yellow
    } else if s.variant() == Variant::Vibrant {
        vibrant
    } else {
        other
    }
}

/// Text and outlines sit on the extreme surface on phones and on the high
/// container on watches.
fn text_background(s: &DynamicScheme) -> Option<Role> {
    if s.is_phone() { highest_surface(s) } else { Some(Role::SurfaceContainerHigh) }
}

fn surface_dim_multiplier(s: &DynamicScheme) -> f64 {
    match s.variant() {
        Variant::Neutral => 2.5,
        Variant::TonalSpot => 1.7,
        Variant::Expressive if neutral_is_yellow(s) => 2.7,
        Variant::Expressive => 1.75,
        Variant::Vibrant => 1.36,
        _ => 1.0,
    }
}

/// Phone container chroma boost, per variant:
/// `[neutral, tonal spot, expressive on yellow, expressive, vibrant]`.
fn container_multiplier(s: &DynamicScheme, multipliers: [f64; 5]) -> f64 {
    if !s.is_phone() {
        return 1.0;
    }
    match s.variant() {
        Variant::Neutral => multipliers[0],
        Variant::TonalSpot => multipliers[1],
        Variant::Expressive if neutral_is_yellow(s) => multipliers[2],
        Variant::Expressive => multipliers[3],
        Variant::Vibrant => multipliers[4],
        _ => 1.0,
    }
}

/// Container tone: `dark` in dark schemes, `watch` on watches when given,
/// and the light surface tone otherwise.
fn container_tone(s: &DynamicScheme, dark: f64, watch: Option<f64>, light: [f64; 3]) -> f64 {
    if let (false, Some(watch)) = (s.is_phone(), watch) {
        return watch;
    }
    if s.is_dark() { dark } else { light_surface(s, light[0], light[1], light[2]) }
}

fn on_surface_multiplier(s: &DynamicScheme) -> f64 {
    if !s.is_phone() {
        return 1.0;
    }
    match s.variant() {
        Variant::Neutral => 2.2,
        Variant::TonalSpot => 1.7,
        Variant::Expressive if neutral_is_yellow(s) => s.pick(3.0, 2.3),
        Variant::Expressive => 1.6,
        _ => 1.0,
    }
}

fn on_surface_tone(s: &DynamicScheme) -> f64 {
    if s.variant() == Variant::Vibrant {
        t_max_c_with(s.palette(Neutral), 0.0, 100.0, 1.1)
    } else {
        background_tone(s, Role::OnSurface)
    }
}

fn surface_tone(s: &DynamicScheme) -> f64 {
    if !s.is_phone() {
        0.0
    } else if s.is_dark() {
        4.0
    } else {
        light_surface(s, 99.0, 97.0, 98.0)
    }
}

/// The highest container: surface variant shares it.
fn surface_container_highest() -> RoleSpec {
    RoleSpec::new(Neutral, |s| container_tone(s, 15.0, None, [92.0, 84.0, 90.0]))
        .as_background()
        .chroma(|s| container_multiplier(s, [2.2, 1.7, 2.3, 1.6, 1.29]))
}

fn on_surface() -> RoleSpec {
    RoleSpec::new(Neutral, on_surface_tone)
        .on(text_background, |s| curve(if s.is_dark() && s.is_phone() { 11.0 } else { 9.0 }))
        .chroma(on_surface_multiplier)
}

// ─── Accent tones ────────────────────────────────────────────────────────────

fn primary_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Primary);
    let hue = p.hue();
    match (s.variant(), s.is_phone()) {
        (Variant::Neutral, true) => s.pick(80.0, 40.0),
        (Variant::Neutral, false) => 90.0,
        (Variant::TonalSpot, true) => {
            if s.is_dark() {
                80.0
            } else {
                t_max_c(p, 0.0, 100.0)
            }
        }
        (Variant::TonalSpot, false) => t_max_c(p, 0.0, 90.0),
        (Variant::Expressive, true) => {
            let upper = if Hct::is_yellow(hue) {
                25.0
            } else if Hct::is_cyan(hue) {
                88.0
            } else {
                98.0
            };
            t_max_c(p, 0.0, upper)
        }
        (_, true) => t_max_c(p, 0.0, if Hct::is_cyan(hue) { 88.0 } else { 98.0 }),
        (_, false) => t_max_c(p, 0.0, 100.0),
    }
}

fn primary_dim_tone(s: &DynamicScheme) -> f64 {
    match s.variant() {
        Variant::Neutral => 85.0,
        Variant::TonalSpot => t_max_c(s.palette(Primary), 0.0, 90.0),
        _ => t_max_c(s.palette(Primary), 0.0, 100.0),
    }
}

fn primary_container_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Primary);
    let cyan = Hct::is_cyan(p.hue());
    if !s.is_phone() {
        return 30.0;
    }
    match (s.variant(), s.is_dark()) {
        (Variant::Neutral, dark) => if dark { 30.0 } else { 90.0 },
        (Variant::TonalSpot, true) => t_min_c(p, 35.0, 93.0),
        (Variant::TonalSpot, false) => t_max_c(p, 0.0, 90.0),
        (Variant::Expressive, true) => t_max_c(p, 30.0, 93.0),
        (Variant::Expressive, false) => t_max_c(p, 78.0, if cyan { 88.0 } else { 90.0 }),
        (_, true) => t_min_c(p, 66.0, 93.0),
        (_, false) => t_max_c(p, 66.0, if cyan { 88.0 } else { 93.0 }),
    }
}

fn secondary_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Secondary);
    if !s.is_phone() {
        return if s.variant() == Variant::Neutral { 90.0 } else { t_max_c(p, 0.0, 90.0) };
    }
    match s.variant() {
        Variant::Neutral => {
            if s.is_dark() {
                t_min_c(p, 0.0, 98.0)
            } else {
                t_max_c(p, 0.0, 100.0)
            }
        }
        Variant::Vibrant => t_max_c(p, 0.0, s.pick(90.0, 98.0)),
        _ => {
            if s.is_dark() {
                80.0
            } else {
                t_max_c(p, 0.0, 100.0)
            }
        }
    }
}

fn secondary_dim_tone(s: &DynamicScheme) -> f64 {
    if s.variant() == Variant::Neutral { 85.0 } else { t_max_c(s.palette(Secondary), 0.0, 90.0) }
}

fn secondary_container_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Secondary);
    if !s.is_phone() {
        return 30.0;
    }
    match (s.variant(), s.is_dark()) {
        (Variant::Vibrant, true) => t_min_c(p, 30.0, 40.0),
        (Variant::Vibrant, false) => t_max_c(p, 84.0, 90.0),
        (Variant::Expressive, true) => 15.0,
        (Variant::Expressive, false) => t_max_c(p, 90.0, 95.0),
        (_, dark) => if dark { 25.0 } else { 90.0 },
    }
}

fn tertiary_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Tertiary);
    if !s.is_phone() {
        return if s.variant() == Variant::TonalSpot { t_max_c(p, 0.0, 90.0) } else { t_max_c(p, 0.0, 100.0) };
    }
    match s.variant() {
        Variant::Expressive | Variant::Vibrant => {
            let upper = if Hct::is_cyan(p.hue()) { 88.0 } else { s.pick(98.0, 100.0) };
            t_max_c(p, 0.0, upper)
        }
        _ => t_max_c(p, 0.0, s.pick(98.0, 100.0)),
    }
}

fn tertiary_dim_tone(s: &DynamicScheme) -> f64 {
    let upper = if s.variant() == Variant::TonalSpot { 90.0 } else { 100.0 };
    t_max_c(s.palette(Tertiary), 0.0, upper)
}

fn tertiary_container_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Tertiary);
    if !s.is_phone() {
        return tertiary_dim_tone(s);
    }
    match s.variant() {
        Variant::Neutral => t_max_c(p, 0.0, s.pick(93.0, 96.0)),
        Variant::TonalSpot => t_max_c(p, 0.0, s.pick(93.0, 100.0)),
        Variant::Expressive => {
            let upper = if Hct::is_cyan(p.hue()) { 88.0 } else { s.pick(93.0, 100.0) };
            t_max_c(p, 75.0, upper)
        }
        _ => {
            if s.is_dark() {
                t_max_c(p, 0.0, 93.0)
            } else {
                t_max_c(p, 72.0, 100.0)
            }
        }
    }
}

fn error_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Error);
    if !s.is_phone() {
        t_min_c(p, 0.0, 100.0)
    } else if s.is_dark() {
        t_min_c(p, 0.0, 98.0)
    } else {
        t_max_c(p, 0.0, 100.0)
    }
}

fn error_container_tone(s: &DynamicScheme) -> f64 {
    let p = s.palette(Error);
    if !s.is_phone() {
        30.0
    } else if s.is_dark() {
        t_min_c(p, 30.0, 93.0)
    } else {
        t_max_c(p, 0.0, 90.0)
    }
}

// ─── Role families ───────────────────────────────────────────────────────────

/// The five roles of one accent: the accent, its dim variant, its
/// container and the text on each. Written as a macro since the records
/// name their siblings inside plain function pointers.
macro_rules! accent_family {
    ($role:expr, $palette:expr, $accent:ident, $dim:ident, $on:ident, $container:ident, $on_container:ident,
     $tone:expr, $dim_tone:expr, $container_tone:expr) => {
        match $role {
            Role::$accent => Some(
                RoleSpec::new($palette, $tone)
                    .as_background()
                    .on(text_background, |s| curve(if s.is_phone() { 4.5 } else { 7.0 }))
                    .paired(|s| {
                        s.is_phone().then(|| {
                            let polarity = TonePolarity::RelativeLighter;
                            ToneDeltaPair::new(Role::$container, Role::$accent, 5.0, polarity, false)
                                .with_constraint(DeltaConstraint::Farther)
                        })
                    }),
            ),
            Role::$dim => Some(
                RoleSpec::new($palette, $dim_tone)
                    .as_background()
                    .on(|_| Some(Role::SurfaceContainerHigh), |_| curve(4.5))
                    .paired(|_| {
                        Some(
                            ToneDeltaPair::new(Role::$dim, Role::$accent, 5.0, TonePolarity::Darker, true)
                                .with_constraint(DeltaConstraint::Nearer),
                        )
                    }),
            ),
            Role::$on => Some(
                RoleSpec::new($palette, |s| background_tone(s, Role::$on)).on(
                    |s| Some(if s.is_phone() { Role::$accent } else { Role::$dim }),
                    |s| curve(if s.is_phone() { 6.0 } else { 7.0 }),
                ),
            ),
            Role::$container => Some(
                RoleSpec::new($palette, $container_tone)
                    .as_background()
                    .on(
                        |s| if s.is_phone() { highest_surface(s) } else { None },
                        |s| (s.is_phone() && s.contrast_level() > 0.0).then(|| contrast_curve_for(1.5)),
                    )
                    .paired(|s| {
                        (!s.is_phone()).then(|| {
                            ToneDeltaPair::new(Role::$container, Role::$dim, 10.0, TonePolarity::Darker, false)
                                .with_constraint(DeltaConstraint::Farther)
                        })
                    }),
            ),
            Role::$on_container => Some(
                RoleSpec::new($palette, |s| background_tone(s, Role::$on_container))
                    .on(|_| Some(Role::$container), |s| curve(if s.is_phone() { 6.0 } else { 7.0 })),
            ),
            _ => None,
        }
    };
}

/// Fixed, fixed-dim and the two text roles on them. Fixed colors are the
/// light, standard-contrast container tone in every scheme.
macro_rules! fixed_family {
    ($role:expr, $palette:expr, $container:ident, $fixed:ident, $fixed_dim:ident, $on:ident, $on_variant:ident) => {
        match $role {
            Role::$fixed => Some(
                RoleSpec::new($palette, |s| s.light_standard_tone(Role::$container))
                    .as_background()
                    .on(
                        |s| if s.is_phone() { highest_surface(s) } else { None },
                        |s| (s.is_phone() && s.contrast_level() > 0.0).then(|| contrast_curve_for(1.5)),
                    ),
            ),
            Role::$fixed_dim => Some(RoleSpec::new($palette, |s| s.tone_of(Role::$fixed)).as_background().paired(|_| {
                Some(
                    ToneDeltaPair::new(Role::$fixed_dim, Role::$fixed, 5.0, TonePolarity::Darker, true)
                        .with_constraint(DeltaConstraint::Exact),
                )
            })),
            Role::$on => Some(
                RoleSpec::new($palette, |s| background_tone(s, Role::$on))
                    .on(|_| Some(Role::$fixed_dim), |_| curve(7.0)),
            ),
            Role::$on_variant => Some(
                RoleSpec::new($palette, |s| background_tone(s, Role::$on_variant))
                    .on(|_| Some(Role::$fixed_dim), |_| curve(4.5)),
            ),
            _ => None,
        }
    };
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// Resolution record of `role`. Every role has one.
#[allow(clippy::too_many_lines)]
pub fn role(role: Role) -> Option<RoleSpec> {
    let spec = match role {
        // ── Surfaces ──
        Role::Surface | Role::Background => RoleSpec::new(Neutral, surface_tone).as_background(),
        Role::SurfaceDim => RoleSpec::new(Neutral, |s| {
            if s.is_dark() { 4.0 } else { light_surface(s, 90.0, 85.0, 87.0) }
        })
            .as_background()
            .chroma(|s| if s.is_dark() { 1.0 } else { surface_dim_multiplier(s) }),
        Role::SurfaceBright => RoleSpec::new(Neutral, |s| {
            if s.is_dark() { 18.0 } else { light_surface(s, 99.0, 97.0, 98.0) }
        })
            .as_background()
            .chroma(|s| if s.is_dark() { surface_dim_multiplier(s) } else { 1.0 }),
        Role::SurfaceContainerLowest => RoleSpec::new(Neutral, |s| s.pick(0.0, 100.0)).as_background(),
        Role::SurfaceContainerLow => RoleSpec::new(Neutral, |s| container_tone(s, 6.0, Some(15.0), [98.0, 95.0, 96.0]))
            .as_background()
            .chroma(|s| container_multiplier(s, [1.3, 1.25, 1.3, 1.15, 1.08])),
        Role::SurfaceContainer => RoleSpec::new(Neutral, |s| container_tone(s, 9.0, Some(20.0), [96.0, 91.0, 94.0]))
            .as_background()
            .chroma(|s| container_multiplier(s, [1.6, 1.4, 1.6, 1.3, 1.15])),
        Role::SurfaceContainerHigh => {
            RoleSpec::new(Neutral, |s| container_tone(s, 12.0, Some(25.0), [94.0, 88.0, 92.0]))
                .as_background()
                .chroma(|s| container_multiplier(s, [1.9, 1.5, 1.95, 1.45, 1.22]))
        }
        Role::SurfaceContainerHighest | Role::SurfaceVariant => surface_container_highest(),
        Role::OnSurface => on_surface(),
        Role::OnBackground => {
            let mut spec = on_surface();
            spec.tone = |s| if s.is_phone() { on_surface_tone(s) } else { 100.0 };
            spec
        }
        Role::OnSurfaceVariant => RoleSpec::new(NeutralVariant, |s| background_tone(s, Role::OnSurfaceVariant))
            .on(text_background, |s| {
                let ratio = if !s.is_phone() {
                    7.0
                } else if s.is_dark() {
                    6.0
                } else {
                    4.5
                };
                curve(ratio)
            })
            .chroma(on_surface_multiplier),
        Role::Outline => RoleSpec::new(NeutralVariant, |s| background_tone(s, Role::Outline))
            .on(text_background, |s| curve(if s.is_phone() { 3.0 } else { 4.5 }))
            .chroma(on_surface_multiplier),
        Role::OutlineVariant => RoleSpec::new(NeutralVariant, |s| background_tone(s, Role::OutlineVariant))
            .on(text_background, |s| curve(if s.is_phone() { 1.5 } else { 3.0 }))
            .chroma(on_surface_multiplier),
        Role::InverseSurface => RoleSpec::new(Neutral, |s| s.pick(98.0, 4.0)).as_background(),
        Role::InverseOnSurface => RoleSpec::new(Neutral, |s| background_tone(s, Role::InverseOnSurface))
            .on(|_| Some(Role::InverseSurface), |_| curve(7.0)),
        Role::InversePrimary => RoleSpec::new(Primary, |s| t_max_c(s.palette(Primary), 0.0, 100.0))
            .on(|_| Some(Role::InverseSurface), |s| curve(if s.is_phone() { 6.0 } else { 7.0 })),

        // ── Accents ──
        Role::Primary | Role::PrimaryDim | Role::OnPrimary | Role::PrimaryContainer | Role::OnPrimaryContainer => {
            return accent_family!(
                role,
                Primary,
                Primary,
                PrimaryDim,
                OnPrimary,
                PrimaryContainer,
                OnPrimaryContainer,
                primary_tone,
                primary_dim_tone,
                primary_container_tone
            );
        }
        Role::Secondary
        | Role::SecondaryDim
        | Role::OnSecondary
        | Role::SecondaryContainer
        | Role::OnSecondaryContainer => {
            return accent_family!(
                role,
                Secondary,
                Secondary,
                SecondaryDim,
                OnSecondary,
                SecondaryContainer,
                OnSecondaryContainer,
                secondary_tone,
                secondary_dim_tone,
                secondary_container_tone
            );
        }
        Role::Tertiary | Role::TertiaryDim | Role::OnTertiary | Role::TertiaryContainer | Role::OnTertiaryContainer => {
            return accent_family!(
                role,
                Tertiary,
                Tertiary,
                TertiaryDim,
                OnTertiary,
                TertiaryContainer,
                OnTertiaryContainer,
                tertiary_tone,
                tertiary_dim_tone,
                tertiary_container_tone
            );
        }
        Role::Error | Role::ErrorDim | Role::OnError | Role::ErrorContainer | Role::OnErrorContainer => {
            return accent_family!(
                role,
                Error,
                Error,
                ErrorDim,
                OnError,
                ErrorContainer,
                OnErrorContainer,
                error_tone,
                |s: &DynamicScheme| t_min_c(s.palette(Error), 0.0, 100.0),
                error_container_tone
            );
        }

        // ── Fixed ──
        Role::PrimaryFixed | Role::PrimaryFixedDim | Role::OnPrimaryFixed | Role::OnPrimaryFixedVariant => {
            return fixed_family!(
                role,
                Primary,
                PrimaryContainer,
                PrimaryFixed,
                PrimaryFixedDim,
                OnPrimaryFixed,
                OnPrimaryFixedVariant
            );
        }
        Role::SecondaryFixed | Role::SecondaryFixedDim | Role::OnSecondaryFixed | Role::OnSecondaryFixedVariant => {
            return fixed_family!(
                role,
                Secondary,
                SecondaryContainer,
                SecondaryFixed,
                SecondaryFixedDim,
                OnSecondaryFixed,
                OnSecondaryFixedVariant
            );
        }
        Role::TertiaryFixed | Role::TertiaryFixedDim | Role::OnTertiaryFixed | Role::OnTertiaryFixedVariant => {
            return fixed_family!(
                role,
                Tertiary,
                TertiaryContainer,
                TertiaryFixed,
                TertiaryFixedDim,
                OnTertiaryFixed,
                OnTertiaryFixedVariant
            );
        }

        Role::Shadow
        | Role::Scrim
        | Role::SurfaceTint
        | Role::PrimaryPaletteKeyColor
        | Role::SecondaryPaletteKeyColor
        | Role::TertiaryPaletteKeyColor
        | Role::NeutralPaletteKeyColor
        | Role::NeutralVariantPaletteKeyColor
        | Role::ErrorPaletteKeyColor => return spec2021::role(role),
    };
    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Platform, SpecVersion};
    use crate::contrast_level::Contrast;
    use monet_hct::Argb;
    use pretty_assertions::assert_eq;

    fn scheme(variant: Variant, dark: bool, platform: Platform) -> DynamicScheme {
        DynamicScheme::new(
            Hct::from_argb(Argb(0xFF5C_6BC0)),
            variant,
            dark,
            Contrast::STANDARD,
            platform,
            SpecVersion::Spec2025,
        )
    }

    // ── Tone search ─────────────────────────────────────────────────

    #[test]
    fn t_max_c_respects_bounds() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 40.0);
        let tone = t_max_c(&palette, 0.0, 100.0);
        assert!((0.0..=100.0).contains(&tone));
        assert_eq!(t_max_c(&palette, 0.0, 10.0), 10.0_f64.min(tone));
        assert!(t_max_c(&palette, 95.0, 100.0) >= 95.0);
    }

    #[test]
    fn t_min_c_is_not_lighter_than_t_max_c() {
        for hue in [0.0, 60.0, 120.0, 200.0, 280.0] {
            let palette = TonalPalette::from_hue_and_chroma(hue, 36.0);
            let (min, max) = (t_min_c(&palette, 0.0, 100.0), t_max_c(&palette, 0.0, 100.0));
            assert!(min <= max, "hue {hue}: min {min} max {max}");
        }
    }

    #[test]
    fn best_tone_reaches_low_chroma_immediately() {
        // Chroma 2 is available at tone 50 for any hue.
        assert_eq!(find_best_tone_for_chroma(120.0, 2.0, 50.0, true), 50.0);
    }

    // ── Curves ──────────────────────────────────────────────────────

    #[test]
    fn curve_ladder() {
        assert_eq!(contrast_curve_for(4.5), ContrastCurve::new(4.5, 4.5, 7.0, 11.0));
        assert_eq!(contrast_curve_for(11.0), ContrastCurve::new(11.0, 11.0, 21.0, 21.0));
        assert_eq!(contrast_curve_for(5.0), ContrastCurve::new(5.0, 5.0, 7.0, 21.0));
    }

    // ── Table ───────────────────────────────────────────────────────

    #[test]
    fn every_role_has_a_record() {
        for r in Role::ALL {
            assert!(role(r).is_some(), "{r}");
        }
    }

    #[test]
    fn inherited_roles_match_2021() {
        let s = scheme(Variant::TonalSpot, false, Platform::Phone);
        for r in [Role::Shadow, Role::SurfaceTint, Role::PrimaryPaletteKeyColor] {
            let ours = role(r).map(|spec| (spec.tone)(&s));
            let theirs = spec2021::role(r).map(|spec| (spec.tone)(&s));
            assert_eq!(ours, theirs, "{r}");
        }
    }

    #[test]
    fn surfaces_by_platform() {
        let light = scheme(Variant::TonalSpot, false, Platform::Phone);
        let dark = scheme(Variant::TonalSpot, true, Platform::Phone);
        let watch = scheme(Variant::TonalSpot, true, Platform::Watch);
        let base = |s: &DynamicScheme, r: Role| role(r).map(|spec| (spec.tone)(s));
        assert_eq!(base(&light, Role::Surface), Some(98.0));
        assert_eq!(base(&dark, Role::Surface), Some(4.0));
        assert_eq!(base(&watch, Role::Surface), Some(0.0));
        assert_eq!(base(&watch, Role::SurfaceContainerHigh), Some(25.0));
        assert_eq!(base(&watch, Role::SurfaceContainerHighest), Some(15.0));
    }

    #[test]
    fn container_chroma_boost_is_phone_only() {
        let phone = scheme(Variant::TonalSpot, false, Platform::Phone);
        let watch = scheme(Variant::TonalSpot, false, Platform::Watch);
        let mult =
            |s: &DynamicScheme| role(Role::SurfaceContainer).and_then(|spec| spec.chroma_multiplier).map(|m| m(s));
        assert_eq!(mult(&phone), Some(1.4));
        assert_eq!(mult(&watch), Some(1.0));
    }

    #[test]
    fn pairs_depend_on_platform() {
        let phone = scheme(Variant::TonalSpot, false, Platform::Phone);
        let watch = scheme(Variant::TonalSpot, false, Platform::Watch);
        let pair = |s: &DynamicScheme, r: Role| role(r).and_then(|spec| (spec.tone_delta_pair)(s));

        let primary = pair(&phone, Role::Primary).map(|p| (p.role_a, p.polarity, p.constraint));
        assert_eq!(
            primary,
            Some((Role::PrimaryContainer, TonePolarity::RelativeLighter, DeltaConstraint::Farther))
        );
        assert_eq!(pair(&watch, Role::Primary), None);
        assert_eq!(pair(&phone, Role::PrimaryContainer), None);
        assert_eq!(pair(&watch, Role::PrimaryContainer).map(|p| p.role_b), Some(Role::PrimaryDim));
        assert_eq!(pair(&phone, Role::PrimaryFixedDim).map(|p| p.constraint), Some(DeltaConstraint::Exact));
    }

    #[test]
    fn container_curve_only_above_standard_contrast() {
        let s = scheme(Variant::TonalSpot, false, Platform::Phone);
        let curve = role(Role::PrimaryContainer).and_then(|spec| (spec.contrast_curve)(&s));
        assert_eq!(curve, None);
    }
}
