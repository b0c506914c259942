//! Role resolution records and the tone rules they share.
//!
//! A [`RoleSpec`] is static configuration: which palette a role draws
//! from, its base tone, what it sits on, how much contrast it needs and
//! which role it is paired with. Every field is a plain function of the
//! scheme, so a table of specs is data, not objects, and the resolved
//! values live in the scheme's own cache.

use monet_hct::contrast::{darker_unsafe, lighter_unsafe, ratio_of_tones};

use crate::contrast_curve::ContrastCurve;
use crate::dynamic_scheme::DynamicScheme;
use crate::palettes::PaletteKind;
use crate::role::Role;
use crate::tone_delta_pair::ToneDeltaPair;

pub type ToneFn = fn(&DynamicScheme) -> f64;
pub type RoleFn = fn(&DynamicScheme) -> Option<Role>;
pub type CurveFn = fn(&DynamicScheme) -> Option<ContrastCurve>;
pub type PairFn = fn(&DynamicScheme) -> Option<ToneDeltaPair>;

/// How one role resolves under one spec version.
#[derive(Clone, Copy)]
pub struct RoleSpec {
    pub palette: PaletteKind,
    /// Tone before any contrast or delta adjustment.
    pub tone: ToneFn,
    /// Other roles are drawn on top of this one.
    pub is_background: bool,
    pub background: RoleFn,
    /// Fixed-color foregrounds must read on two backgrounds.
    pub second_background: RoleFn,
    pub contrast_curve: CurveFn,
    pub tone_delta_pair: PairFn,
    /// Scales the palette chroma; `None` keeps the palette's own.
    pub chroma_multiplier: Option<ToneFn>,
}

const fn no_role(_: &DynamicScheme) -> Option<Role> {
    None
}

const fn no_curve(_: &DynamicScheme) -> Option<ContrastCurve> {
    None
}

const fn no_pair(_: &DynamicScheme) -> Option<ToneDeltaPair> {
    None
}

impl RoleSpec {
    pub const fn new(palette: PaletteKind, tone: ToneFn) -> Self {
        Self {
            palette,
            tone,
            is_background: false,
            background: no_role,
            second_background: no_role,
            contrast_curve: no_curve,
            tone_delta_pair: no_pair,
            chroma_multiplier: None,
        }
    }

    #[must_use]
    pub const fn as_background(mut self) -> Self {
        self.is_background = true;
        self
    }

    /// Draw on `background` with at least `curve` contrast.
    #[must_use]
    pub const fn on(mut self, background: RoleFn, curve: CurveFn) -> Self {
        self.background = background;
        self.contrast_curve = curve;
        self
    }

    #[must_use]
    pub const fn also_on(mut self, background: RoleFn) -> Self {
        self.second_background = background;
        self
    }

    #[must_use]
    pub const fn paired(mut self, pair: PairFn) -> Self {
        self.tone_delta_pair = pair;
        self
    }

    #[must_use]
    pub const fn chroma(mut self, multiplier: ToneFn) -> Self {
        self.chroma_multiplier = Some(multiplier);
        self
    }

    /// Every role this one reads while resolving in `scheme`: backgrounds
    /// and the pair partner.
    pub fn dependencies(&self, scheme: &DynamicScheme, own: Role) -> Vec<Role> {
        let mut deps: Vec<Role> = [(self.background)(scheme), (self.second_background)(scheme)]
            .into_iter()
            .flatten()
            .collect();
        if let Some(partner) = (self.tone_delta_pair)(scheme).and_then(|p| p.partner(own)) {
            deps.push(partner);
        }
        deps
    }
}

// ─── Shared tone rules ───────────────────────────────────────────────────────

/// Rounds half up, the rounding the tone thresholds below are defined with.
fn round_half_up(tone: f64) -> f64 {
    (tone + 0.5).floor()
}

/// Whether text on a background of `tone` should be light.
#[must_use]
pub fn tone_prefers_light_foreground(tone: f64) -> bool {
    round_half_up(tone) < 60.0
}

/// Whether a background of `tone` is dark enough for light text.
#[must_use]
pub fn tone_allows_light_foreground(tone: f64) -> bool {
    round_half_up(tone) <= 49.0
}

/// Moves a tone that wants light text but cannot have it down to 49.
#[must_use]
pub fn enable_light_foreground(tone: f64) -> f64 {
    if tone_prefers_light_foreground(tone) && !tone_allows_light_foreground(tone) { 49.0 } else { tone }
}

/// The tone reaching `ratio` against `bg_tone`, on whichever side
/// suits the background. When neither side reaches it, the side with more
/// contrast wins.
#[must_use]
pub fn foreground_tone(bg_tone: f64, ratio: f64) -> f64 {
    let lighter = lighter_unsafe(bg_tone, ratio);
    let darker = darker_unsafe(bg_tone, ratio);
    let lighter_ratio = ratio_of_tones(lighter, bg_tone);
    let darker_ratio = ratio_of_tones(darker, bg_tone);

    if tone_prefers_light_foreground(bg_tone) {
        // Near-identical failures still go light.
        let negligible = (lighter_ratio - darker_ratio).abs() < 0.1 && lighter_ratio < ratio && darker_ratio < ratio;
        if lighter_ratio >= ratio || lighter_ratio >= darker_ratio || negligible { lighter } else { darker }
    } else if darker_ratio >= ratio || darker_ratio >= lighter_ratio {
        darker
    } else {
        lighter
    }
}
