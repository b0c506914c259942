//! Ranking quantized colors as scheme seeds.
//!
//! A good seed is common in the image and colorful. Population is measured
//! per hue neighborhood (±15°), so a hue spread over many similar clusters
//! still counts as dominant. Chroma earns a bonus up to a target and a
//! larger one past it, but population dominates, so a rare saturated speck
//! does not win.
//!
//! With several results requested, successive picks must differ in hue.
//! The required separation starts at 90° and relaxes one degree at a time,
//! down to 15°, until enough colors qualify.

use monet_hct::math::{difference_degrees, sanitize_degrees_int};
use monet_hct::{Argb, Hct};
use tracing::debug;

use crate::palette::QuantizedPalette;

const TARGET_CHROMA: f64 = 48.0;
const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
const CUTOFF_CHROMA: f64 = 5.0;
const CUTOFF_EXCITED_PROPORTION: f64 = 0.01;

/// Google Blue, the seed used when an image offers nothing usable.
pub const FALLBACK_COLOR: Argb = Argb(0xFF42_85F4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOptions {
    /// How many colors to return at most. Zero is treated as one.
    pub desired: usize,
    /// Returned alone when no color qualifies.
    pub fallback: Argb,
    /// Drop grays and colors whose hue neighborhood is under 1% of pixels.
    pub filter: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self { desired: 4, fallback: FALLBACK_COLOR, filter: true }
    }
}

struct Scored {
    hct: Hct,
    score: f64,
}

/// Seed candidates from `palette`, best first. Never empty.
#[must_use]
pub fn score(palette: &QuantizedPalette, options: &ScoreOptions) -> Vec<Argb> {
    let desired = options.desired.max(1);

    let mut hue_population = [0_u64; 360];
    let mut population_sum = 0_u64;
    let colors: Vec<Hct> = palette
        .iter()
        .map(|(argb, population)| {
            let hct = Hct::from_argb(argb);
            hue_population[hue_bucket(hct.hue().floor())] += u64::from(population);
            population_sum += u64::from(population);
            hct
        })
        .collect();

    let mut excited = [0.0_f64; 360];
    if population_sum > 0 {
        for (hue, &population) in (0_i32..).zip(hue_population.iter()) {
            #[allow(clippy::cast_precision_loss)]
            let proportion = population as f64 / population_sum as f64;
            for neighbor in (hue - 14)..(hue + 16) {
                excited[hue_bucket_int(neighbor)] += proportion;
            }
        }
    }

    let mut scored: Vec<Scored> = colors
        .into_iter()
        .filter_map(|hct| {
            let proportion = excited[hue_bucket(hct.hue().round())];
            if options.filter && (hct.chroma() < CUTOFF_CHROMA || proportion <= CUTOFF_EXCITED_PROPORTION) {
                return None;
            }
            let proportion_score = proportion * 100.0 * WEIGHT_PROPORTION;
            let chroma_weight =
                if hct.chroma() < TARGET_CHROMA { WEIGHT_CHROMA_BELOW } else { WEIGHT_CHROMA_ABOVE };
            let chroma_score = (hct.chroma() - TARGET_CHROMA) * chroma_weight;
            Some(Scored { hct, score: proportion_score + chroma_score })
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut chosen: Vec<Hct> = Vec::new();
    for separation in (15..=90).rev() {
        chosen.clear();
        for candidate in &scored {
            let separation = f64::from(separation);
            let duplicate = chosen
                .iter()
                .any(|c| difference_degrees(candidate.hct.hue(), c.hue()) < separation);
            if !duplicate {
                chosen.push(candidate.hct);
            }
            if chosen.len() >= desired {
                break;
            }
        }
        if chosen.len() >= desired {
            break;
        }
    }

    if chosen.is_empty() {
        debug!(fallback = %options.fallback, candidates = palette.len(), "no color qualified as seed");
        return vec![options.fallback];
    }
    chosen.iter().map(Hct::to_argb).collect()
}

#[allow(clippy::cast_possible_truncation)]
fn hue_bucket(hue: f64) -> usize {
    hue_bucket_int(hue as i32)
}

#[allow(clippy::cast_sign_loss)]
const fn hue_bucket_int(hue: i32) -> usize {
    sanitize_degrees_int(hue) as usize
}
