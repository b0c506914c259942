//! Weighted k-means refinement.
//!
//! Works on distinct colors weighted by their pixel count rather than on
//! raw pixels. Each pass reassigns every color to its nearest centroid and
//! then moves each centroid to the weighted mean of its members. Passes
//! stop when nothing moves or after [`MAX_ITERATIONS`].
//!
//! A color only changes cluster when that brings it meaningfully closer
//! ([`MIN_MOVEMENT_DISTANCE`]), which damps oscillation between near-equal
//! centroids. Candidates are pruned with the triangle inequality: centroid
//! `j` cannot beat the current centroid `c` for point `p` when
//! `d(c, j) ≥ 2·d(p, c)`, i.e. `d²(c, j) ≥ 4·d²(p, c)`.
//!
//! Initial membership is the nearest starting centroid, so results are
//! fully deterministic.

use monet_hct::Argb;
use tracing::debug;

use crate::error::{QuantizeError, check_input};
use crate::map::histogram;
use crate::palette::QuantizedPalette;
use crate::point_provider::{PointProvider, RgbPoints};

pub const MAX_ITERATIONS: usize = 10;
pub const MIN_MOVEMENT_DISTANCE: f64 = 3.0;

/// Refine `starting_clusters` against `pixels` using RGB distance.
///
/// With no starting clusters, the first `max_colors` distinct colors seed
/// the clusters.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] or [`QuantizeError::ZeroColors`].
pub fn quantize(
    pixels: &[Argb],
    starting_clusters: &[Argb],
    max_colors: usize,
) -> Result<QuantizedPalette, QuantizeError> {
    quantize_with(pixels, starting_clusters, max_colors, &RgbPoints)
}

/// [`quantize`] measuring distance with `provider`.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] or [`QuantizeError::ZeroColors`].
pub fn quantize_with<P: PointProvider>(
    pixels: &[Argb],
    starting_clusters: &[Argb],
    max_colors: usize,
    provider: &P,
) -> Result<QuantizedPalette, QuantizeError> {
    check_input(pixels, max_colors)?;

    let counts = histogram(pixels);
    let points: Vec<[f64; 3]> = counts.iter().map(|&(c, _)| provider.from_argb(c)).collect();
    let weights: Vec<u32> = counts.iter().map(|&(_, n)| n).collect();

    let seeds: Vec<Argb> = if starting_clusters.is_empty() {
        counts.iter().map(|&(c, _)| c).collect()
    } else {
        starting_clusters.to_vec()
    };
    let cluster_count = max_colors.min(points.len()).min(seeds.len());
    let mut clusters: Vec<[f64; 3]> =
        seeds.iter().take(cluster_count).map(|&c| provider.from_argb(c)).collect();

    let mut assignments: Vec<usize> =
        points.iter().map(|&p| nearest(provider, p, &clusters)).collect();
    let mut populations = vec![0_u64; cluster_count];

    for iteration in 0..MAX_ITERATIONS {
        let between = pairwise_distances(provider, &clusters);
        #[cfg(feature = "parallel")]
        let moves = reassign_parallel(provider, &points, &assignments, &clusters, &between);
        #[cfg(not(feature = "parallel"))]
        let moves = reassign_serial(provider, &points, &assignments, &clusters, &between);
        let moved = moves.iter().filter(|m| m.is_some()).count();
        for (slot, m) in assignments.iter_mut().zip(&moves) {
            if let Some(to) = *m {
                *slot = to;
            }
        }
        debug!(iteration, moved, "k-means pass");

        if moved == 0 && iteration != 0 {
            break;
        }

        let mut sums = vec![[0.0_f64; 3]; cluster_count];
        populations.fill(0);
        for ((point, &weight), &cluster) in points.iter().zip(&weights).zip(&assignments) {
            let w = f64::from(weight);
            populations[cluster] += u64::from(weight);
            for axis in 0..3 {
                sums[cluster][axis] += point[axis] * w;
            }
        }
        for (cluster, (sum, &population)) in clusters.iter_mut().zip(sums.iter().zip(&populations)) {
            // Empty clusters keep their last position.
            if population == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let n = population as f64;
            *cluster = [sum[0] / n, sum[1] / n, sum[2] / n];
        }
    }

    Ok(clusters
        .iter()
        .zip(&populations)
        .filter(|&(_, &population)| population > 0)
        .map(|(&point, &population)| (provider.to_argb(point), u32::try_from(population).unwrap_or(u32::MAX)))
        .collect())
}

fn nearest<P: PointProvider>(provider: &P, point: [f64; 3], clusters: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, &cluster) in clusters.iter().enumerate() {
        let d = provider.distance(point, cluster);
        if d < best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

fn pairwise_distances<P: PointProvider>(provider: &P, clusters: &[[f64; 3]]) -> Vec<Vec<f64>> {
    let n = clusters.len();
    let mut between = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = provider.distance(clusters[i], clusters[j]);
            between[i][j] = d;
            between[j][i] = d;
        }
    }
    between
}

/// New cluster for one point, if it should move.
fn best_move<P: PointProvider>(
    provider: &P,
    point: [f64; 3],
    current: usize,
    clusters: &[[f64; 3]],
    between: &[Vec<f64>],
) -> Option<usize> {
    let previous_distance = provider.distance(point, clusters[current]);
    let mut minimum = previous_distance;
    let mut candidate = None;
    for (j, &cluster) in clusters.iter().enumerate() {
        if between[current][j] >= 4.0 * previous_distance {
            continue;
        }
        let d = provider.distance(point, cluster);
        if d < minimum {
            minimum = d;
            candidate = Some(j);
        }
    }
    candidate.filter(|_| (minimum.sqrt() - previous_distance.sqrt()).abs() > MIN_MOVEMENT_DISTANCE)
}

#[cfg(any(test, not(feature = "parallel")))]
fn reassign_serial<P: PointProvider>(
    provider: &P,
    points: &[[f64; 3]],
    assignments: &[usize],
    clusters: &[[f64; 3]],
    between: &[Vec<f64>],
) -> Vec<Option<usize>> {
    points
        .iter()
        .zip(assignments)
        .map(|(&p, &current)| best_move(provider, p, current, clusters, between))
        .collect()
}

// Centroids are read-only during a pass, so points are independent.
#[cfg(feature = "parallel")]
fn reassign_parallel<P: PointProvider>(
    provider: &P,
    points: &[[f64; 3]],
    assignments: &[usize],
    clusters: &[[f64; 3]],
    between: &[Vec<f64>],
) -> Vec<Option<usize>> {
    use rayon::prelude::*;

    points
        .par_iter()
        .zip(assignments.par_iter())
        .map(|(&p, &current)| best_move(provider, p, current, clusters, between))
        .collect()
}
