// SPDX-License-Identifier: MIT
//
// Inverse HCT: find the sRGB color with a given CAM16 hue, CAM16 chroma and
// L* tone.
//
// Tone fixes Y, and the set of linear-RGB points with a given Y is a plane
// slice through the RGB cube. Two stages search that slice:
//
//   1. `find_result_by_j`: a few Newton steps on J assuming the requested
//      chroma is reachable. Succeeds for in-gamut requests.
//   2. `bisect_to_limit`: otherwise walk the cube edges on the Y plane to
//      the segment bracketing the target hue, then bisect along it across
//      sRGB critical planes. The midpoint of the final bracket is the most
//      chromatic displayable color at that hue and tone.
//
// Both stages have fixed iteration caps (5 Newton rounds, 12 vertices,
// 3 axes × 8 plane bisections), so every call terminates.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::argb::Argb;
use crate::math::{matrix_multiply, sanitize_degrees, signum, y_from_lstar};
use crate::viewing_conditions::ViewingConditions;

const SCALED_DISCOUNT_FROM_LINRGB: [[f64; 3]; 3] = [
    [0.001_200_833_568_784_504, 0.002_389_694_492_170_889, 0.000_279_574_288_586_112_4],
    [0.000_589_108_665_137_599_9, 0.002_978_550_257_343_875_8, 0.000_327_066_610_400_839_8],
    [0.000_101_466_924_916_405_72, 0.000_536_421_435_918_669_4, 0.003_297_940_177_071_207_6],
];

const LINRGB_FROM_SCALED_DISCOUNT: [[f64; 3]; 3] = [
    [1_373.219_870_959_423_1, -1_100.425_119_075_482_1, -7.278_681_089_101_213],
    [-271.815_969_077_903, 559.658_046_594_073_3, -32.460_474_827_911_94],
    [1.962_289_959_966_566_6, -57.173_814_538_844_006, 308.723_319_781_238_5],
];

const Y_FROM_LINRGB: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Linear-light values (0..=100) halfway between consecutive 8-bit codes.
/// Bisecting across these planes stops as soon as further steps could no
/// longer change the rounded sRGB result.
static CRITICAL_PLANES: LazyLock<[f64; 255]> = LazyLock::new(|| {
    let mut planes = [0.0; 255];
    for (i, plane) in planes.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let code = i as f64 + 0.5;
        let normalized = code / 255.0;
        *plane = if normalized <= 0.040_449_936 {
            normalized / 12.92 * 100.0
        } else {
            ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
        };
    }
    planes
});

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Solve for the sRGB color closest to (hue, chroma, tone).
///
/// Hue is in degrees and wraps. Chroma above what the gamut allows at that
/// hue and tone is reduced to the maximum available. Near-zero chroma or a
/// tone at either end of the range yields the gray of that tone.
#[must_use]
pub fn solve_to_argb(hue_degrees: f64, chroma: f64, lstar: f64) -> Argb {
    if chroma < 0.0001 || !(0.0001..=99.9999).contains(&lstar) {
        return Argb::from_lstar(lstar);
    }
    let hue_radians = sanitize_degrees(hue_degrees).to_radians();
    let y = y_from_lstar(lstar);
    if let Some(exact) = find_result_by_j(hue_radians, chroma, y) {
        return exact;
    }
    tracing::trace!(hue_degrees, chroma, lstar, "requested chroma out of gamut; bisecting to limit");
    Argb::from_linrgb(bisect_to_limit(y, hue_radians))
}

// ─── Newton stage ────────────────────────────────────────────────────────────

fn inverse_chromatic_adaptation(adapted: f64) -> f64 {
    let adapted_abs = adapted.abs();
    let base = (27.13 * adapted_abs / (400.0 - adapted_abs)).max(0.0);
    signum(adapted) * base.powf(1.0 / 0.42)
}

#[allow(clippy::many_single_char_names)]
fn find_result_by_j(hue_radians: f64, chroma: f64, y: f64) -> Option<Argb> {
    // Initial estimate of J.
    let mut j = y.sqrt() * 11.0;

    let vc = ViewingConditions::standard();
    let t_inner_coeff = 1.0 / (1.64 - 0.29_f64.powf(vc.n)).powf(0.73);
    let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
    let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
    let h_sin = hue_radians.sin();
    let h_cos = hue_radians.cos();

    for round in 0..5 {
        let j_normalized = j / 100.0;
        let alpha = if chroma == 0.0 || j == 0.0 { 0.0 } else { chroma / j_normalized.sqrt() };
        let t = (alpha * t_inner_coeff).powf(1.0 / 0.9);
        let ac = vc.aw * j_normalized.powf(1.0 / vc.c / vc.z);
        let p2 = ac / vc.nbb;
        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;
        let scaled = [
            inverse_chromatic_adaptation(r_a),
            inverse_chromatic_adaptation(g_a),
            inverse_chromatic_adaptation(b_a),
        ];
        let linrgb = matrix_multiply(scaled, &LINRGB_FROM_SCALED_DISCOUNT);
        if linrgb.iter().any(|&c| c < 0.0) {
            return None;
        }
        let fnj = Y_FROM_LINRGB[2].mul_add(
            linrgb[2],
            Y_FROM_LINRGB[0].mul_add(linrgb[0], Y_FROM_LINRGB[1] * linrgb[1]),
        );
        if fnj <= 0.0 {
            return None;
        }
        if round == 4 || (fnj - y).abs() < 0.002 {
            if linrgb.iter().any(|&c| c > 100.01) {
                return None;
            }
            return Some(Argb::from_linrgb(linrgb));
        }
        // Newton step, approximating fn'(j) by 2 * fn(j) / j.
        j -= (fnj - y) * j / (2.0 * fnj);
    }
    None
}

// ─── Bisection stage ─────────────────────────────────────────────────────────

fn sanitize_radians(angle: f64) -> f64 {
    (angle + PI * 8.0) % (PI * 2.0)
}

fn true_delinearized(component: f64) -> f64 {
    let normalized = component / 100.0;
    let encoded = if normalized <= 0.003_130_8 {
        normalized * 12.92
    } else {
        1.055_f64.mul_add(normalized.powf(1.0 / 2.4), -0.055)
    };
    encoded * 255.0
}

fn chromatic_adaptation(component: f64) -> f64 {
    let af = component.abs().powf(0.42);
    signum(component) * 400.0 * af / (af + 27.13)
}

/// CAM16 hue, in radians, of a linear-RGB point.
fn hue_of(linrgb: [f64; 3]) -> f64 {
    let scaled = matrix_multiply(linrgb, &SCALED_DISCOUNT_FROM_LINRGB);
    let r_a = chromatic_adaptation(scaled[0]);
    let g_a = chromatic_adaptation(scaled[1]);
    let b_a = chromatic_adaptation(scaled[2]);
    let a = (11.0 * r_a + -12.0 * g_a + b_a) / 11.0;
    let b = (r_a + g_a - 2.0 * b_a) / 9.0;
    b.atan2(a)
}

fn are_in_cyclic_order(a: f64, b: f64, c: f64) -> bool {
    sanitize_radians(b - a) < sanitize_radians(c - a)
}

/// Where `mid` sits between `source` and `target`, as a fraction.
fn intercept(source: f64, mid: f64, target: f64) -> f64 {
    (mid - source) / (target - source)
}

fn lerp_point(source: [f64; 3], t: f64, target: [f64; 3]) -> [f64; 3] {
    [
        (target[0] - source[0]).mul_add(t, source[0]),
        (target[1] - source[1]).mul_add(t, source[1]),
        (target[2] - source[2]).mul_add(t, source[2]),
    ]
}

fn set_coordinate(source: [f64; 3], coordinate: f64, target: [f64; 3], axis: usize) -> [f64; 3] {
    let t = intercept(source[axis], coordinate, target[axis]);
    lerp_point(source, t, target)
}

fn is_bounded(x: f64) -> bool {
    (0.0..=100.0).contains(&x)
}

/// The `n`th of the 12 cube edges intersected with the plane of luminance
/// `y`, or `None` if the plane misses that edge.
fn nth_vertex(y: f64, n: usize) -> Option<[f64; 3]> {
    let [k_r, k_g, k_b] = Y_FROM_LINRGB;
    let coord_a = if n % 4 <= 1 { 0.0 } else { 100.0 };
    let coord_b = if n % 2 == 0 { 0.0 } else { 100.0 };
    let point = if n < 4 {
        let (g, b) = (coord_a, coord_b);
        [(y - g * k_g - b * k_b) / k_r, g, b]
    } else if n < 8 {
        let (b, r) = (coord_a, coord_b);
        [r, (y - r * k_r - b * k_b) / k_g, b]
    } else {
        let (r, g) = (coord_a, coord_b);
        [r, g, (y - r * k_r - g * k_g) / k_b]
    };
    let solved = if n < 4 { point[0] } else if n < 8 { point[1] } else { point[2] };
    is_bounded(solved).then_some(point)
}

/// The two plane vertices whose hues bracket `target_hue`.
fn bisect_to_segment(y: f64, target_hue: f64) -> ([f64; 3], [f64; 3]) {
    let mut bracket: Option<([f64; 3], f64, [f64; 3], f64)> = None;
    let mut uncut = true;
    for n in 0..12 {
        let Some(mid) = nth_vertex(y, n) else { continue };
        let mid_hue = hue_of(mid);
        let Some((left, left_hue, right, right_hue)) = bracket.as_mut() else {
            bracket = Some((mid, mid_hue, mid, mid_hue));
            continue;
        };
        if uncut || are_in_cyclic_order(*left_hue, mid_hue, *right_hue) {
            uncut = false;
            if are_in_cyclic_order(*left_hue, target_hue, mid_hue) {
                *right = mid;
                *right_hue = mid_hue;
            } else {
                *left = mid;
                *left_hue = mid_hue;
            }
        }
    }
    bracket.map_or(([-1.0; 3], [-1.0; 3]), |(left, _, right, _)| (left, right))
}

fn midpoint(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

#[allow(clippy::cast_possible_truncation)]
fn critical_plane_below(x: f64) -> i32 {
    (x - 0.5).floor() as i32
}

#[allow(clippy::cast_possible_truncation)]
fn critical_plane_above(x: f64) -> i32 {
    (x - 0.5).ceil() as i32
}

fn bisect_to_limit(y: f64, target_hue: f64) -> [f64; 3] {
    let (mut left, mut right) = bisect_to_segment(y, target_hue);
    let mut left_hue = hue_of(left);
    for axis in 0..3 {
        if (left[axis] - right[axis]).abs() < f64::EPSILON {
            continue;
        }
        let (mut l_plane, mut r_plane) = if left[axis] < right[axis] {
            (
                critical_plane_below(true_delinearized(left[axis])),
                critical_plane_above(true_delinearized(right[axis])),
            )
        } else {
            (
                critical_plane_above(true_delinearized(left[axis])),
                critical_plane_below(true_delinearized(right[axis])),
            )
        };
        for _ in 0..8 {
            if (r_plane - l_plane).abs() <= 1 {
                break;
            }
            let m_plane = (l_plane + r_plane).div_euclid(2);
            #[allow(clippy::cast_sign_loss)]
            let plane_index = m_plane.clamp(0, 254) as usize;
            let mid = set_coordinate(left, CRITICAL_PLANES[plane_index], right, axis);
            let mid_hue = hue_of(mid);
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                r_plane = m_plane;
            } else {
                left = mid;
                left_hue = mid_hue;
                l_plane = m_plane;
            }
        }
    }
    midpoint(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_planes_sit_between_codes() {
        assert!((CRITICAL_PLANES[0] - 0.015_176_349_177_441_876).abs() < 1e-12);
        assert!((CRITICAL_PLANES[1] - 0.045_529_047_532_325_624).abs() < 1e-12);
        assert!(CRITICAL_PLANES[254] < 100.0 && CRITICAL_PLANES[254] > 99.0);
    }

    #[test]
    fn gray_requests_short_circuit() {
        assert_eq!(solve_to_argb(123.0, 0.0, 50.0), Argb::from_lstar(50.0));
        assert_eq!(solve_to_argb(10.0, 40.0, 0.0), Argb::BLACK);
        assert_eq!(solve_to_argb(10.0, 40.0, 100.0), Argb::WHITE);
    }

    #[test]
    fn every_vertex_lies_on_the_luminance_plane() {
        let y = 40.0;
        for n in 0..12 {
            if let Some([r, g, b]) = nth_vertex(y, n) {
                let lum = Y_FROM_LINRGB[0] * r + Y_FROM_LINRGB[1] * g + Y_FROM_LINRGB[2] * b;
                assert!((lum - y).abs() < 1e-9, "vertex {n}: {lum}");
            }
        }
    }

    #[test]
    fn out_of_gamut_lands_on_the_boundary() {
        // Blue at tone 50 cannot reach chroma 200; the bisection stage
        // must return a saturated color of about the requested tone.
        let argb = solve_to_argb(282.0, 200.0, 50.0);
        let lstar = argb.lstar();
        assert!((lstar - 50.0).abs() < 1.0, "tone: {lstar}");
        assert!(argb.blue() > argb.red() && argb.blue() > argb.green(), "{argb}");
    }
}
