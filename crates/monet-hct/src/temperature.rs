// SPDX-License-Identifier: MIT
//
// Color temperature: where a color sits on a warm (orange) to cool (blue)
// axis, and the complements and analogous sets that fall out of ordering
// the hue wheel by it.
//
// The wheel is sampled once per integer hue at the input's chroma and
// tone. Everything is computed lazily on first use and kept for the life of
// the cache.

use std::sync::OnceLock;

use crate::hct::Hct;
use crate::math::{sanitize_degrees, sanitize_degrees_int};

/// Temperature queries around one input color.
pub struct TemperatureCache {
    input: Hct,
    wheel: OnceLock<Wheel>,
    complement: OnceLock<Hct>,
}

/// 361 samples (hue 0 through 360 inclusive) and their raw temperatures.
struct Wheel {
    hcts: Vec<Hct>,
    temps: Vec<f64>,
    input_temp: f64,
    coldest: f64,
    warmest: f64,
}

impl Wheel {
    fn build(input: &Hct) -> Self {
        let hcts: Vec<Hct> = (0..=360)
            .map(|hue| Hct::solve(f64::from(hue), input.chroma(), input.tone()))
            .collect();
        let temps: Vec<f64> = hcts.iter().map(raw_temperature).collect();
        let input_temp = raw_temperature(input);
        let coldest = temps.iter().copied().fold(input_temp, f64::min);
        let warmest = temps.iter().copied().fold(input_temp, f64::max);
        Self { hcts, temps, input_temp, coldest, warmest }
    }

    fn relative(&self, temp: f64) -> f64 {
        let range = self.warmest - self.coldest;
        if range == 0.0 { 0.5 } else { (temp - self.coldest) / range }
    }

    /// Index of the first sample at the extreme temperature, matching a
    /// stable sort of the samples (input appended last).
    fn hue_of_extreme(&self, extreme: f64, input: &Hct) -> f64 {
        self.temps
            .iter()
            .position(|&t| (t - extreme).abs() < f64::EPSILON)
            .map_or(input.hue(), |i| self.hcts[i].hue())
    }
}

impl TemperatureCache {
    #[must_use]
    pub const fn new(input: Hct) -> Self {
        Self { input, wheel: OnceLock::new(), complement: OnceLock::new() }
    }

    fn wheel(&self) -> &Wheel {
        self.wheel.get_or_init(|| Wheel::build(&self.input))
    }

    fn sample(&self, hue: i32) -> Hct {
        #[allow(clippy::cast_sign_loss)]
        let index = sanitize_degrees_int(hue) as usize;
        self.wheel().hcts[index]
    }

    /// Relative temperature of `hct` within the input's wheel: 0 is the
    /// coldest sample, 1 the warmest. A wheel with no temperature spread
    /// reports 0.5.
    #[must_use]
    pub fn relative_temperature(&self, hct: &Hct) -> f64 {
        self.wheel().relative(raw_temperature(hct))
    }

    /// The input's relative temperature.
    #[must_use]
    pub fn input_relative_temperature(&self) -> f64 {
        let wheel = self.wheel();
        wheel.relative(wheel.input_temp)
    }

    /// The color on the opposite side of the warm/cool axis at the same
    /// chroma and tone: among hues on the other arc between coldest and
    /// warmest, the one whose relative temperature is closest to
    /// `1 - relative(input)`.
    #[must_use]
    pub fn complement(&self) -> Hct {
        *self.complement.get_or_init(|| self.compute_complement())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn compute_complement(&self) -> Hct {
        let wheel = self.wheel();
        let coldest_hue = wheel.hue_of_extreme(wheel.coldest, &self.input);
        let warmest_hue = wheel.hue_of_extreme(wheel.warmest, &self.input);
        let range = wheel.warmest - wheel.coldest;

        let start_is_coldest_to_warmest = is_between(self.input.hue(), coldest_hue, warmest_hue);
        let (start_hue, end_hue) = if start_is_coldest_to_warmest {
            (warmest_hue, coldest_hue)
        } else {
            (coldest_hue, warmest_hue)
        };

        let mut smallest_error = 1000.0;
        let mut answer = self.sample(self.input.hue().round() as i32);
        let target = 1.0 - self.input_relative_temperature();

        for addend in 0..=360 {
            let hue = sanitize_degrees(start_hue + f64::from(addend));
            if !is_between(hue, start_hue, end_hue) {
                continue;
            }
            let index = hue.round() as i32;
            let candidate = self.sample(index);
            #[allow(clippy::cast_sign_loss)]
            let temp = wheel.temps[sanitize_degrees_int(index) as usize];
            let relative = if range == 0.0 { 0.5 } else { (temp - wheel.coldest) / range };
            let error = (target - relative).abs();
            if error < smallest_error {
                smallest_error = error;
                answer = candidate;
            }
        }
        answer
    }

    /// Five colors spread evenly by temperature around the input, input
    /// in the middle. Shorthand for `analogous(5, 12)`.
    #[must_use]
    pub fn analogous_default(&self) -> Vec<Hct> {
        self.analogous(5, 12)
    }

    /// `count` colors analogous to the input. The wheel is cut into
    /// `divisions` slices of equal temperature change; the result takes
    /// consecutive slices on both sides of the input, counter-clockwise
    /// ones first, with the input itself in the middle.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn analogous(&self, count: usize, divisions: usize) -> Vec<Hct> {
        if count == 0 || divisions == 0 {
            return Vec::new();
        }
        let start_hue = self.input.hue().round() as i32;
        let start = self.sample(start_hue);
        let mut last_temp = self.relative_temperature(&start);

        let mut absolute_total_delta = 0.0;
        for i in 0..360 {
            let temp = self.relative_temperature(&self.sample(start_hue + i));
            absolute_total_delta += (temp - last_temp).abs();
            last_temp = temp;
        }

        let temp_step = absolute_total_delta / divisions as f64;
        let mut all_colors = vec![start];
        let mut total_delta = 0.0;
        let mut hue_addend = 1;
        last_temp = self.relative_temperature(&start);

        while all_colors.len() < divisions {
            let hct = self.sample(start_hue + hue_addend);
            let temp = self.relative_temperature(&hct);
            total_delta += (temp - last_temp).abs();

            let mut desired = all_colors.len() as f64 * temp_step;
            let mut index_satisfied = total_delta >= desired;
            let mut index_addend = 1;
            // Hues whose step covers several slices fill each of them.
            while index_satisfied && all_colors.len() < divisions {
                all_colors.push(hct);
                desired = (all_colors.len() + index_addend) as f64 * temp_step;
                index_satisfied = total_delta >= desired;
                index_addend += 1;
            }

            last_temp = temp;
            hue_addend += 1;
            if hue_addend > 360 {
                all_colors.resize(divisions, hct);
                break;
            }
        }

        let len = all_colors.len() as i64;
        let pick = |offset: i64| all_colors[offset.rem_euclid(len) as usize];

        let ccw_count = (count - 1) / 2;
        let cw_count = count - ccw_count - 1;
        let mut answers: Vec<Hct> = (1..=ccw_count as i64).rev().map(|i| pick(-i)).collect();
        answers.push(self.input);
        answers.extend((1..=cw_count as i64).map(pick));
        answers
    }
}

/// Whether `angle` lies on the arc running counter-clockwise from `a` to
/// `b`, inclusive.
fn is_between(angle: f64, a: f64, b: f64) -> bool {
    if a < b { a <= angle && angle <= b } else { a <= angle || angle <= b }
}

/// Warmth of a color from its L*a*b* hue and chroma. Roughly -0.5 for
/// neutrals, rising toward orange (hue 50°) and falling toward blue.
#[must_use]
pub fn raw_temperature(color: &Hct) -> f64 {
    let [_, a, b] = color.to_argb().to_lab();
    let hue = sanitize_degrees(b.atan2(a).to_degrees());
    let chroma = a.hypot(b);
    (0.02 * chroma.powf(1.07)).mul_add(sanitize_degrees(hue - 50.0).to_radians().cos(), -0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argb::Argb;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Raw temperature ─────────────────────────────────────────────

    #[test]
    fn blue_is_cold_red_is_warm() {
        let blue = raw_temperature(&Hct::from_argb(Argb(0xFF00_00FF)));
        let red = raw_temperature(&Hct::from_argb(Argb(0xFFFF_0000)));
        let white = raw_temperature(&Hct::from_argb(Argb::WHITE));
        assert!(blue < -1.0, "blue: {blue}");
        assert!(red > 2.0, "red: {red}");
        assert!(approx_eq(white, -0.5, 0.01), "white: {white}");
    }

    // ── Relative temperature ────────────────────────────────────────

    #[test]
    fn relative_temperature_is_normalized() {
        let cache = TemperatureCache::new(Hct::from_argb(Argb(0xFF5C_6BC0)));
        let t = cache.input_relative_temperature();
        assert!((0.0..=1.0).contains(&t), "relative: {t}");
    }

    #[test]
    fn gray_wheel_is_neutral() {
        let cache = TemperatureCache::new(Hct::from_argb(Argb(0xFF80_8080)));
        let t = cache.input_relative_temperature();
        assert!((0.0..=1.0).contains(&t), "relative: {t}");
    }

    // ── Complement ──────────────────────────────────────────────────

    #[test]
    fn complement_of_blue_is_warm() {
        let blue = Hct::from_argb(Argb(0xFF00_00FF));
        let cache = TemperatureCache::new(blue);
        let complement = cache.complement();
        assert!(raw_temperature(&complement) > raw_temperature(&blue), "{complement:?}");
        assert!(approx_eq(complement.tone(), blue.tone(), 1.0), "{complement:?}");
    }

    #[test]
    fn complement_is_cached() {
        let cache = TemperatureCache::new(Hct::from_argb(Argb(0xFFFF_0000)));
        assert_eq!(cache.complement().to_argb(), cache.complement().to_argb());
    }

    // ── Analogous ───────────────────────────────────────────────────

    #[test]
    fn analogous_puts_input_in_the_middle() {
        let input = Hct::from_argb(Argb(0xFF5C_6BC0));
        let cache = TemperatureCache::new(input);
        let colors = cache.analogous(5, 12);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[2].to_argb(), input.to_argb());
    }

    #[test]
    fn analogous_three_of_six() {
        let cache = TemperatureCache::new(Hct::from_argb(Argb(0xFFFF_0000)));
        let colors = cache.analogous(3, 6);
        assert_eq!(colors.len(), 3);
        assert!(colors[2].hue() != colors[1].hue(), "{colors:?}");
    }
}
