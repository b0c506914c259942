//! Contrast requirement as a function of contrast level.

use monet_hct::math::lerp;

/// Minimum contrast ratios at the four control levels `-1`, `0`, `0.5`
/// and `1`. Levels in between interpolate linearly; levels beyond the ends
/// clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastCurve {
    pub low: f64,
    pub normal: f64,
    pub medium: f64,
    pub high: f64,
}

impl ContrastCurve {
    #[must_use]
    pub const fn new(low: f64, normal: f64, medium: f64, high: f64) -> Self {
        Self { low, normal, medium, high }
    }

    /// The required ratio at `level`.
    #[must_use]
    pub fn get(&self, level: f64) -> f64 {
        if level <= -1.0 {
            self.low
        } else if level < 0.0 {
            lerp(self.low, self.normal, level + 1.0)
        } else if level < 0.5 {
            lerp(self.normal, self.medium, level / 0.5)
        } else if level < 1.0 {
            lerp(self.medium, self.high, (level - 0.5) / 0.5)
        } else {
            self.high
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn control_points_are_exact() {
        let curve = ContrastCurve::new(3.0, 4.5, 7.0, 11.0);
        for (level, want) in [(-1.0, 3.0), (0.0, 4.5), (0.5, 7.0), (1.0, 11.0)] {
            assert!(approx_eq(curve.get(level), want), "level {level}: {}", curve.get(level));
        }
    }

    #[test]
    fn interpolates_between_points() {
        let curve = ContrastCurve::new(3.0, 4.5, 7.0, 11.0);
        assert!(approx_eq(curve.get(-0.5), 3.75));
        assert!(approx_eq(curve.get(0.25), 5.75));
        assert!(approx_eq(curve.get(0.75), 9.0));
    }

    #[test]
    fn clamps_outside_range() {
        let curve = ContrastCurve::new(1.0, 2.0, 3.0, 4.0);
        assert!(approx_eq(curve.get(-5.0), 1.0));
        assert!(approx_eq(curve.get(5.0), 4.0));
    }

    #[test]
    fn never_decreases_for_monotone_points() {
        let curve = ContrastCurve::new(4.5, 7.0, 11.0, 21.0);
        let mut previous = 0.0;
        for step in 0..=40 {
            let level = -1.0 + f64::from(step) * 0.05;
            let value = curve.get(level);
            assert!(value >= previous, "level {level}: {value} < {previous}");
            previous = value;
        }
    }
}
