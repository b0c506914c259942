//! Wu's box-cut quantizer.
//!
//! Pixels are binned into a 32×32×32 histogram (5 bits per channel). Prefix
//! sums over the histogram give, for any axis-aligned box, its population,
//! first moments and second moment from eight lookups. From there:
//!
//! 1. Start with one box covering the whole cube.
//! 2. Cut the box with the greatest weighted variance at the plane (on
//!    whichever channel) that minimizes the variance of the two halves.
//! 3. Stop at `max_colors` boxes or when no box has variance left.
//!
//! Each box's population-weighted mean is a result color. Box order is the
//! order boxes were created in.
//!
//! Reference: Xiaolin Wu, "Efficient Statistical Computations for Optimal
//! Color Quantization", Graphics Gems II, 1991.

use std::ops::{Add, Sub};

use monet_hct::Argb;
use tracing::debug;

use crate::error::{QuantizeError, check_input};
use crate::map::histogram;
use crate::palette::QuantizedPalette;

const INDEX_BITS: u32 = 5;
const SIDE: usize = (1 << INDEX_BITS) + 1;
const TOTAL_SIZE: usize = SIDE * SIDE * SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Red,
    Green,
    Blue,
}

/// Half-open box `(r0, r1] × (g0, g1] × (b0, b1]` in histogram coordinates.
#[derive(Debug, Clone, Copy, Default)]
struct Cube {
    r0: usize,
    r1: usize,
    g0: usize,
    g1: usize,
    b0: usize,
    b1: usize,
    vol: usize,
}

impl Cube {
    const fn whole() -> Self {
        let last = SIDE - 1;
        Self { r0: 0, r1: last, g0: 0, g1: last, b0: 0, b1: last, vol: 0 }
    }

    const fn update_volume(&mut self) {
        self.vol = (self.r1 - self.r0) * (self.g1 - self.g0) * (self.b1 - self.b0);
    }
}

const fn index(r: usize, g: usize, b: usize) -> usize {
    r * SIDE * SIDE + g * SIDE + b
}

/// Cumulative moments over the histogram.
struct Moments {
    weights: Vec<i64>,
    red: Vec<i64>,
    green: Vec<i64>,
    blue: Vec<i64>,
    squares: Vec<f64>,
}

impl Moments {
    fn from_histogram(counts: &[(Argb, u32)]) -> Self {
        let mut m = Self {
            weights: vec![0; TOTAL_SIZE],
            red: vec![0; TOTAL_SIZE],
            green: vec![0; TOTAL_SIZE],
            blue: vec![0; TOTAL_SIZE],
            squares: vec![0.0; TOTAL_SIZE],
        };
        let shift = 8 - INDEX_BITS;
        for &(color, count) in counts {
            let (r, g, b) = (i64::from(color.red()), i64::from(color.green()), i64::from(color.blue()));
            let i = index(
                usize::from(color.red() >> shift) + 1,
                usize::from(color.green() >> shift) + 1,
                usize::from(color.blue() >> shift) + 1,
            );
            let count = i64::from(count);
            m.weights[i] += count;
            m.red[i] += count * r;
            m.green[i] += count * g;
            m.blue[i] += count * b;
            #[allow(clippy::cast_precision_loss)]
            let square = (count * (r * r + g * g + b * b)) as f64;
            m.squares[i] += square;
        }
        m.accumulate();
        m
    }

    /// Turn per-bin sums into 3-D prefix sums.
    fn accumulate(&mut self) {
        for r in 1..SIDE {
            let mut area = [0_i64; SIDE];
            let mut area_r = [0_i64; SIDE];
            let mut area_g = [0_i64; SIDE];
            let mut area_b = [0_i64; SIDE];
            let mut area2 = [0.0_f64; SIDE];
            for g in 1..SIDE {
                let (mut line, mut line_r, mut line_g, mut line_b) = (0_i64, 0_i64, 0_i64, 0_i64);
                let mut line2 = 0.0_f64;
                for b in 1..SIDE {
                    let i = index(r, g, b);
                    line += self.weights[i];
                    line_r += self.red[i];
                    line_g += self.green[i];
                    line_b += self.blue[i];
                    line2 += self.squares[i];

                    area[b] += line;
                    area_r[b] += line_r;
                    area_g[b] += line_g;
                    area_b[b] += line_b;
                    area2[b] += line2;

                    let prev = index(r - 1, g, b);
                    self.weights[i] = self.weights[prev] + area[b];
                    self.red[i] = self.red[prev] + area_r[b];
                    self.green[i] = self.green[prev] + area_g[b];
                    self.blue[i] = self.blue[prev] + area_b[b];
                    self.squares[i] = self.squares[prev] + area2[b];
                }
            }
        }
    }

    /// Weighted variance of the colors inside `cube`.
    #[allow(clippy::cast_precision_loss)]
    fn variance(&self, cube: &Cube) -> f64 {
        let dr = volume(cube, &self.red) as f64;
        let dg = volume(cube, &self.green) as f64;
        let db = volume(cube, &self.blue) as f64;
        let xx = volume(cube, &self.squares);
        let hypotenuse = dr.mul_add(dr, dg.mul_add(dg, db * db));
        let weight = volume(cube, &self.weights) as f64;
        xx - hypotenuse / weight
    }

    /// Split `one` in place, filling `two` with the other half. `false`
    /// when no cut separates any population.
    fn cut(&self, one: &mut Cube, two: &mut Cube) -> bool {
        let whole = Sums {
            r: volume(one, &self.red),
            g: volume(one, &self.green),
            b: volume(one, &self.blue),
            w: volume(one, &self.weights),
        };

        let (cut_r, max_r) = self.maximize(one, Direction::Red, one.r0 + 1, one.r1, whole);
        let (cut_g, max_g) = self.maximize(one, Direction::Green, one.g0 + 1, one.g1, whole);
        let (cut_b, max_b) = self.maximize(one, Direction::Blue, one.b0 + 1, one.b1, whole);

        let direction = if max_r >= max_g && max_r >= max_b {
            if cut_r.is_none() {
                return false;
            }
            Direction::Red
        } else if max_g >= max_r && max_g >= max_b {
            Direction::Green
        } else {
            Direction::Blue
        };

        two.r1 = one.r1;
        two.g1 = one.g1;
        two.b1 = one.b1;

        match direction {
            Direction::Red => {
                let Some(at) = cut_r else { return false };
                one.r1 = at;
                two.r0 = at;
                two.g0 = one.g0;
                two.b0 = one.b0;
            }
            Direction::Green => {
                let Some(at) = cut_g else { return false };
                one.g1 = at;
                two.r0 = one.r0;
                two.g0 = at;
                two.b0 = one.b0;
            }
            Direction::Blue => {
                let Some(at) = cut_b else { return false };
                one.b1 = at;
                two.r0 = one.r0;
                two.g0 = one.g0;
                two.b0 = at;
            }
        }

        one.update_volume();
        two.update_volume();
        true
    }

    /// Best cut plane along `direction` in `[first, last)`, with the summed
    /// `|moment|² / weight` of both halves it achieves.
    #[allow(clippy::cast_precision_loss)]
    fn maximize(
        &self,
        cube: &Cube,
        direction: Direction,
        first: usize,
        last: usize,
        whole: Sums,
    ) -> (Option<usize>, f64) {
        let base = Sums {
            r: bottom(cube, direction, &self.red),
            g: bottom(cube, direction, &self.green),
            b: bottom(cube, direction, &self.blue),
            w: bottom(cube, direction, &self.weights),
        };

        let mut max = 0.0;
        let mut cut = None;
        for i in first..last {
            let half = Sums {
                r: base.r + top(cube, direction, i, &self.red),
                g: base.g + top(cube, direction, i, &self.green),
                b: base.b + top(cube, direction, i, &self.blue),
                w: base.w + top(cube, direction, i, &self.weights),
            };
            if half.w == 0 {
                continue;
            }
            let rest = Sums { r: whole.r - half.r, g: whole.g - half.g, b: whole.b - half.b, w: whole.w - half.w };
            if rest.w == 0 {
                continue;
            }
            let temp = half.energy() + rest.energy();
            if temp > max {
                max = temp;
                cut = Some(i);
            }
        }
        (cut, max)
    }
}

#[derive(Debug, Clone, Copy)]
struct Sums {
    r: i64,
    g: i64,
    b: i64,
    w: i64,
}

impl Sums {
    #[allow(clippy::cast_precision_loss)]
    fn energy(self) -> f64 {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        r.mul_add(r, g.mul_add(g, b * b)) / self.w as f64
    }
}

fn volume<T>(cube: &Cube, m: &[T]) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T>,
{
    m[index(cube.r1, cube.g1, cube.b1)] - m[index(cube.r1, cube.g1, cube.b0)]
        - m[index(cube.r1, cube.g0, cube.b1)]
        + m[index(cube.r1, cube.g0, cube.b0)]
        - m[index(cube.r0, cube.g1, cube.b1)]
        + m[index(cube.r0, cube.g1, cube.b0)]
        + m[index(cube.r0, cube.g0, cube.b1)]
        - m[index(cube.r0, cube.g0, cube.b0)]
}

/// Sum over the face of `cube` at its lower bound on `direction`, negated.
fn bottom(cube: &Cube, direction: Direction, m: &[i64]) -> i64 {
    match direction {
        Direction::Red => {
            -m[index(cube.r0, cube.g1, cube.b1)] + m[index(cube.r0, cube.g1, cube.b0)]
                + m[index(cube.r0, cube.g0, cube.b1)]
                - m[index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Green => {
            -m[index(cube.r1, cube.g0, cube.b1)] + m[index(cube.r1, cube.g0, cube.b0)]
                + m[index(cube.r0, cube.g0, cube.b1)]
                - m[index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Blue => {
            -m[index(cube.r1, cube.g1, cube.b0)] + m[index(cube.r1, cube.g0, cube.b0)]
                + m[index(cube.r0, cube.g1, cube.b0)]
                - m[index(cube.r0, cube.g0, cube.b0)]
        }
    }
}

/// Sum over the slab of `cube` at `position` on `direction`.
fn top(cube: &Cube, direction: Direction, position: usize, m: &[i64]) -> i64 {
    match direction {
        Direction::Red => {
            m[index(position, cube.g1, cube.b1)] - m[index(position, cube.g1, cube.b0)]
                - m[index(position, cube.g0, cube.b1)]
                + m[index(position, cube.g0, cube.b0)]
        }
        Direction::Green => {
            m[index(cube.r1, position, cube.b1)] - m[index(cube.r1, position, cube.b0)]
                - m[index(cube.r0, position, cube.b1)]
                + m[index(cube.r0, position, cube.b0)]
        }
        Direction::Blue => {
            m[index(cube.r1, cube.g1, position)] - m[index(cube.r1, cube.g0, position)]
                - m[index(cube.r0, cube.g1, position)]
                + m[index(cube.r0, cube.g0, position)]
        }
    }
}

/// Cut the histogram into at most `max_colors` boxes.
fn create_boxes(moments: &Moments, max_colors: usize) -> Vec<Cube> {
    let mut cubes = vec![Cube::default(); max_colors];
    cubes[0] = Cube::whole();
    let mut variances = vec![0.0_f64; max_colors];

    let mut generated = max_colors;
    let mut next = 0;
    let mut i = 1;
    while i < max_colors {
        let (head, tail) = cubes.split_at_mut(i);
        if moments.cut(&mut head[next], &mut tail[0]) {
            variances[next] = if head[next].vol > 1 { moments.variance(&head[next]) } else { 0.0 };
            variances[i] = if tail[0].vol > 1 { moments.variance(&tail[0]) } else { 0.0 };
        } else {
            // Retry slot `i` with the next-best box.
            variances[next] = 0.0;
            i -= 1;
        }

        next = 0;
        let mut best = variances[0];
        for (j, &v) in variances.iter().enumerate().take(i + 1).skip(1) {
            if v > best {
                best = v;
                next = j;
            }
        }
        if best <= 0.0 {
            generated = i + 1;
            break;
        }
        i += 1;
    }

    cubes.truncate(generated);
    cubes
}

/// Reduce `pixels` to at most `max_colors` box means, each with its
/// population.
///
/// # Errors
///
/// [`QuantizeError::EmptyPixels`] or [`QuantizeError::ZeroColors`].
pub fn quantize(pixels: &[Argb], max_colors: usize) -> Result<QuantizedPalette, QuantizeError> {
    check_input(pixels, max_colors)?;
    let moments = Moments::from_histogram(&histogram(pixels));
    let cubes = create_boxes(&moments, max_colors);
    debug!(requested = max_colors, boxes = cubes.len(), "wu box cut done");

    let palette = cubes
        .iter()
        .filter_map(|cube| {
            let weight = volume(cube, &moments.weights);
            if weight <= 0 {
                return None;
            }
            let channel = |sum: i64| u8::try_from(sum / weight).unwrap_or(u8::MAX);
            let color = Argb::from_rgb(
                channel(volume(cube, &moments.red)),
                channel(volume(cube, &moments.green)),
                channel(volume(cube, &moments.blue)),
            );
            Some((color, u32::try_from(weight).unwrap_or(u32::MAX)))
        })
        .collect();
    Ok(palette)
}
