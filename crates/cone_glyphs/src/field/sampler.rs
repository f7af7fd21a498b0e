//! Trilinear resampling of meshgrid vector fields.
//!
//! Queries outside the grid resolve to the zero vector rather than an error so that a
//! partially covered domain still produces glyphs for the covered part.
use glam::DVec3;

use super::meshgrid::Meshgrid;

/// Index of the last axis value strictly smaller than `coordinate`.
///
/// Equivalent to scanning the axis in increasing order, stopping at the first value `>=
/// coordinate` and stepping back one. A coordinate beyond every value (or NaN, which compares
/// false against everything) falls through to the last index. Returns `-1` when the first axis
/// value is already `>= coordinate`.
#[inline]
pub fn last_smaller_index(axis: &[f64], coordinate: f64) -> isize {
    let first_not_smaller = if coordinate.is_nan() {
        axis.len()
    } else {
        axis.partition_point(|&v| v < coordinate)
    };
    first_not_smaller as isize - 1
}

/// Bracketing indices and blend fraction along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisSpan {
    lo: usize,
    hi: usize,
    t: f64,
}

fn axis_span(axis: &[f64], coordinate: f64, clamp_overflow: bool) -> Option<AxisSpan> {
    let n = axis.len() as isize;
    if n == 0 {
        return None;
    }

    let mut i0 = last_smaller_index(axis, coordinate);
    let mut i1 = i0 + 1;
    if clamp_overflow {
        i0 = i0.clamp(0, n - 1);
        i1 = i1.clamp(0, n - 1);
    }
    if i0 < 0 || i1 >= n {
        return None;
    }

    let (lo, hi) = (i0 as usize, i1 as usize);
    let t = (coordinate - axis[lo]) / (axis[hi] - axis[lo]);
    // Collapsed spans (clamped i0 == i1, repeated axis values) give NaN or out-of-range fractions.
    let t = if t.is_nan() || !(0.0..=1.0).contains(&t) {
        0.0
    } else {
        t
    };
    Some(AxisSpan { lo, hi, t })
}

#[inline]
fn lerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

/// Samples the flattened `vectors` array at `point` by trilinear interpolation over `grid`.
///
/// With `clamp_overflow`, bracketing indices are clamped into each axis so points past the grid
/// edge take the boundary value. Without it, any point outside the grid on some axis yields
/// [`DVec3::ZERO`]. Vectors missing from a short `vectors` array also read as zero.
pub fn sample_meshgrid(
    point: DVec3,
    vectors: &[DVec3],
    grid: &Meshgrid,
    clamp_overflow: bool,
) -> DVec3 {
    let [xs, ys, zs] = grid.axes();
    let (Some(sx), Some(sy), Some(sz)) = (
        axis_span(xs, point.x, clamp_overflow),
        axis_span(ys, point.y, clamp_overflow),
        axis_span(zs, point.z, clamp_overflow),
    ) else {
        return DVec3::ZERO;
    };

    let at = |x: usize, y: usize, z: usize| -> DVec3 {
        vectors
            .get(grid.flat_index(x, y, z))
            .copied()
            .unwrap_or(DVec3::ZERO)
    };

    // Along x
    let c00 = lerp(at(sx.lo, sy.lo, sz.lo), at(sx.hi, sy.lo, sz.lo), sx.t);
    let c10 = lerp(at(sx.lo, sy.hi, sz.lo), at(sx.hi, sy.hi, sz.lo), sx.t);
    let c01 = lerp(at(sx.lo, sy.lo, sz.hi), at(sx.hi, sy.lo, sz.hi), sx.t);
    let c11 = lerp(at(sx.lo, sy.hi, sz.hi), at(sx.hi, sy.hi, sz.hi), sx.t);
    // Along y
    let c0 = lerp(c00, c10, sy.t);
    let c1 = lerp(c01, c11, sy.t);
    // Along z
    lerp(c0, c1, sz.t)
}
