//! Rectilinear grid axes used by meshgrid vector fields.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Three ascending coordinate sequences describing a rectilinear grid.
///
/// Grid vertices are addressed in flattened order `z * W * H + y * W + x`, where `W = xs.len()`
/// and `H = ys.len()`. The same order is used by [`Meshgrid::points`] and by the trilinear
/// sampler, so vector arrays built against one are valid for the other.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Meshgrid {
    /// Axis positions along X.
    pub xs: Vec<f64>,
    /// Axis positions along Y.
    pub ys: Vec<f64>,
    /// Axis positions along Z.
    pub zs: Vec<f64>,
}

impl Meshgrid {
    pub fn new(xs: impl Into<Vec<f64>>, ys: impl Into<Vec<f64>>, zs: impl Into<Vec<f64>>) -> Self {
        Self {
            xs: xs.into(),
            ys: ys.into(),
            zs: zs.into(),
        }
    }

    /// Builds an axis of `count` evenly spaced values from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let last = count - 1;
                (0..count)
                    .map(|i| {
                        if i == last {
                            end
                        } else {
                            start + (end - start) * (i as f64 / last as f64)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Axis lengths as `(W, H, D)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.xs.len(), self.ys.len(), self.zs.len())
    }

    /// Axes in `[x, y, z]` order.
    pub fn axes(&self) -> [&[f64]; 3] {
        [&self.xs, &self.ys, &self.zs]
    }

    /// Number of grid vertices.
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len() * self.zs.len()
    }

    /// Returns `true` if any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn flat_index(&self, x: usize, y: usize, z: usize) -> usize {
        let (w, h, _) = self.dims();
        z * w * h + y * w + x
    }

    /// Splits a flattened index back into `(x, y, z)` axis indices.
    #[inline]
    pub fn unflatten(&self, index: usize) -> (usize, usize, usize) {
        let (w, h, _) = self.dims();
        let x = index % w;
        let y = (index / w) % h;
        let z = index / (w * h);
        (x, y, z)
    }

    /// World position of the vertex at the given axis indices.
    #[inline]
    pub fn point(&self, x: usize, y: usize, z: usize) -> DVec3 {
        DVec3::new(self.xs[x], self.ys[y], self.zs[z])
    }

    /// Iterates all grid vertices in flattened order (z outermost, x innermost).
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.zs.iter().flat_map(move |&z| {
            self.ys
                .iter()
                .flat_map(move |&y| self.xs.iter().map(move |&x| DVec3::new(x, y, z)))
        })
    }

    /// Checks that every axis is finite and non-decreasing.
    pub fn validate(&self) -> Result<()> {
        for (name, axis) in [("xs", &self.xs), ("ys", &self.ys), ("zs", &self.zs)] {
            if axis.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidField(format!(
                    "meshgrid axis {name} contains non-finite values"
                )));
            }
            if axis.windows(2).any(|w| w[1] < w[0]) {
                return Err(Error::InvalidField(format!(
                    "meshgrid axis {name} must be ascending"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Meshgrid {
        Meshgrid::new([0.0, 1.0, 2.0], [10.0, 20.0], [-1.0, 0.0, 1.0, 2.0])
    }

    #[test]
    fn flat_index_is_x_fastest() {
        let g = grid();
        assert_eq!(g.dims(), (3, 2, 4));
        assert_eq!(g.len(), 24);
        assert_eq!(g.flat_index(0, 0, 0), 0);
        assert_eq!(g.flat_index(1, 0, 0), 1);
        assert_eq!(g.flat_index(0, 1, 0), 3);
        assert_eq!(g.flat_index(0, 0, 1), 6);
        assert_eq!(g.flat_index(2, 1, 3), 23);
    }

    #[test]
    fn points_follow_flat_index_order() {
        let g = grid();
        let points: Vec<DVec3> = g.points().collect();
        assert_eq!(points.len(), g.len());
        for (i, p) in points.iter().enumerate() {
            let (x, y, z) = g.unflatten(i);
            assert_eq!(g.flat_index(x, y, z), i);
            assert_eq!(*p, g.point(x, y, z));
        }
    }

    #[test]
    fn empty_axis_makes_empty_grid() {
        let g = Meshgrid::new([0.0, 1.0], Vec::<f64>::new(), [0.0]);
        assert!(g.is_empty());
        assert_eq!(g.points().count(), 0);
    }

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(Meshgrid::linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(Meshgrid::linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(Meshgrid::linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn validate_rejects_descending_and_non_finite_axes() {
        assert!(grid().validate().is_ok());

        let descending = Meshgrid::new([0.0, 2.0, 1.0], [0.0], [0.0]);
        let err = descending.validate().unwrap_err();
        assert!(err.to_string().contains("xs must be ascending"));

        let nan = Meshgrid::new([0.0], [0.0, f64::NAN], [0.0]);
        assert!(nan.validate().is_err());

        // Repeated values are tolerated; the sampler substitutes a zero fraction.
        let repeated = Meshgrid::new([0.0, 0.0, 1.0], [0.0], [0.0]);
        assert!(repeated.validate().is_ok());
    }
}
