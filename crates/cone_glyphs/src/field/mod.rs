//! Vector field descriptors consumed by the glyph generator.
//!
//! A field is either an explicit list of `(position, vector)` pairs ([`PointField`]) or a
//! rectilinear grid of vectors ([`MeshgridField`]). Grid fields are read through the trilinear
//! sampler at each grid vertex, so both variants present the same sample stream to the
//! bounds/scale pass and the cone builders.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::glyph::VERTICES_PER_CONE;

pub mod meshgrid;
pub mod sampler;

pub use meshgrid::Meshgrid;
pub use sampler::{last_smaller_index, sample_meshgrid};

fn to_dvec3s<T>(values: impl IntoIterator<Item = T>) -> Vec<DVec3>
where
    T: Into<mint::Vector3<f64>>,
{
    values
        .into_iter()
        .map(|v| DVec3::from(v.into()))
        .collect()
}

fn check_vertex_budget(samples: usize) -> Result<()> {
    let vertices = samples.checked_mul(VERTICES_PER_CONE);
    match vertices {
        Some(n) if n <= u32::MAX as usize => Ok(()),
        _ => Err(Error::InvalidField(format!(
            "{samples} samples exceed the u32 vertex index range"
        ))),
    }
}

/// Explicit sample positions with index-aligned vectors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointField {
    pub positions: Vec<DVec3>,
    pub vectors: Vec<DVec3>,
}

impl PointField {
    /// Number of usable samples (the shorter of the two arrays).
    pub fn len(&self) -> usize {
        self.positions.len().min(self.vectors.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.positions.len() != self.vectors.len() {
            return Err(Error::InvalidField(format!(
                "{} positions but {} vectors",
                self.positions.len(),
                self.vectors.len()
            )));
        }
        check_vertex_budget(self.positions.len())
    }
}

/// Vectors stored on the vertices of a [`Meshgrid`], flattened `z * W * H + y * W + x`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshgridField {
    pub grid: Meshgrid,
    pub vectors: Vec<DVec3>,
}

impl MeshgridField {
    /// Samples the field at `point`. See [`sample_meshgrid`].
    #[inline]
    pub fn sample(&self, point: DVec3, clamp_overflow: bool) -> DVec3 {
        sample_meshgrid(point, &self.vectors, &self.grid, clamp_overflow)
    }

    /// Resamples the grid at arbitrary query points, producing an explicit point field.
    ///
    /// Points the sampler rejects (see [`sample_meshgrid`]) carry a zero vector.
    pub fn resample<T>(
        &self,
        points: impl IntoIterator<Item = T>,
        clamp_overflow: bool,
    ) -> PointField
    where
        T: Into<mint::Vector3<f64>>,
    {
        let positions = to_dvec3s(points);
        let vectors = positions
            .iter()
            .map(|&p| self.sample(p, clamp_overflow))
            .collect();
        PointField { positions, vectors }
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.vectors.len() != self.grid.len() {
            let (w, h, d) = self.grid.dims();
            return Err(Error::InvalidField(format!(
                "meshgrid {w}x{h}x{d} needs {} vectors, got {}",
                self.grid.len(),
                self.vectors.len()
            )));
        }
        check_vertex_budget(self.grid.len())
    }
}

/// A vector field given either as explicit samples or on a rectilinear grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum VectorField {
    Points(PointField),
    Meshgrid(MeshgridField),
}

impl VectorField {
    /// Builds a point-list field from index-aligned positions and vectors.
    pub fn from_points<P, V>(
        positions: impl IntoIterator<Item = P>,
        vectors: impl IntoIterator<Item = V>,
    ) -> Self
    where
        P: Into<mint::Vector3<f64>>,
        V: Into<mint::Vector3<f64>>,
    {
        VectorField::Points(PointField {
            positions: to_dvec3s(positions),
            vectors: to_dvec3s(vectors),
        })
    }

    /// Builds a grid field from a meshgrid and its flattened vectors.
    pub fn from_meshgrid<V>(grid: Meshgrid, vectors: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<mint::Vector3<f64>>,
    {
        VectorField::Meshgrid(MeshgridField {
            grid,
            vectors: to_dvec3s(vectors),
        })
    }

    /// Number of samples the generator will visit.
    pub fn sample_count(&self) -> usize {
        match self {
            VectorField::Points(f) => f.len(),
            VectorField::Meshgrid(f) => f.grid.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Whether successive-sample spacing is meaningful for this field.
    ///
    /// Only explicit point lists carry an author-chosen order; grid vertices do not.
    pub fn tracks_spacing(&self) -> bool {
        matches!(self, VectorField::Points(_))
    }

    /// Iterates `(position, vector)` pairs in input order.
    pub fn samples(&self) -> Samples<'_> {
        match self {
            VectorField::Points(f) => Samples::Points {
                positions: &f.positions,
                vectors: &f.vectors,
                next: 0,
                len: f.len(),
            },
            VectorField::Meshgrid(f) => Samples::Meshgrid {
                field: f,
                next: 0,
                len: f.grid.len(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            VectorField::Points(f) => f.validate(),
            VectorField::Meshgrid(f) => f.validate(),
        }
    }
}

impl From<PointField> for VectorField {
    fn from(value: PointField) -> Self {
        VectorField::Points(value)
    }
}

impl From<MeshgridField> for VectorField {
    fn from(value: MeshgridField) -> Self {
        VectorField::Meshgrid(value)
    }
}

/// Iterator over the `(position, vector)` samples of a [`VectorField`].
#[derive(Clone, Debug)]
pub enum Samples<'a> {
    Points {
        positions: &'a [DVec3],
        vectors: &'a [DVec3],
        next: usize,
        len: usize,
    },
    Meshgrid {
        field: &'a MeshgridField,
        next: usize,
        len: usize,
    },
}

impl Iterator for Samples<'_> {
    type Item = (DVec3, DVec3);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Samples::Points {
                positions,
                vectors,
                next,
                len,
            } => {
                if *next >= *len {
                    return None;
                }
                let i = *next;
                *next += 1;
                Some((positions[i], vectors[i]))
            }
            Samples::Meshgrid { field, next, len } => {
                if *next >= *len {
                    return None;
                }
                let (x, y, z) = field.grid.unflatten(*next);
                *next += 1;
                let p = field.grid.point(x, y, z);
                Some((p, field.sample(p, true)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self {
            Samples::Points { next, len, .. } | Samples::Meshgrid { next, len, .. } => {
                len - next
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid_field() -> MeshgridField {
        let grid = Meshgrid::new([0.0, 1.0, 2.0], [0.0, 1.0], [0.0, 1.0]);
        let vectors = grid.points().map(|p| DVec3::new(p.x, -p.y, 2.0 * p.z)).collect();
        MeshgridField { grid, vectors }
    }

    #[test]
    fn from_points_accepts_arrays_and_glam() {
        let field = VectorField::from_points(
            [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]],
            [DVec3::X, DVec3::new(0.0, 2.0, 0.0)],
        );
        assert_eq!(field.sample_count(), 2);
        let samples: Vec<_> = field.samples().collect();
        assert_eq!(samples[1], (DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 2.0, 0.0)));
        assert!(field.validate().is_ok());
    }

    #[test]
    fn mismatched_points_use_common_prefix() {
        let field = VectorField::from_points(
            [[0.0; 3], [1.0; 3], [2.0; 3]],
            [[1.0, 0.0, 0.0]],
        );
        assert_eq!(field.sample_count(), 1);
        assert_eq!(field.samples().len(), 1);
        assert!(matches!(field.validate(), Err(Error::InvalidField(_))));
    }

    #[test]
    fn meshgrid_samples_visit_every_vertex_in_order() {
        let field = small_grid_field();
        let expected = field.vectors.clone();
        let vf = VectorField::from(field);
        assert!(!vf.tracks_spacing());
        let samples: Vec<_> = vf.samples().collect();
        assert_eq!(samples.len(), 12);
        for (i, (p, v)) in samples.into_iter().enumerate() {
            assert_eq!(v, expected[i], "vertex {i} at {p:?}");
        }
    }

    #[test]
    fn meshgrid_validate_checks_vector_count() {
        let mut field = small_grid_field();
        assert!(field.validate().is_ok());
        field.vectors.pop();
        let err = field.validate().unwrap_err();
        assert!(err.to_string().contains("needs 12 vectors, got 11"));
    }

    #[test]
    fn resample_produces_point_field() {
        let field = small_grid_field();
        let queries = [[0.5, 0.5, 0.5], [1.5, 1.0, 0.5], [3.0, 0.5, 0.5], [0.0, 0.0, 0.0]];
        let points = field.resample(queries, false);
        assert_eq!(points.len(), 4);
        assert!(points.vectors[0].abs_diff_eq(DVec3::new(0.5, -0.5, 1.0), 1e-12));
        assert!(points.vectors[1].abs_diff_eq(DVec3::new(1.5, -1.0, 1.0), 1e-12));
        assert_eq!(points.vectors[2], DVec3::ZERO);
        assert_eq!(points.vectors[3], DVec3::ZERO);

        let clamped = field.resample(queries, true);
        assert!(clamped.vectors[2].abs_diff_eq(DVec3::new(2.0, -0.5, 1.0), 1e-12));
        assert_eq!(clamped.vectors[3], field.vectors[0]);
    }

    #[test]
    fn vertex_budget_rejects_overflowing_fields() {
        assert!(check_vertex_budget(1_000).is_ok());
        assert!(check_vertex_budget(usize::MAX / 2).is_err());
    }
}
