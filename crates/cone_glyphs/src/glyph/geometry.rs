//! Output geometry record.
use glam::{DVec3, DVec4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cone::BuiltConeBuffers;
use super::deferred::DeferredConeBuffers;
use super::options::{ConeStyle, GlyphOptions};
use super::scale::{Bounds, FieldScale};

/// Vertex positions: cartesian for built cones, `(x, y, z, k)` tuples for deferred cones.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum VertexPositions {
    Cartesian(Vec<DVec3>),
    Indexed(Vec<DVec4>),
}

impl VertexPositions {
    pub fn len(&self) -> usize {
        match self {
            VertexPositions::Cartesian(p) => p.len(),
            VertexPositions::Indexed(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_cartesian(&self) -> Option<&[DVec3]> {
        match self {
            VertexPositions::Cartesian(p) => Some(p),
            VertexPositions::Indexed(_) => None,
        }
    }

    pub fn as_indexed(&self) -> Option<&[DVec4]> {
        match self {
            VertexPositions::Indexed(p) => Some(p),
            VertexPositions::Cartesian(_) => None,
        }
    }

    /// Spatial part of vertex `i`.
    #[inline]
    pub fn xyz(&self, i: usize) -> DVec3 {
        match self {
            VertexPositions::Cartesian(p) => p[i],
            VertexPositions::Indexed(p) => p[i].truncate(),
        }
    }
}

/// Geometry buffers produced by one generator invocation.
///
/// `positions`, `vertex_intensity` and either `vertex_normals` (built style) or `vectors`
/// (deferred style) have one entry per vertex. `cells` index into `positions`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ConeGeometry {
    /// Style the buffers were built for.
    pub style: ConeStyle,
    pub positions: VertexPositions,
    /// Normalized vector magnitude, constant across each cone.
    pub vertex_intensity: Vec<f64>,
    /// Per-vertex normals; empty for deferred cones.
    pub vertex_normals: Vec<DVec3>,
    /// Raw per-vertex field vectors; present for deferred cones only.
    pub vectors: Option<Vec<DVec3>>,
    pub cells: Vec<[u32; 3]>,
    /// Bounding box of the sample positions.
    pub bounds: Bounds,
    /// Minimum successive-sample travel time.
    pub vector_scale: f64,
    /// Cone length factor.
    pub cone_scale: f64,
    pub cone_offset: Option<f64>,
    pub colormap: Option<String>,
    pub vertex_intensity_bounds: Option<(f64, f64)>,
}

impl ConeGeometry {
    /// An empty record for `style` with unit scales.
    pub fn empty(style: ConeStyle) -> Self {
        match style {
            ConeStyle::Built => BuiltConeBuffers::new().into(),
            ConeStyle::Deferred => DeferredConeBuffers::new().into(),
        }
    }

    /// Copies the scan results and pass-through options onto the record.
    pub fn with_metadata(
        mut self,
        scale: &FieldScale,
        cone_scale: f64,
        options: &GlyphOptions,
    ) -> Self {
        self.bounds = scale.bounds;
        self.vector_scale = scale.spacing;
        self.cone_scale = cone_scale;
        self.cone_offset = options.cone_offset;
        self.colormap = options.colormap.clone();
        self.vertex_intensity_bounds = options.vertex_intensity_bounds;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Triangle indices as a flat index buffer.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Checks buffer alignment and that every cell index refers to an existing vertex.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        let attributes_aligned = match self.style {
            ConeStyle::Built => {
                self.vertex_normals.len() == n
                    && self.vectors.is_none()
                    && self.positions.as_cartesian().is_some()
            }
            ConeStyle::Deferred => {
                self.vectors.as_ref().is_some_and(|v| v.len() == n)
                    && self.positions.as_indexed().is_some()
            }
        };
        attributes_aligned
            && self.vertex_intensity.len() == n
            && self
                .cells
                .iter()
                .flatten()
                .all(|&i| (i as usize) < n)
    }
}

impl From<BuiltConeBuffers> for ConeGeometry {
    fn from(buffers: BuiltConeBuffers) -> Self {
        Self {
            style: ConeStyle::Built,
            positions: VertexPositions::Cartesian(buffers.positions),
            vertex_intensity: buffers.vertex_intensity,
            vertex_normals: buffers.vertex_normals,
            vectors: None,
            cells: buffers.cells,
            bounds: Bounds::ZERO,
            vector_scale: 1.0,
            cone_scale: ConeStyle::Built.default_cone_size(),
            cone_offset: None,
            colormap: None,
            vertex_intensity_bounds: None,
        }
    }
}

impl From<DeferredConeBuffers> for ConeGeometry {
    fn from(buffers: DeferredConeBuffers) -> Self {
        Self {
            style: ConeStyle::Deferred,
            positions: VertexPositions::Indexed(buffers.positions),
            vertex_intensity: buffers.vertex_intensity,
            vertex_normals: Vec::new(),
            vectors: Some(buffers.vectors),
            cells: buffers.cells,
            bounds: Bounds::ZERO,
            vector_scale: 1.0,
            cone_scale: ConeStyle::Deferred.default_cone_size(),
            cone_offset: None,
            colormap: None,
            vertex_intensity_bounds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_records_are_consistent() {
        for style in [ConeStyle::Built, ConeStyle::Deferred] {
            let geometry = ConeGeometry::empty(style);
            assert!(geometry.is_empty());
            assert!(geometry.is_consistent());
            assert_eq!(geometry.bounds, Bounds::ZERO);
            assert_eq!(geometry.cone_scale, style.default_cone_size());
        }
    }

    #[test]
    fn built_buffers_convert_with_cartesian_positions() {
        let mut buffers = BuiltConeBuffers::new();
        buffers.append(DVec3::ZERO, DVec3::X, 1.0);
        let geometry = ConeGeometry::from(buffers);
        assert!(geometry.positions.as_cartesian().is_some());
        assert!(geometry.vectors.is_none());
        assert!(geometry.is_consistent());
        assert_eq!(geometry.flat_indices().len(), 3 * geometry.triangle_count());
    }

    #[test]
    fn deferred_buffers_convert_with_indexed_positions() {
        let mut buffers = DeferredConeBuffers::new();
        buffers.append(DVec3::new(1.0, 2.0, 3.0), DVec3::Z, 1.0);
        let geometry = ConeGeometry::from(buffers);
        assert!(geometry.positions.as_indexed().is_some());
        assert_eq!(geometry.positions.xyz(5), DVec3::new(1.0, 2.0, 3.0));
        assert!(geometry.vertex_normals.is_empty());
        assert!(geometry.is_consistent());
    }

    #[test]
    fn out_of_range_cell_is_inconsistent() {
        let mut geometry = ConeGeometry::from({
            let mut b = BuiltConeBuffers::new();
            b.append(DVec3::ZERO, DVec3::X, 1.0);
            b
        });
        geometry.cells.push([0, 1, 48]);
        assert!(!geometry.is_consistent());
    }

    #[test]
    fn metadata_copies_pass_through_options() {
        let scale = FieldScale::scan([(DVec3::ZERO, DVec3::X), (DVec3::ONE, DVec3::Y)], true);
        let options = GlyphOptions::deferred()
            .with_colormap("jet")
            .with_cone_offset(0.25)
            .with_vertex_intensity_bounds(0.0, 1.0);
        let geometry =
            ConeGeometry::empty(ConeStyle::Deferred).with_metadata(&scale, 0.75, &options);
        assert_eq!(geometry.bounds.max, DVec3::ONE);
        assert_eq!(geometry.vector_scale, scale.spacing);
        assert_eq!(geometry.cone_scale, 0.75);
        assert_eq!(geometry.colormap.as_deref(), Some("jet"));
        assert_eq!(geometry.cone_offset, Some(0.25));
        assert_eq!(geometry.vertex_intensity_bounds, Some((0.0, 1.0)));
    }
}
