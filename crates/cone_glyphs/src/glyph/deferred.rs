//! GPU-deferred cones.
//!
//! Instead of building the cone here, every vertex carries the sample position plus its index
//! within the cone as a fourth coordinate, and the raw field vector. The vertex shader derives
//! the cone frame and the vertex's place on it from those.
use glam::{DVec3, DVec4};

use super::{CONE_SEGMENTS, TRIANGLES_PER_CONE, VERTICES_PER_CONE, VERTICES_PER_SEGMENT};

/// Length-synchronized vertex buffers for GPU-deferred cones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeferredConeBuffers {
    /// `(x, y, z, k)` with `k` the vertex index within its cone, `0..48`.
    pub positions: Vec<DVec4>,
    pub vectors: Vec<DVec3>,
    pub vertex_intensity: Vec<f64>,
    pub cells: Vec<[u32; 3]>,
}

impl DeferredConeBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cones: usize) -> Self {
        let vertices = cones * VERTICES_PER_CONE;
        Self {
            positions: Vec::with_capacity(vertices),
            vectors: Vec::with_capacity(vertices),
            vertex_intensity: Vec::with_capacity(vertices),
            cells: Vec::with_capacity(cones * TRIANGLES_PER_CONE),
        }
    }

    /// Appends the vertex tuples of one cone. No vertices are shared with other cones.
    pub fn append(&mut self, position: DVec3, vector: DVec3, intensity: f64) {
        let mut k = 0usize;
        for _ in 0..CONE_SEGMENTS {
            let first = self.positions.len() as u32;
            for _ in 0..VERTICES_PER_SEGMENT {
                self.positions.push(position.extend(k as f64));
                self.vectors.push(vector);
                self.vertex_intensity.push(intensity);
                k += 1;
            }
            self.cells.push([first, first + 1, first + 2]);
            self.cells.push([first + 3, first + 4, first + 5]);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_emits_indexed_tuples() {
        let mut buffers = DeferredConeBuffers::new();
        let p = DVec3::new(1.0, 2.0, 3.0);
        let v = DVec3::new(0.0, -1.0, 0.5);
        buffers.append(p, v, 0.25);

        assert_eq!(buffers.vertex_count(), VERTICES_PER_CONE);
        assert_eq!(buffers.vectors.len(), VERTICES_PER_CONE);
        assert_eq!(buffers.vertex_intensity.len(), VERTICES_PER_CONE);
        assert_eq!(buffers.cells.len(), TRIANGLES_PER_CONE);
        for (k, pos) in buffers.positions.iter().enumerate() {
            assert_eq!(pos.truncate(), p);
            assert_eq!(pos.w, k as f64);
        }
        assert!(buffers.vectors.iter().all(|&x| x == v));
        assert!(buffers.vertex_intensity.iter().all(|&i| i == 0.25));
    }

    #[test]
    fn vertex_index_restarts_per_cone_and_cells_keep_increasing() {
        let mut buffers = DeferredConeBuffers::with_capacity(2);
        buffers.append(DVec3::ZERO, DVec3::X, 1.0);
        buffers.append(DVec3::ONE, DVec3::Y, 0.5);

        assert_eq!(buffers.positions[VERTICES_PER_CONE].w, 0.0);
        assert_eq!(buffers.positions[2 * VERTICES_PER_CONE - 1].w, 47.0);

        let flat: Vec<u32> = buffers.cells.iter().flatten().copied().collect();
        let expected: Vec<u32> = (0..(2 * VERTICES_PER_CONE) as u32).collect();
        assert_eq!(flat, expected);
    }
}
