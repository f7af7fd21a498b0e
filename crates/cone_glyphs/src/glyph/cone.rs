//! CPU-built oriented cones.
//!
//! Each cone has its apex at the sample position and its base centre at `position - direction`,
//! with a base radius of a quarter of the cone length. The rim is sampled at 9 angles over
//! `0..=2π`, giving 8 segments; every segment adds a lateral triangle and a base triangle with
//! unshared vertices, so per-vertex normals can differ between the side wall and the cap.
use std::f64::consts::TAU;

use glam::DVec3;

use super::frame::ConeFrame;
use super::{CONE_SEGMENTS, TRIANGLES_PER_CONE, VERTICES_PER_CONE};

/// Base radius as a fraction of cone length.
pub const CONE_RADIUS_RATIO: f64 = 0.25;

/// Length-synchronized vertex buffers for CPU-built cones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuiltConeBuffers {
    pub positions: Vec<DVec3>,
    pub vertex_normals: Vec<DVec3>,
    pub vertex_intensity: Vec<f64>,
    pub cells: Vec<[u32; 3]>,
}

impl BuiltConeBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocates room for `cones` glyphs.
    pub fn with_capacity(cones: usize) -> Self {
        let vertices = cones * VERTICES_PER_CONE;
        Self {
            positions: Vec::with_capacity(vertices),
            vertex_normals: Vec::with_capacity(vertices),
            vertex_intensity: Vec::with_capacity(vertices),
            cells: Vec::with_capacity(cones * TRIANGLES_PER_CONE),
        }
    }

    fn push_triangle(&mut self, corners: [DVec3; 3], normals: [DVec3; 3], intensity: f64) {
        let first = self.positions.len() as u32;
        self.positions.extend(corners);
        self.vertex_normals.extend(normals);
        self.vertex_intensity.extend([intensity; 3]);
        self.cells.push([first, first + 1, first + 2]);
    }

    /// Appends one cone with its apex at `apex`, pointing along `direction`.
    ///
    /// `direction` is already scaled to the final cone length. A zero direction collapses the
    /// cone onto the apex; its triangles are degenerate and carry zero normals.
    pub fn append(&mut self, apex: DVec3, direction: DVec3, intensity: f64) {
        let frame = ConeFrame::new(direction);
        let radius = direction.length() * CONE_RADIUS_RATIO;
        let base = apex - direction;
        let back = (-direction).normalize_or_zero();

        let mut previous: Option<(DVec3, DVec3)> = None;
        for k in 0..=CONE_SEGMENTS {
            let angle = k as f64 / CONE_SEGMENTS as f64 * TAU;
            let rim = base + frame.radial(angle, radius);
            let normal = (rim - apex).cross(frame.tangent(angle)).normalize_or_zero();

            if let Some((prev_rim, prev_normal)) = previous {
                self.push_triangle([rim, prev_rim, apex], [normal, prev_normal, normal], intensity);
                self.push_triangle([base, prev_rim, rim], [back; 3], intensity);
            }
            previous = Some((rim, normal));
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn rand01(rng: &mut StdRng) -> f64 {
        (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0)
    }

    fn rand_signed(rng: &mut StdRng) -> f64 {
        rand01(rng) * 2.0 - 1.0
    }

    fn face_normal(buffers: &BuiltConeBuffers, cell: [u32; 3]) -> DVec3 {
        let [a, b, c] = cell.map(|i| buffers.positions[i as usize]);
        (b - a).cross(c - a)
    }

    #[test]
    fn cone_has_sixteen_triangles() {
        let mut buffers = BuiltConeBuffers::new();
        buffers.append(DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), 1.0);
        assert_eq!(buffers.vertex_count(), VERTICES_PER_CONE);
        assert_eq!(buffers.vertex_normals.len(), VERTICES_PER_CONE);
        assert_eq!(buffers.vertex_intensity.len(), VERTICES_PER_CONE);
        assert_eq!(buffers.cells.len(), TRIANGLES_PER_CONE);
        for (i, cell) in buffers.cells.iter().enumerate() {
            let first = (i * 3) as u32;
            assert_eq!(*cell, [first, first + 1, first + 2]);
        }
    }

    #[test]
    fn apex_base_and_radius_follow_direction() {
        let mut buffers = BuiltConeBuffers::new();
        let apex = DVec3::new(1.0, 1.0, 1.0);
        let direction = DVec3::new(0.0, 0.0, 4.0);
        buffers.append(apex, direction, 0.5);

        // Lateral triangle: (rim_k, rim_k-1, apex); base triangle: (base, rim_k-1, rim_k).
        assert_eq!(buffers.positions[2], apex);
        assert_eq!(buffers.positions[3], apex - direction);
        for cell in buffers.cells.iter().step_by(2) {
            let rim = buffers.positions[cell[0] as usize];
            let offset = rim - (apex - direction);
            assert!((offset.length() - 1.0).abs() < 1e-12);
            assert!(offset.dot(direction).abs() < 1e-12);
        }
        assert!(buffers.vertex_intensity.iter().all(|&i| i == 0.5));
    }

    #[test]
    fn base_triangles_share_backward_normal() {
        let mut buffers = BuiltConeBuffers::new();
        let direction = DVec3::new(3.0, 0.0, 4.0);
        buffers.append(DVec3::ZERO, direction, 1.0);
        let back = -direction.normalize();
        for cell in buffers.cells.iter().skip(1).step_by(2) {
            for &i in cell {
                assert!(buffers.vertex_normals[i as usize].abs_diff_eq(back, 1e-12));
            }
        }
    }

    #[test]
    fn normals_are_unit_and_outward_for_random_directions() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let apex = DVec3::new(
                rand_signed(&mut rng),
                rand_signed(&mut rng),
                rand_signed(&mut rng),
            ) * 10.0;
            let direction = DVec3::new(
                rand_signed(&mut rng),
                rand_signed(&mut rng),
                rand_signed(&mut rng),
            );
            if direction.length() < 1e-3 {
                continue;
            }
            let mut buffers = BuiltConeBuffers::new();
            buffers.append(apex, direction, 1.0);

            for n in &buffers.vertex_normals {
                assert!((n.length() - 1.0).abs() < 1e-9, "normal {n:?}");
            }
            let centroid = apex - direction * 0.5;
            for &cell in &buffers.cells {
                let geometric = face_normal(&buffers, cell);
                let first = buffers.positions[cell[0] as usize];
                // Counter-clockwise winding faces away from the cone interior.
                assert!(geometric.dot(first - centroid) > 0.0);
                for &i in &cell {
                    assert!(geometric.dot(buffers.vertex_normals[i as usize]) > 0.0);
                }
            }
        }
    }

    #[test]
    fn y_aligned_direction_builds_valid_cone() {
        let mut buffers = BuiltConeBuffers::new();
        buffers.append(DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0), 1.0);
        assert!(buffers.positions.iter().all(|p| p.is_finite()));
        assert!(buffers
            .vertex_normals
            .iter()
            .all(|n| (n.length() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn zero_direction_collapses_without_nan() {
        let mut buffers = BuiltConeBuffers::new();
        let apex = DVec3::new(2.0, -1.0, 0.5);
        buffers.append(apex, DVec3::ZERO, 0.0);
        assert_eq!(buffers.cells.len(), TRIANGLES_PER_CONE);
        assert!(buffers.positions.iter().all(|&p| p == apex));
        assert!(buffers.vertex_normals.iter().all(|&n| n == DVec3::ZERO));
    }
}
