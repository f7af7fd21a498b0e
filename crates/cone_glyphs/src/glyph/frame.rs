//! Orthonormal frames perpendicular to a cone axis.
use glam::DVec3;

/// Two unit vectors spanning the plane perpendicular to a cone direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeFrame {
    pub u: DVec3,
    pub v: DVec3,
}

impl ConeFrame {
    /// Basis used when the direction is zero.
    pub const FALLBACK: ConeFrame = ConeFrame {
        u: DVec3::X,
        v: DVec3::Z,
    };

    /// Builds `u = normalize(Y x d)` and `v = normalize(u x d)`.
    ///
    /// Directions parallel to Y take X as the reference instead; a zero (or non-finite)
    /// direction yields [`ConeFrame::FALLBACK`].
    pub fn new(direction: DVec3) -> Self {
        let u = DVec3::Y
            .cross(direction)
            .try_normalize()
            .or_else(|| DVec3::X.cross(direction).try_normalize());
        let Some(u) = u else {
            return Self::FALLBACK;
        };
        let v = u
            .cross(direction)
            .try_normalize()
            .unwrap_or_else(|| u.any_orthonormal_vector());
        Self { u, v }
    }

    /// Offset from the axis to the rim point at `angle`.
    #[inline]
    pub fn radial(&self, angle: f64, radius: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        self.u * (cos * radius) + self.v * (sin * radius)
    }

    /// Rim tangent at `angle`, pointing in the direction of decreasing angle.
    #[inline]
    pub fn tangent(&self, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        self.u * sin - self.v * cos
    }
}
