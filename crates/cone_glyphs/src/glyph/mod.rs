//! Cone glyph construction.
//!
//! Groups the configuration ([`GlyphOptions`]), the bounds/scale pass ([`FieldScale`]), the two
//! cone builders and the output record ([`ConeGeometry`]) they append to.
pub mod cone;
pub mod deferred;
pub mod frame;
pub mod geometry;
pub mod options;
pub mod scale;

pub use frame::ConeFrame;
pub use geometry::{ConeGeometry, VertexPositions};
pub use options::{ConeStyle, GlyphOptions};
pub use scale::{Bounds, FieldScale};

/// Radial segments swept around each cone.
pub const CONE_SEGMENTS: usize = 8;

/// Vertices emitted per segment (two unshared triangles).
pub const VERTICES_PER_SEGMENT: usize = 6;

/// Vertices emitted per cone, in both styles.
pub const VERTICES_PER_CONE: usize = CONE_SEGMENTS * VERTICES_PER_SEGMENT;

/// Triangles emitted per cone: one lateral and one base triangle per segment.
pub const TRIANGLES_PER_CONE: usize = CONE_SEGMENTS * 2;
