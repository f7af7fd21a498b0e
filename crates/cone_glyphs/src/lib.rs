#![forbid(unsafe_code)]
//! cone_glyphs: cone-glyph triangle meshes for 3D vector fields.
//!
//! Modules:
//! - field: point-list and meshgrid vector fields, trilinear meshgrid sampling
//! - glyph: options, bounds/scale pass, CPU-built and GPU-deferred cone builders, output record
//! - generator: the two-pass generator tying them together
//!
//! The output is plain geometry buffers (positions, normals, intensities, triangle indices);
//! drawing them is left to the caller.
pub mod error;
pub mod field;
pub mod generator;
pub mod glyph;

/// Convenient re-exports for common types. Import with `use cone_glyphs::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        sample_meshgrid, Meshgrid, MeshgridField, PointField, Samples, VectorField,
    };
    pub use crate::generator::{generate_cones, try_generate_cones, ConeGenerator};
    pub use crate::glyph::{
        Bounds, ConeFrame, ConeGeometry, ConeStyle, FieldScale, GlyphOptions, VertexPositions,
        CONE_SEGMENTS, TRIANGLES_PER_CONE, VERTICES_PER_CONE,
    };
}
