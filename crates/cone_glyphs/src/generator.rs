//! Top-level cone generator.
//!
//! Runs the bounds/scale pass over the field, then a second pass that appends one cone per
//! sample in the configured style. Each call is independent; nothing is cached between calls.
use tracing::{debug, warn};

use crate::error::Result;
use crate::field::VectorField;
use crate::glyph::cone::BuiltConeBuffers;
use crate::glyph::deferred::DeferredConeBuffers;
use crate::glyph::{Bounds, ConeGeometry, ConeStyle, FieldScale, GlyphOptions, VERTICES_PER_CONE};

/// Largest number of cones whose vertices stay addressable by `u32` indices.
pub const MAX_CONES: usize = u32::MAX as usize / VERTICES_PER_CONE;

/// Generates cone glyph geometry for `field`.
///
/// Never fails: mismatched point/vector counts use the common prefix, and numeric degeneracies
/// are substituted with safe defaults. When `bounds_out` is given it receives the bounding box
/// of the sample positions (the origin box for empty input).
pub fn generate_cones(
    field: &VectorField,
    options: &GlyphOptions,
    bounds_out: Option<&mut Bounds>,
) -> ConeGeometry {
    if let VectorField::Points(points) = field {
        if points.positions.len() != points.vectors.len() {
            warn!(
                "Vector field has {} positions but {} vectors; using the first {}.",
                points.positions.len(),
                points.vectors.len(),
                points.len()
            );
        }
    }

    let scale = FieldScale::from_field(field);
    if let Some(out) = bounds_out {
        *out = scale.bounds;
    }
    let cone_scale = scale.cone_scale(options);
    debug!(
        "Scanned {} samples: max magnitude {}, spacing {}, cone scale {}.",
        scale.samples, scale.max_magnitude, scale.spacing, cone_scale
    );

    if scale.samples == 0 {
        return ConeGeometry::empty(options.style).with_metadata(&scale, cone_scale, options);
    }

    let cones = if scale.samples > MAX_CONES {
        warn!(
            "Vector field has {} samples; only the first {} fit u32 indices.",
            scale.samples, MAX_CONES
        );
        MAX_CONES
    } else {
        scale.samples
    };

    let geometry: ConeGeometry = match options.style {
        ConeStyle::Built => {
            let length_factor = scale.inv_max_magnitude * cone_scale;
            let mut buffers = BuiltConeBuffers::with_capacity(cones);
            for (position, vector) in field.samples().take(cones) {
                buffers.append(position, vector * length_factor, scale.intensity(vector));
            }
            buffers.into()
        }
        ConeStyle::Deferred => {
            let mut buffers = DeferredConeBuffers::with_capacity(cones);
            for (position, vector) in field.samples().take(cones) {
                buffers.append(position, vector, scale.intensity(vector));
            }
            buffers.into()
        }
    };

    let geometry = geometry.with_metadata(&scale, cone_scale, options);
    debug!(
        "Built {} {:?} cones: {} vertices, {} triangles.",
        cones,
        options.style,
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    geometry
}

/// Validating variant of [`generate_cones`].
///
/// Rejects mismatched or malformed fields and invalid options before generating.
pub fn try_generate_cones(
    field: &VectorField,
    options: &GlyphOptions,
    bounds_out: Option<&mut Bounds>,
) -> Result<ConeGeometry> {
    field.validate()?;
    options.validate()?;
    Ok(generate_cones(field, options, bounds_out))
}

/// Reusable generator holding validated options.
#[derive(Clone, Debug, Default)]
pub struct ConeGenerator {
    /// Options applied to every call.
    pub options: GlyphOptions,
}

impl ConeGenerator {
    pub fn try_new(options: GlyphOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn new(options: GlyphOptions) -> Self {
        debug_assert!(options.validate().is_ok(), "invalid glyph options");
        Self { options }
    }

    /// Generates geometry for `field`. See [`generate_cones`].
    pub fn generate(&self, field: &VectorField) -> ConeGeometry {
        generate_cones(field, &self.options, None)
    }

    /// Generates geometry and writes the sample bounding box into `bounds`.
    pub fn generate_into_bounds(&self, field: &VectorField, bounds: &mut Bounds) -> ConeGeometry {
        generate_cones(field, &self.options, Some(bounds))
    }

    /// Validates `field`, then generates geometry.
    pub fn try_generate(&self, field: &VectorField) -> Result<ConeGeometry> {
        field.validate()?;
        Ok(self.generate(field))
    }
}
