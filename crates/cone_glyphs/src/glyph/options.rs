//! Glyph configuration.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default relative cone size for CPU-built cones.
pub const DEFAULT_BUILT_CONE_SIZE: f64 = 2.0;

/// Default relative cone size for GPU-deferred cones.
pub const DEFAULT_DEFERRED_CONE_SIZE: f64 = 0.5;

/// How cone geometry is produced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConeStyle {
    /// Oriented cones built on the CPU with positions and per-vertex normals.
    #[default]
    Built,
    /// Position/index tuples plus raw vectors; the cone frame is built in the vertex shader.
    Deferred,
}

impl ConeStyle {
    /// Relative cone size used when none is configured.
    pub fn default_cone_size(self) -> f64 {
        match self {
            ConeStyle::Built => DEFAULT_BUILT_CONE_SIZE,
            ConeStyle::Deferred => DEFAULT_DEFERRED_CONE_SIZE,
        }
    }
}

/// Options for a single generator invocation.
///
/// `colormap`, `vertex_intensity_bounds` and `cone_offset` are not interpreted here; they are
/// copied onto the output for the rendering stage.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOptions {
    /// Glyph construction style.
    pub style: ConeStyle,
    /// Relative cone size; defaults per style.
    pub cone_size: Option<f64>,
    /// Cone size in field units, overriding `cone_size`.
    pub absolute_cone_size: Option<f64>,
    /// Offset of the cone along its axis, applied by the renderer.
    pub cone_offset: Option<f64>,
    /// Colormap identifier for the renderer.
    pub colormap: Option<String>,
    /// Intensity range hint for the colormap lookup.
    pub vertex_intensity_bounds: Option<(f64, f64)>,
}

impl GlyphOptions {
    /// Creates options for the given style with all other settings at their defaults.
    pub fn new(style: ConeStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Shorthand for [`ConeStyle::Built`] options.
    pub fn built() -> Self {
        Self::new(ConeStyle::Built)
    }

    /// Shorthand for [`ConeStyle::Deferred`] options.
    pub fn deferred() -> Self {
        Self::new(ConeStyle::Deferred)
    }

    /// Sets the relative cone size.
    pub fn with_cone_size(mut self, cone_size: f64) -> Self {
        self.cone_size = Some(cone_size);
        self
    }

    /// Sets the absolute cone size.
    pub fn with_absolute_cone_size(mut self, size: f64) -> Self {
        self.absolute_cone_size = Some(size);
        self
    }

    /// Sets the cone offset.
    pub fn with_cone_offset(mut self, offset: f64) -> Self {
        self.cone_offset = Some(offset);
        self
    }

    /// Sets the colormap identifier.
    pub fn with_colormap(mut self, colormap: impl Into<String>) -> Self {
        self.colormap = Some(colormap.into());
        self
    }

    /// Sets the intensity range hint.
    pub fn with_vertex_intensity_bounds(mut self, min: f64, max: f64) -> Self {
        self.vertex_intensity_bounds = Some((min, max));
        self
    }

    /// Relative cone size, falling back to the style default when unset or zero.
    pub fn resolved_cone_size(&self) -> f64 {
        self.cone_size
            .filter(|&s| s > 0.0)
            .unwrap_or_else(|| self.style.default_cone_size())
    }

    /// Validates the options, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cone_size", self.cone_size),
            ("absolute_cone_size", self.absolute_cone_size),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::InvalidOptions(format!(
                        "{name} must be finite and >= 0, got {v}"
                    )));
                }
            }
        }
        if let Some(offset) = self.cone_offset {
            if !offset.is_finite() {
                return Err(Error::InvalidOptions("cone_offset must be finite".into()));
            }
        }
        if let Some((min, max)) = self.vertex_intensity_bounds {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(Error::InvalidOptions(format!(
                    "vertex_intensity_bounds must satisfy min <= max, got ({min}, {max})"
                )));
            }
        }
        Ok(())
    }
}
