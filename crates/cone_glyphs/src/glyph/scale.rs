//! Bounds and scale pass.
//!
//! A single forward scan over the samples computes the axis-aligned bounding box, the largest
//! vector magnitude, and for ordered point lists a "time-like" spacing: the minimum over
//! successive pairs of `2 * |p[i-1] - p[i]| / (|v[i-1]| + |v[i]|)`, i.e. the time needed to
//! cross the gap at the pair's average speed. Successive pairs stand in for true nearest
//! neighbours to keep the pass linear.
use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::VectorField;
use crate::glyph::options::{ConeStyle, GlyphOptions};

/// Axis-aligned bounding box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    /// Degenerate box at the origin, reported for empty input.
    pub const ZERO: Bounds = Bounds {
        min: DVec3::ZERO,
        max: DVec3::ZERO,
    };

    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Corners as `[min, max]`.
    pub fn to_array(&self) -> [DVec3; 2] {
        [self.min, self.max]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::ZERO
    }
}

/// Global scale factors derived from one pass over a field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldScale {
    /// Number of samples scanned.
    pub samples: usize,
    /// Bounding box of the sample positions.
    pub bounds: Bounds,
    /// Largest vector magnitude, substituted with 1 when zero.
    pub max_magnitude: f64,
    /// `1 / max_magnitude`.
    pub inv_max_magnitude: f64,
    /// Minimum successive-sample travel time, substituted with 1 when non-finite.
    pub spacing: f64,
}

/// Running minimum that keeps a NaN once one has been seen.
#[inline]
fn sticky_nan_min(acc: f64, value: f64) -> f64 {
    if acc.is_nan() || value.is_nan() {
        f64::NAN
    } else {
        acc.min(value)
    }
}

impl FieldScale {
    /// Scans `(position, vector)` samples in order.
    ///
    /// With `track_spacing` unset the spacing is never measured and reports 1.
    pub fn scan(samples: impl IntoIterator<Item = (DVec3, DVec3)>, track_spacing: bool) -> Self {
        let mut count = 0usize;
        let mut min = DVec3::INFINITY;
        let mut max = DVec3::NEG_INFINITY;
        let mut max_magnitude = 0.0f64;
        let mut spacing = f64::INFINITY;
        let mut previous: Option<(DVec3, f64)> = None;

        for (p, v) in samples {
            count += 1;
            min = min.min(p);
            max = max.max(p);

            let magnitude = v.length();
            if magnitude > max_magnitude {
                max_magnitude = magnitude;
            }

            if track_spacing {
                if let Some((prev_p, prev_magnitude)) = previous {
                    let travel = 2.0 * prev_p.distance(p) / (prev_magnitude + magnitude);
                    spacing = sticky_nan_min(spacing, travel);
                }
                previous = Some((p, magnitude));
            }
        }

        let bounds = if count == 0 {
            Bounds::ZERO
        } else {
            Bounds::new(min, max)
        };
        if max_magnitude == 0.0 {
            max_magnitude = 1.0;
        }
        if !spacing.is_finite() {
            spacing = 1.0;
        }

        Self {
            samples: count,
            bounds,
            max_magnitude,
            inv_max_magnitude: 1.0 / max_magnitude,
            spacing,
        }
    }

    /// Scans a field, tracking spacing only for explicit point lists.
    pub fn from_field(field: &VectorField) -> Self {
        Self::scan(field.samples(), field.tracks_spacing())
    }

    /// Normalized intensity of a vector, in `[0, 1]` for vectors from the scanned field.
    #[inline]
    pub fn intensity(&self, vector: DVec3) -> f64 {
        vector.length() * self.inv_max_magnitude
    }

    /// Cone length factor for the given options.
    ///
    /// Built cones multiply the normalized vector by this factor, so an absolute size becomes
    /// `absolute * max_magnitude`. Deferred cones hand the raw vector to the shader, which
    /// expects `absolute / max_magnitude`. Zero sizes count as unset.
    pub fn cone_scale(&self, options: &GlyphOptions) -> f64 {
        let relative = options.resolved_cone_size();
        match options.absolute_cone_size.filter(|&s| s > 0.0) {
            Some(absolute) => match options.style {
                ConeStyle::Built => absolute * self.max_magnitude,
                ConeStyle::Deferred => absolute * self.inv_max_magnitude,
            },
            None => relative,
        }
    }
}
