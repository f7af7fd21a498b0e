#![allow(dead_code)]

use std::time::Duration;

use cone_glyphs::prelude::TRIANGLES_PER_CONE;
use criterion::{Criterion, Throughput};

/// Criterion settings shared by the glyph and sampler benches.
///
/// Large cone fields allocate tens of megabytes per iteration, so fewer, longer samples.
pub fn glyph_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(15)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3))
        .noise_threshold(0.03)
}

/// Throughput in emitted triangles for a field with `samples` cones.
pub fn cones_throughput(samples: usize) -> Throughput {
    Throughput::Elements((samples.max(1) * TRIANGLES_PER_CONE) as u64)
}

/// Throughput in trilinear lookups.
pub fn queries_throughput(queries: usize) -> Throughput {
    Throughput::Elements(queries as u64)
}
