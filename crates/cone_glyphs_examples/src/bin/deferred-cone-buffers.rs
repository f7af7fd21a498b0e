use cone_glyphs::prelude::*;
use cone_glyphs_examples::init_tracing;
use glam::DVec3;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Wind-like samples on a regular lattice, emitted as explicit points.
    let mut positions = Vec::new();
    let mut vectors = Vec::new();
    for z in 0..4 {
        for y in 0..6 {
            for x in 0..6 {
                let p = DVec3::new(x as f64, y as f64, z as f64 * 0.5);
                positions.push(p);
                vectors.push(DVec3::new(1.0 + 0.2 * p.z, (p.x * 0.8).sin(), 0.05 * p.y));
            }
        }
    }
    let field = VectorField::from_points(positions, vectors);

    let options = GlyphOptions::deferred()
        .with_absolute_cone_size(0.8)
        .with_cone_offset(0.25)
        .with_colormap("portland")
        .with_vertex_intensity_bounds(0.0, 1.0);
    let generator = ConeGenerator::try_new(options)?;
    let geometry = generator.try_generate(&field)?;

    // A vertex shader would rebuild each cone from (position.xyz, position.w, vector).
    let indexed = geometry.positions.as_indexed().unwrap_or(&[]);
    let max_k = indexed.iter().map(|p| p.w).fold(0.0, f64::max);
    info!(
        "{} vertices, {} triangles, {} index entries.",
        geometry.vertex_count(),
        geometry.triangle_count(),
        geometry.flat_indices().len()
    );
    info!(
        "Shader parameters: vector_scale {:.4}, cone_scale {:.4}, cone_offset {:?}, max vertex index {}.",
        geometry.vector_scale, geometry.cone_scale, geometry.cone_offset, max_k
    );
    info!(
        "Buffers consistent: {}; bounds {:?}..{:?}.",
        geometry.is_consistent(),
        geometry.bounds.min,
        geometry.bounds.max
    );
    Ok(())
}
