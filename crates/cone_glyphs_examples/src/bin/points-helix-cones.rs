use cone_glyphs::prelude::*;
use cone_glyphs_examples::{init_tracing, render_cones_to_png, RenderConfig};
use glam::DVec3;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Samples along a rising helix, ordered so successive points are neighbours.
    let count = 120usize;
    let positions: Vec<DVec3> = (0..count)
        .map(|i| {
            let t = i as f64 / count as f64 * std::f64::consts::TAU * 3.0;
            DVec3::new(t.cos() * 4.0, t * 0.6, t.sin() * 4.0)
        })
        .collect();

    // Tangent vectors whose speed grows with height.
    let vectors: Vec<DVec3> = positions
        .iter()
        .map(|p| {
            let tangent = DVec3::new(-p.z, 1.0, p.x).normalize();
            tangent * (0.2 + p.y / 12.0)
        })
        .collect();

    let field = VectorField::from_points(positions, vectors);
    let generator = ConeGenerator::try_new(GlyphOptions::built().with_cone_size(1.2))?;

    let mut bounds = Bounds::default();
    let geometry = generator.generate_into_bounds(&field, &mut bounds);
    info!(
        "Helix bounds {:?}..{:?}, vector scale {:.4}.",
        bounds.min, bounds.max, geometry.vector_scale
    );

    let rc = RenderConfig::new((1000, 1000)).with_view(0.4, 0.35);
    render_cones_to_png(&geometry, &rc, "points-helix-cones.png")?;
    Ok(())
}
