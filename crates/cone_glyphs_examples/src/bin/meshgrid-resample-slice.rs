use cone_glyphs::prelude::*;
use cone_glyphs_examples::{init_tracing, render_cones_to_png, RenderConfig};
use glam::DVec3;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Coarse, unevenly spaced grid carrying a shear flow.
    let grid = Meshgrid::new(
        vec![-2.0, -1.0, -0.25, 0.25, 1.0, 2.0],
        vec![-2.0, -0.5, 0.5, 2.0],
        vec![0.0, 1.0],
    );
    let vectors: Vec<DVec3> = grid
        .points()
        .map(|p| DVec3::new(p.y.tanh(), 0.15 * p.x, 0.3 * p.z))
        .collect();
    let field = MeshgridField { grid, vectors };
    field.validate()?;

    // Place glyphs on a disk in the z = 0.5 plane; the rim pokes past the grid on purpose
    // so the out-of-domain samples show up as collapsed, zero-intensity cones.
    let mut queries = Vec::new();
    for ring in 0..=8 {
        let radius = ring as f64 * 0.3;
        let spokes = (ring * 6).max(1);
        for s in 0..spokes {
            let a = s as f64 / spokes as f64 * std::f64::consts::TAU;
            queries.push([radius * a.cos(), radius * a.sin(), 0.5]);
        }
    }
    let slice = field.resample(queries, false);
    let outside = slice.vectors.iter().filter(|v| **v == DVec3::ZERO).count();
    info!(
        "Resampled {} points, {} outside the grid.",
        slice.len(),
        outside
    );

    let geometry = generate_cones(&slice.into(), &GlyphOptions::built(), None);
    let rc = RenderConfig::new((1000, 1000)).with_view(0.0, 1.2);
    render_cones_to_png(&geometry, &rc, "meshgrid-resample-slice.png")?;
    Ok(())
}
