use cone_glyphs::prelude::*;
use cone_glyphs_examples::{init_tracing, render_cones_to_png, RenderConfig};
use glam::DVec3;

/// Rankine-style vortex around the Z axis with a weak updraft near the core.
fn vortex(p: DVec3) -> DVec3 {
    let r = (p.x * p.x + p.y * p.y).sqrt();
    let core = 0.6;
    let swirl = if r < core { r / core } else { core / r };
    let around = DVec3::new(-p.y, p.x, 0.0).normalize_or_zero() * swirl;
    around + DVec3::Z * (0.4 * (-r * r * 4.0).exp())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let grid = Meshgrid::new(
        Meshgrid::linspace(-2.0, 2.0, 9),
        Meshgrid::linspace(-2.0, 2.0, 9),
        Meshgrid::linspace(0.0, 1.5, 4),
    );
    let vectors: Vec<DVec3> = grid.points().map(vortex).collect();
    let field = VectorField::from(MeshgridField { grid, vectors });

    // Grid fields resample every vertex through the trilinear sampler.
    let options = GlyphOptions::built()
        .with_cone_size(0.9)
        .with_colormap("ramp");
    let geometry = try_generate_cones(&field, &options, None)?;

    let rc = RenderConfig::new((1000, 1000))
        .with_view(0.3, 0.9)
        .with_background([236, 238, 242]);
    render_cones_to_png(&geometry, &rc, "meshgrid-vortex-cones.png")?;
    Ok(())
}
