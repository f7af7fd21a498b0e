use cone_glyphs::prelude::*;
use cone_glyphs_examples::{init_tracing, render_cones_to_png, RenderConfig};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

fn rand01(rng: &mut StdRng) -> f64 {
    (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0)
}

fn swirl(p: DVec3) -> DVec3 {
    DVec3::new(-p.y, p.x, 0.3) * (1.0 + 0.5 * p.z)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut positions: Vec<DVec3> = (0..300)
        .map(|_| {
            DVec3::new(
                rand01(&mut rng) * 4.0 - 2.0,
                rand01(&mut rng) * 4.0 - 2.0,
                rand01(&mut rng) * 2.0,
            )
        })
        .collect();

    // The spacing estimate only looks at successive points, so input order matters.
    let unordered =
        VectorField::from_points(positions.clone(), positions.iter().map(|&p| swirl(p)));
    positions.sort_by(|a, b| {
        (a.z, a.y, a.x)
            .partial_cmp(&(b.z, b.y, b.x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let ordered = VectorField::from_points(positions.clone(), positions.iter().map(|&p| swirl(p)));

    let options = GlyphOptions::built().with_cone_size(0.6);
    let a = generate_cones(&unordered, &options, None);
    let b = generate_cones(&ordered, &options, None);
    info!(
        "Vector scale: random order {:.5}, sorted order {:.5}.",
        a.vector_scale, b.vector_scale
    );

    let rc = RenderConfig::new((1000, 1000)).with_view(0.8, 0.5);
    render_cones_to_png(&b, &rc, "points-random-cloud-cones.png")?;
    Ok(())
}
