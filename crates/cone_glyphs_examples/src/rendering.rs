//! Minimal software rasterizer for previewing built cone geometry as PNG.
use std::path::Path;

use anyhow::{bail, Context};
use cone_glyphs::prelude::*;
use glam::{DMat3, DVec3};
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Orthographic view and shading settings.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Output size in pixels (width, height).
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    /// Rotation about the world Y axis, radians.
    pub yaw: f64,
    /// Rotation about the view X axis, radians.
    pub pitch: f64,
    /// Direction towards the light in view space.
    pub light_dir: DVec3,
    /// Fraction of the image left empty around the geometry.
    pub margin: f64,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [24, 24, 28],
            yaw: 0.6,
            pitch: 0.45,
            light_dir: DVec3::new(0.3, 0.5, 1.0).normalize(),
            margin: 0.08,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_view(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

/// Maps an intensity in `[0, 1]` onto a blue, cyan, yellow, red ramp.
pub fn colormap(t: f64) -> [u8; 3] {
    const STOPS: [[f64; 3]; 4] = [
        [0.10, 0.20, 0.85],
        [0.10, 0.80, 0.85],
        [0.95, 0.90, 0.20],
        [0.90, 0.15, 0.10],
    ];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let x = t * (STOPS.len() - 1) as f64;
    let i = (x.floor() as usize).min(STOPS.len() - 2);
    let f = x - i as f64;
    let mut out = [0u8; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let v = STOPS[i][c] * (1.0 - f) + STOPS[i + 1][c] * f;
        *o = (v * 255.0).round() as u8;
    }
    out
}

#[inline]
fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Rasterizes built cone geometry with a z-buffer and Lambert shading, writing a PNG to `path`.
pub fn render_cones_to_png(
    geometry: &ConeGeometry,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let Some(positions) = geometry.positions.as_cartesian() else {
        bail!("deferred cones need a vertex shader to be drawn; build with ConeStyle::Built");
    };
    let path = path.as_ref();
    let (width, height) = config.image_size;
    if width == 0 || height == 0 {
        bail!("image size must be non-zero, got {width}x{height}");
    }
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    if positions.is_empty() {
        img.save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let rotation = DMat3::from_rotation_x(config.pitch) * DMat3::from_rotation_y(config.yaw);
    let center = geometry.bounds.center();
    let view: Vec<DVec3> = positions.iter().map(|&p| rotation * (p - center)).collect();
    let normals: Vec<DVec3> = geometry
        .vertex_normals
        .iter()
        .map(|&n| rotation * n)
        .collect();

    let (lo, hi) = view.iter().fold(
        (DVec3::INFINITY, DVec3::NEG_INFINITY),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    );
    let span_x = (hi.x - lo.x).max(1e-9);
    let span_y = (hi.y - lo.y).max(1e-9);
    let usable = 1.0 - 2.0 * config.margin;
    let scale = (width as f64 * usable / span_x).min(height as f64 * usable / span_y);
    let offset_x = (width as f64 - span_x * scale) * 0.5;
    let offset_y = (height as f64 - span_y * scale) * 0.5;
    let to_screen = |p: DVec3| -> (f64, f64) {
        (
            (p.x - lo.x) * scale + offset_x,
            height as f64 - ((p.y - lo.y) * scale + offset_y),
        )
    };

    let mut depth = vec![f64::NEG_INFINITY; (width as usize) * (height as usize)];
    let mut drawn = 0usize;

    for cell in &geometry.cells {
        let idx = cell.map(|i| i as usize);
        let s = idx.map(|i| to_screen(view[i]));
        let area = edge(s[0], s[1], s[2]);
        if area.abs() < 1e-12 {
            continue;
        }

        let min_x = s.iter().map(|p| p.0).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
        let max_x = s
            .iter()
            .map(|p| p.0)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(width as f64 - 1.0) as u32;
        let min_y = s.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
        let max_y = s
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(height as f64 - 1.0) as u32;

        let intensity = geometry.vertex_intensity[idx[0]];
        let base = colormap(intensity);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let p = (px as f64 + 0.5, py as f64 + 0.5);
                let w0 = edge(s[1], s[2], p) / area;
                let w1 = edge(s[2], s[0], p) / area;
                let w2 = edge(s[0], s[1], p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = view[idx[0]].z * w0 + view[idx[1]].z * w1 + view[idx[2]].z * w2;
                let slot = (py as usize) * (width as usize) + px as usize;
                if z <= depth[slot] {
                    continue;
                }
                depth[slot] = z;

                let n = (normals[idx[0]] * w0 + normals[idx[1]] * w1 + normals[idx[2]] * w2)
                    .normalize_or_zero();
                let shade = 0.25 + 0.75 * n.dot(config.light_dir).max(0.0);
                let rgb = base.map(|c| (c as f64 * shade).round().clamp(0.0, 255.0) as u8);
                img.put_pixel(px, py, Rgb(rgb));
            }
        }
        drawn += 1;
    }

    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Rendered {} of {} triangles to {}.",
        drawn,
        geometry.triangle_count(),
        path.display()
    );
    Ok(())
}
