#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{colormap, init_tracing, render_cones_to_png, RenderConfig};
