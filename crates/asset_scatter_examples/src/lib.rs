#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_layout_to_png, AssetStyle, RenderConfig};
