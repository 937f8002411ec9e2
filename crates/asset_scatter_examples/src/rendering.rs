//! PNG rendering for layout results.
//!
//! This is the rendering collaborator the library deliberately excludes:
//! placements come in as plain `{asset, position}` pairs and all visual
//! variation (rotation and scale jitter, colors, background) is applied here
//! at draw time. Jitter never feeds back into collision geometry.
use std::collections::HashMap;
use std::path::Path;

use asset_scatter::prelude::*;
use glam::Vec2;
use image::{Rgb, RgbImage};
use rand::rand_core::RngCore;

/// Installs a stdout tracing subscriber for the example binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Visual style for one asset id.
#[derive(Debug, Clone, Copy)]
pub struct AssetStyle {
    pub color: [u8; 3],
}

/// Configuration for rendering a layout result to an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// Canvas extent the placements were generated for.
    pub canvas_extent: Vec2,
    /// Background fill color.
    pub background: [u8; 3],
    /// Maximum absolute rotation jitter in radians.
    pub rotation_jitter: f32,
    /// Maximum relative scale jitter (0.2 = +/- 20%).
    pub scale_jitter: f32,
    styles: HashMap<AssetId, AssetStyle>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), canvas_extent: Vec2) -> Self {
        Self {
            image_size,
            canvas_extent,
            background: [255, 255, 255],
            rotation_jitter: 0.0,
            scale_jitter: 0.0,
            styles: HashMap::new(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_jitter(mut self, rotation: f32, scale: f32) -> Self {
        self.rotation_jitter = rotation;
        self.scale_jitter = scale;
        self
    }

    pub fn set_asset_style(&mut self, id: impl Into<AssetId>, style: AssetStyle) -> &mut Self {
        self.styles.insert(id.into(), style);
        self
    }

    fn style_for(&self, placement: &Placement) -> AssetStyle {
        if let Some(style) = self.styles.get(&placement.asset_id) {
            return *style;
        }
        // Fallback palette keyed by pool index.
        const PALETTE: [[u8; 3]; 6] = [
            [196, 84, 84],
            [84, 160, 96],
            [92, 112, 196],
            [200, 168, 72],
            [150, 96, 180],
            [80, 170, 170],
        ];
        AssetStyle {
            color: PALETTE[placement.asset_index % PALETTE.len()],
        }
    }
}

/// Renders each placement as a (jittered) filled rectangle and writes a PNG.
pub fn render_layout_to_png(
    result: &LayoutResult,
    pool: &[AssetDescriptor],
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    anyhow::ensure!(width > 0 && height > 0, "image size must be > 0");
    anyhow::ensure!(
        config.canvas_extent.x > 0.0 && config.canvas_extent.y > 0.0,
        "canvas extent must be > 0"
    );

    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));
    let scale = Vec2::new(
        width as f32 / config.canvas_extent.x,
        height as f32 / config.canvas_extent.y,
    );

    for placement in &result.placements {
        let descriptor = &pool[placement.asset_index];
        let style = config.style_for(placement);

        let jitter_scale = 1.0 + symmetric(rng) * config.scale_jitter;
        let rotation = symmetric(rng) * config.rotation_jitter;

        let center = placement.position * scale;
        let half = Vec2::new(
            descriptor.base_width * 0.5 * scale.x * jitter_scale,
            descriptor.base_height * 0.5 * scale.y * jitter_scale,
        );

        fill_rotated_rect(&mut img, center, half, rotation, Rgb(style.color));
    }

    img.save(path)?;
    Ok(())
}

/// Uniform random value in [-1, 1).
fn symmetric(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0) * 2.0 - 1.0
}

fn fill_rotated_rect(img: &mut RgbImage, center: Vec2, half: Vec2, rotation: f32, color: Rgb<u8>) {
    let bound = half.length().ceil();
    let min_x = ((center.x - bound).floor().max(0.0)) as u32;
    let min_y = ((center.y - bound).floor().max(0.0)) as u32;
    let max_x = ((center.x + bound).ceil() as i64).clamp(0, img.width() as i64) as u32;
    let max_y = ((center.y + bound).ceil() as i64).clamp(0, img.height() as i64) as u32;

    let (sin, cos) = rotation.sin_cos();

    for y in min_y..max_y {
        for x in min_x..max_x {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            // Inverse-rotate the pixel into the rectangle's local frame.
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
            if local.x.abs() <= half.x && local.y.abs() <= half.y {
                img.put_pixel(x, y, color);
            }
        }
    }
}
