use asset_scatter::prelude::*;
use asset_scatter_examples::{init_tracing, render_layout_to_png, RenderConfig};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // One descriptor per photo; unique mode uses each at most once.
    let sources: Vec<AssetSource> = (0..24)
        .map(|i| {
            let w = 160 + (i * 37) % 240;
            let h = 120 + (i * 53) % 200;
            AssetSource::new(format!("photo-{i:02}"), w as u32, h as u32)
        })
        .collect();
    let pool = build_descriptors(&sources, 140.0);

    let canvas = Vec2::new(1600.0, 1200.0);
    let request = LayoutRequest::new(canvas)
        .with_gap(12.0)
        .with_unique_only(true);
    let runner = LayoutRunner::try_new(request)?;

    let mut rng = StdRng::seed_from_u64(7);
    let result = runner.run(&pool, &mut rng);

    if result.placed_all(pool.len()) {
        info!(
            placed = result.placements.len(),
            restarts = result.restarts_used,
            "collage placed every photo"
        );
    } else {
        warn!(
            placed = result.placements.len(),
            pool = pool.len(),
            restarts = result.restarts_used,
            "collage is partial; consider a larger canvas or smaller gap"
        );
    }

    let config = RenderConfig::new((1600, 1200), canvas)
        .with_background([240, 236, 228])
        .with_jitter(0.25, 0.1);
    render_layout_to_png(
        &result,
        &pool,
        &config,
        &mut rng,
        "layout-unique-collage.png",
    )?;
    Ok(())
}
