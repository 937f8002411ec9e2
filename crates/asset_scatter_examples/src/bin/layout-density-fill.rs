use asset_scatter::prelude::*;
use asset_scatter_examples::{init_tracing, render_layout_to_png, RenderConfig};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let sources = vec![
        AssetSource::new("leaf", 120, 80),
        AssetSource::new("stone", 90, 90),
        AssetSource::new("branch", 200, 60),
        AssetSource::new("flower", 70, 110),
    ];
    let pool = build_descriptors(&sources, 48.0);

    let canvas = Vec2::new(1024.0, 768.0);
    let request = LayoutRequest::new(canvas)
        .with_gap(6.0)
        .with_target_count(220);
    let runner = LayoutRunner::try_new(request)?;

    let mut rng = StdRng::seed_from_u64(42);
    let result = runner.run(&pool, &mut rng);

    info!(
        placed = result.placements.len(),
        evaluated = result.candidates_evaluated,
        rejected = result.candidates_rejected,
        "density fill finished"
    );

    let config = RenderConfig::new((1024, 768), canvas)
        .with_background([24, 24, 28])
        .with_jitter(0.4, 0.15);
    render_layout_to_png(
        &result,
        &pool,
        &config,
        &mut rng,
        "layout-density-fill.png",
    )?;
    Ok(())
}
