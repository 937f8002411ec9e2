//! High-level orchestration: request/result types and strategy dispatch.
use glam::Vec2;
use rand::rand_core::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::asset::{AssetDescriptor, AssetId};
use crate::error::{Error, Result};
use crate::layout::prioritized::PrioritizedLayout;
use crate::layout::unique::UniqueLayout;
use crate::layout::{LayoutStrategy, DEFAULT_ATTEMPTS_PER_POINT};

/// A placed instance of an asset at a canvas position.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Identifier of the placed asset.
    pub asset_id: AssetId,
    /// Index of the placed asset in the descriptor pool.
    pub asset_index: usize,
    /// Center position in canvas coordinates.
    pub position: Vec2,
}

/// Configuration for a layout run.
///
/// An immutable value handed to the orchestrator; re-running with changed
/// parameters means building a new request. Rendering concerns (rotation and
/// scale jitter, backgrounds, export) live with the consumer of the returned
/// placements and never influence collision geometry.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutRequest {
    /// Canvas size in pixels.
    pub canvas_extent: Vec2,
    /// Minimum empty space between the boundaries of two placed assets.
    pub gap: f32,
    /// Sample count to fill towards. Ignored in unique-only mode.
    pub target_count: usize,
    /// Place every pool asset at most once.
    pub unique_only: bool,
    /// Candidate attempts per active point in density-target mode.
    pub attempts_per_point: usize,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        Self {
            canvas_extent: Vec2::ZERO,
            gap: 0.0,
            target_count: 0,
            unique_only: false,
            attempts_per_point: DEFAULT_ATTEMPTS_PER_POINT,
        }
    }
}

impl LayoutRequest {
    /// Creates a new [`LayoutRequest`] for the given canvas size.
    pub fn new(canvas_extent: impl Into<mint::Vector2<f32>>) -> Self {
        Self {
            canvas_extent: Vec2::from(canvas_extent.into()),
            ..Default::default()
        }
    }

    /// Sets the minimum boundary-to-boundary spacing.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the target sample count for density-target mode.
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    /// Toggles unique-only mode.
    pub fn with_unique_only(mut self, unique_only: bool) -> Self {
        self.unique_only = unique_only;
        self
    }

    /// Sets the per-point candidate budget for density-target mode.
    pub fn with_attempts_per_point(mut self, attempts_per_point: usize) -> Self {
        self.attempts_per_point = attempts_per_point;
        self
    }

    /// Validates the request, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_extent.x <= 0.0 || self.canvas_extent.y <= 0.0 {
            return Err(Error::InvalidConfig(
                "canvas_extent must be > 0 in both components".into(),
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(Error::InvalidConfig("gap must be finite and >= 0".into()));
        }
        if self.attempts_per_point == 0 {
            return Err(Error::InvalidConfig("attempts_per_point must be > 0".into()));
        }
        if !self.unique_only && self.target_count == 0 {
            return Err(Error::InvalidConfig(
                "target_count must be > 0 in density-target mode".into(),
            ));
        }

        Ok(())
    }
}

/// Result of a layout run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    /// Placements in insertion order (first accepted sample first).
    pub placements: Vec<Placement>,
    /// Total candidate positions evaluated.
    pub candidates_evaluated: usize,
    /// Total candidate positions rejected.
    pub candidates_rejected: usize,
    /// Restart attempts consumed (unique mode only; 0 otherwise).
    pub restarts_used: usize,
}

impl LayoutResult {
    /// Creates a new empty [`LayoutResult`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placements and returns a new instance.
    pub fn with_placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = placements;
        self
    }

    /// Whether every asset of a pool of `pool_size` was placed. In unique
    /// mode this distinguishes complete from best-effort partial results.
    pub fn placed_all(&self, pool_size: usize) -> bool {
        self.placements.len() == pool_size
    }
}

/// Orchestrator bundling a validated request.
#[derive(Debug, Clone)]
pub struct LayoutRunner {
    /// Request applied to every run of this runner.
    pub request: LayoutRequest,
}

impl LayoutRunner {
    pub fn try_new(request: LayoutRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self { request })
    }

    pub fn new(request: LayoutRequest) -> Self {
        debug_assert!(
            request.canvas_extent.x > 0.0 && request.canvas_extent.y > 0.0,
            "canvas_extent must be > 0 in both components"
        );
        debug_assert!(
            request.gap.is_finite() && request.gap >= 0.0,
            "gap must be finite and >= 0"
        );

        Self { request }
    }

    /// Runs the layout for the given pool, returning the result.
    pub fn run(&self, pool: &[AssetDescriptor], rng: &mut impl RngCore) -> LayoutResult {
        generate_layout(pool, &self.request, rng)
    }
}

/// Generates a layout for the pool under the request.
///
/// Selects the strategy from the unique-only flag. An empty pool is not an
/// error: it yields an empty result.
pub fn generate_layout<R: RngCore>(
    pool: &[AssetDescriptor],
    request: &LayoutRequest,
    rng: &mut R,
) -> LayoutResult {
    if pool.is_empty() {
        warn!("asset pool is empty; returning an empty layout");
        return LayoutResult::new();
    }

    if request.unique_only {
        UniqueLayout::new().generate(pool, request, rng)
    } else {
        PrioritizedLayout::new(request.target_count)
            .with_attempts_per_point(request.attempts_per_point)
            .generate(pool, request, rng)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::asset::{build_descriptors, AssetSource};

    fn pool(count: usize) -> Vec<AssetDescriptor> {
        let sources: Vec<AssetSource> = (0..count)
            .map(|i| AssetSource::new(format!("asset-{i}"), 100, 100))
            .collect();
        build_descriptors(&sources, 60.0)
    }

    #[test]
    fn request_builder_sets_fields() {
        let request = LayoutRequest::new(Vec2::new(800.0, 600.0))
            .with_gap(20.0)
            .with_target_count(10)
            .with_unique_only(true)
            .with_attempts_per_point(12);

        assert_eq!(request.canvas_extent, Vec2::new(800.0, 600.0));
        assert_eq!(request.gap, 20.0);
        assert_eq!(request.target_count, 10);
        assert!(request.unique_only);
        assert_eq!(request.attempts_per_point, 12);
    }

    #[test]
    fn validate_rejects_degenerate_requests() {
        assert!(LayoutRequest::new(Vec2::new(0.0, 100.0))
            .with_target_count(1)
            .validate()
            .is_err());
        assert!(LayoutRequest::new(Vec2::new(100.0, 100.0))
            .with_target_count(1)
            .with_gap(-1.0)
            .validate()
            .is_err());
        assert!(LayoutRequest::new(Vec2::new(100.0, 100.0))
            .with_target_count(1)
            .with_gap(f32::NAN)
            .validate()
            .is_err());
        assert!(LayoutRequest::new(Vec2::new(100.0, 100.0))
            .with_target_count(1)
            .with_attempts_per_point(0)
            .validate()
            .is_err());
        // target_count is required outside unique mode, ignored within.
        assert!(LayoutRequest::new(Vec2::new(100.0, 100.0))
            .validate()
            .is_err());
        assert!(LayoutRequest::new(Vec2::new(100.0, 100.0))
            .with_unique_only(true)
            .validate()
            .is_ok());
    }

    #[test]
    fn try_new_propagates_validation() {
        assert!(LayoutRunner::try_new(LayoutRequest::default()).is_err());
        let request = LayoutRequest::new(Vec2::new(640.0, 480.0)).with_target_count(4);
        assert!(LayoutRunner::try_new(request).is_ok());
    }

    #[test]
    fn empty_pool_is_empty_result_in_both_modes() {
        let mut rng = StdRng::seed_from_u64(1);

        let density = LayoutRequest::new(Vec2::new(500.0, 500.0)).with_target_count(10);
        let result = generate_layout(&[], &density, &mut rng);
        assert!(result.placements.is_empty());

        let unique = LayoutRequest::new(Vec2::new(500.0, 500.0)).with_unique_only(true);
        let result = generate_layout(&[], &unique, &mut rng);
        assert!(result.placements.is_empty());
    }

    #[test]
    fn dispatches_to_unique_mode() {
        let pool = pool(4);
        let request = LayoutRequest::new(Vec2::new(1500.0, 1500.0))
            .with_gap(5.0)
            .with_unique_only(true)
            // target_count is ignored in unique mode
            .with_target_count(100);
        let mut rng = StdRng::seed_from_u64(9);

        let result = generate_layout(&pool, &request, &mut rng);
        assert!(result.placements.len() <= 4);
        assert!(result.restarts_used >= 1);

        let ids: HashSet<&str> = result
            .placements
            .iter()
            .map(|p| p.asset_id.as_str())
            .collect();
        assert_eq!(ids.len(), result.placements.len());
    }

    #[test]
    fn dispatches_to_density_mode() {
        let pool = pool(2);
        let request = LayoutRequest::new(Vec2::new(1200.0, 1200.0))
            .with_gap(4.0)
            .with_target_count(12);
        let mut rng = StdRng::seed_from_u64(10);

        let result = generate_layout(&pool, &request, &mut rng);
        assert!(result.placements.len() <= 12);
        assert!(!result.placements.is_empty());
    }

    #[test]
    fn placements_report_ids_matching_the_pool() {
        let pool = pool(3);
        let request = LayoutRequest::new(Vec2::new(900.0, 900.0))
            .with_target_count(9);
        let mut rng = StdRng::seed_from_u64(4);

        let result = generate_layout(&pool, &request, &mut rng);
        for p in &result.placements {
            assert_eq!(pool[p.asset_index].id, p.asset_id);
        }
    }

    #[test]
    fn placed_all_signals_complete_results() {
        let result = LayoutResult::new().with_placements(vec![Placement {
            asset_id: "a".into(),
            asset_index: 0,
            position: Vec2::new(1.0, 2.0),
        }]);
        assert!(result.placed_all(1));
        assert!(!result.placed_all(2));
    }

    #[test]
    fn runner_run_matches_free_function() {
        let pool = pool(2);
        let request = LayoutRequest::new(Vec2::new(700.0, 700.0)).with_target_count(6);

        let runner = LayoutRunner::try_new(request.clone()).expect("valid request");
        let mut rng_a = StdRng::seed_from_u64(55);
        let mut rng_b = StdRng::seed_from_u64(55);

        let ra = runner.run(&pool, &mut rng_a);
        let rb = generate_layout(&pool, &request, &mut rng_b);
        assert_eq!(ra.placements, rb.placements);
    }
}
