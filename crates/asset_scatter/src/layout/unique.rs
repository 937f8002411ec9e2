//! Exhaustive placement strategy: every asset exactly once, best effort.
//!
//! Unique placement is a much harder combinatorial target than density fill:
//! order matters and there is no duplicate fallback. The strategy therefore
//! runs up to [`MAX_RESTARTS`] independent attempts from different seed
//! points, spends a far higher candidate budget per active point, and
//! re-energizes the frontier with fresh random seeds when it is about to die
//! out. The first attempt that places the full pool wins immediately;
//! otherwise the best partial attempt is returned.
use std::collections::VecDeque;

use glam::Vec2;
use rand::rand_core::RngCore;
use tracing::{debug, info};

use crate::asset::AssetDescriptor;
use crate::layout::grid::SpatialGrid;
use crate::layout::runner::{LayoutRequest, LayoutResult};
use crate::layout::validator::is_valid_candidate;
use crate::layout::{
    candidate_around, max_effective_radius, min_distance, next_down, rand_index,
    random_canvas_point, to_placements, LayoutStrategy, Sample,
};

/// Independent attempts before settling for the best partial result.
pub const MAX_RESTARTS: usize = 5;

/// Frontier size below which fresh random seeds are injected.
pub const RESEED_THRESHOLD: usize = 3;

/// Random seed injections per reseed pass.
pub const RESEED_BUDGET: usize = 20;

/// Hard cap on candidate attempts per active point.
const PARENT_BUDGET_CAP: usize = 200;

/// Candidate attempts granted per remaining asset.
const PARENT_BUDGET_PER_ASSET: usize = 50;

/// Multi-attempt sampler placing each pool asset at most once.
#[derive(Debug, Clone)]
pub struct UniqueLayout {
    /// Independent restart attempts (seed-point heuristics cycle per index).
    pub max_restarts: usize,
    /// Frontier size that triggers reseeding while assets remain.
    pub reseed_threshold: usize,
    /// Random positions tried per reseed pass.
    pub reseed_budget: usize,
}

impl Default for UniqueLayout {
    fn default() -> Self {
        Self {
            max_restarts: MAX_RESTARTS,
            reseed_threshold: RESEED_THRESHOLD,
            reseed_budget: RESEED_BUDGET,
        }
    }
}

impl UniqueLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed position for a restart. Successive restarts start from different
    /// regions of the canvas to escape packing failures near one seed:
    /// center, random, quarter offset, near edge, then a 60 degree stepped
    /// spiral around the center.
    fn seed_point(extent: Vec2, restart: usize, rng: &mut dyn RngCore) -> Vec2 {
        let center = extent * 0.5;
        let point = match restart {
            0 => center,
            1 => random_canvas_point(extent, rng),
            2 => extent * 0.25,
            3 => Vec2::new(extent.x * 0.9, extent.y * 0.5),
            _ => {
                let angle = (restart as f32) * 60f32.to_radians();
                let radius = extent.min_element() * 0.25;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            }
        };

        Vec2::new(
            point.x.clamp(0.0, next_down(extent.x)),
            point.y.clamp(0.0, next_down(extent.y)),
        )
    }

    /// Runs one attempt to completion, returning its samples.
    fn run_attempt(
        &self,
        pool: &[AssetDescriptor],
        request: &LayoutRequest,
        restart: usize,
        rng: &mut dyn RngCore,
        result: &mut LayoutResult,
    ) -> Vec<Sample> {
        let extent = request.canvas_extent;
        let gap = request.gap;
        // Widen the candidate annulus on later restarts.
        let spread = 0.5 + 0.25 * restart as f32;

        let mut grid = SpatialGrid::new(extent, max_effective_radius(pool), gap);
        let mut samples: Vec<Sample> = Vec::new();
        let mut active: Vec<usize> = Vec::new();
        let mut queue: VecDeque<usize> = (0..pool.len()).collect();

        let seed = Self::seed_point(extent, restart, rng);
        if let Some(first) = queue.pop_front() {
            grid.insert(seed, 0);
            samples.push(Sample {
                position: seed,
                asset: first,
            });
            active.push(0);
        }

        while let Some(&head) = queue.front() {
            if active.is_empty() {
                break;
            }

            let pick = rand_index(rng, active.len());
            let parent = samples[active[pick]];
            let budget = (queue.len() * PARENT_BUDGET_PER_ASSET).min(PARENT_BUDGET_CAP);
            let mut placed = false;

            for _ in 0..budget {
                let dist = min_distance(&pool[parent.asset], &pool[head], gap);
                let candidate = candidate_around(parent.position, dist, spread, rng);

                result.candidates_evaluated += 1;
                if is_valid_candidate(candidate, &pool[head], pool, &samples, &grid, extent, gap)
                {
                    let index = samples.len();
                    grid.insert(candidate, index);
                    samples.push(Sample {
                        position: candidate,
                        asset: head,
                    });
                    active.push(index);
                    queue.pop_front();
                    placed = true;
                    break;
                }
                result.candidates_rejected += 1;
            }

            if !placed {
                active.swap_remove(pick);
                if active.len() < self.reseed_threshold && !queue.is_empty() {
                    self.reseed_frontier(
                        pool, extent, gap, &mut grid, &mut samples, &mut active, &mut queue, rng,
                        result,
                    );
                }
            }
        }

        samples
    }

    /// Injects up to `reseed_budget` random seed positions for the queue
    /// head(s), re-energizing a dying frontier.
    #[allow(clippy::too_many_arguments)]
    fn reseed_frontier(
        &self,
        pool: &[AssetDescriptor],
        extent: Vec2,
        gap: f32,
        grid: &mut SpatialGrid,
        samples: &mut Vec<Sample>,
        active: &mut Vec<usize>,
        queue: &mut VecDeque<usize>,
        rng: &mut dyn RngCore,
        result: &mut LayoutResult,
    ) {
        let before = active.len();
        for _ in 0..self.reseed_budget {
            let Some(&head) = queue.front() else {
                break;
            };

            let candidate = random_canvas_point(extent, rng);
            result.candidates_evaluated += 1;
            if is_valid_candidate(candidate, &pool[head], pool, samples, grid, extent, gap) {
                let index = samples.len();
                grid.insert(candidate, index);
                samples.push(Sample {
                    position: candidate,
                    asset: head,
                });
                active.push(index);
                queue.pop_front();
            } else {
                result.candidates_rejected += 1;
            }
        }

        debug!(
            revived = active.len() - before,
            remaining = queue.len(),
            "reseeded frontier"
        );
    }
}

impl LayoutStrategy for UniqueLayout {
    fn generate(
        &self,
        pool: &[AssetDescriptor],
        request: &LayoutRequest,
        rng: &mut dyn RngCore,
    ) -> LayoutResult {
        let mut result = LayoutResult::new();
        if pool.is_empty() {
            return result;
        }

        let restarts = self.max_restarts.max(1);
        let mut best: Vec<Sample> = Vec::new();

        for restart in 0..restarts {
            let samples = self.run_attempt(pool, request, restart, rng, &mut result);
            result.restarts_used = restart + 1;

            if samples.len() == pool.len() {
                debug!(restart, placed = samples.len(), "placed full pool");
                result.placements = to_placements(&samples, pool);
                return result;
            }

            if samples.len() > best.len() {
                best = samples;
            }
        }

        info!(
            placed = best.len(),
            pool = pool.len(),
            restarts,
            "unique layout settled for best partial attempt"
        );
        result.placements = to_placements(&best, pool);
        result
    }
}
