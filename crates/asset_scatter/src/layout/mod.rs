//! Layout engine: spatial indexing, candidate validation, and placement strategies.
//!
//! The strategies generalize Bridson's fast Poisson disk sampling to
//! non-uniform radii: every asset carries its own collision radius, and the
//! minimum distance between two samples is the sum of their radii plus the
//! requested gap.
use glam::Vec2;
use rand::rand_core::RngCore;

use crate::asset::AssetDescriptor;
use crate::layout::runner::{LayoutRequest, LayoutResult, Placement};

pub mod grid;
pub mod prioritized;
pub mod runner;
pub mod unique;
pub mod validator;

/// Candidate attempts per active point in density-target mode.
pub const DEFAULT_ATTEMPTS_PER_POINT: usize = 30;

/// Trait for placement strategies operating over a descriptor pool.
pub trait LayoutStrategy: Send + Sync {
    fn generate(
        &self,
        pool: &[AssetDescriptor],
        request: &LayoutRequest,
        rng: &mut dyn RngCore,
    ) -> LayoutResult;
}

/// A placed point: canvas position plus the pool index of the asset occupying it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub position: Vec2,
    pub asset: usize,
}

/// Minimum center distance between two assets under the given gap.
#[inline]
pub(crate) fn min_distance(a: &AssetDescriptor, b: &AssetDescriptor, gap: f32) -> f32 {
    a.effective_radius + b.effective_radius + gap
}

/// Maximum effective radius across the pool. Zero for an empty pool.
pub(crate) fn max_effective_radius(pool: &[AssetDescriptor]) -> f32 {
    pool.iter()
        .map(|d| d.effective_radius)
        .fold(0.0f32, f32::max)
}

pub(crate) fn to_placements(samples: &[Sample], pool: &[AssetDescriptor]) -> Vec<Placement> {
    samples
        .iter()
        .map(|s| Placement {
            asset_id: pool[s.asset].id.clone(),
            asset_index: s.asset,
            position: s.position,
        })
        .collect()
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform random index in `[0, len)`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain. Handles edge cases
/// safely including very small positive values and zero.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

/// Uniform random point inside `[0, extent.x) x [0, extent.y)`.
pub(crate) fn random_canvas_point(extent: Vec2, rng: &mut dyn RngCore) -> Vec2 {
    let x = (rand01(rng) * extent.x).clamp(0.0, next_down(extent.x));
    let y = (rand01(rng) * extent.y).clamp(0.0, next_down(extent.y));
    Vec2::new(x, y)
}

/// Random candidate in the annulus `[min_dist, (1 + spread) * min_dist)`
/// around `parent`, at a uniform angle.
pub(crate) fn candidate_around(
    parent: Vec2,
    min_dist: f32,
    spread: f32,
    rng: &mut dyn RngCore,
) -> Vec2 {
    let angle = rand01(rng) * std::f32::consts::TAU;
    let distance = min_dist * (1.0 + rand01(rng) * spread);
    parent + Vec2::new(angle.cos(), angle.sin()) * distance
}
