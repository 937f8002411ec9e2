//! Candidate validation against canvas bounds and already-placed neighbors.
use glam::Vec2;

use crate::asset::AssetDescriptor;
use crate::layout::grid::SpatialGrid;
use crate::layout::{min_distance, Sample};

/// Pure acceptance test for a candidate position and the asset that would
/// occupy it.
///
/// Bounds policy: the raw point must lie in `[0, extent.x) x [0, extent.y)`.
/// An asset's footprint may overhang the canvas edges; this keeps assets
/// larger than the canvas placeable and lets renderers crop at the border.
///
/// Neighbor policy: the candidate is rejected when any sample reachable
/// through the grid sits closer than the sum of both effective radii plus
/// the gap. Distances are compared squared.
pub(crate) fn is_valid_candidate(
    candidate: Vec2,
    asset: &AssetDescriptor,
    pool: &[AssetDescriptor],
    samples: &[Sample],
    grid: &SpatialGrid,
    extent: Vec2,
    gap: f32,
) -> bool {
    if candidate.x < 0.0 || candidate.x >= extent.x || candidate.y < 0.0 || candidate.y >= extent.y
    {
        return false;
    }

    !grid.any_neighbor(candidate, |sample_index| {
        let neighbor = &samples[sample_index];
        let required = min_distance(asset, &pool[neighbor.asset], gap);
        candidate.distance_squared(neighbor.position) < required * required
    })
}
