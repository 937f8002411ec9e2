//! Uniform acceleration grid over the canvas for neighbor queries.
//!
//! Cell size is derived from the largest minimum-distance requirement of the
//! active pool (`2 * max_radius + gap`), so the neighbor search window is a
//! small constant number of cells regardless of canvas size. Because radii
//! are non-uniform, many small samples can legally share one
//! max-radius-sized cell; each cell therefore buckets every occupant, and
//! insertions never evict earlier samples.
use glam::Vec2;

/// Spatial index bucketing sample indices by cell.
#[derive(Debug, Clone)]
pub(crate) struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
    search_radius_cells: usize,
}

impl SpatialGrid {
    /// Allocates a grid covering `[0, extent.x) x [0, extent.y)`.
    ///
    /// `max_radius` is the maximum effective radius across the active pool.
    /// The search window is derived from the maximum minimum-distance, never
    /// a fixed constant, so collisions with large-radius assets cannot slip
    /// through the query.
    pub fn new(extent: Vec2, max_radius: f32, gap: f32) -> Self {
        debug_assert!(extent.x > 0.0 && extent.y > 0.0);
        debug_assert!(max_radius > 0.0);
        debug_assert!(gap >= 0.0);

        let max_min_distance = 2.0 * max_radius + gap;
        let cell_size = max_min_distance / std::f32::consts::SQRT_2;
        let cols = ((extent.x / cell_size).ceil() as usize).max(1);
        let rows = ((extent.y / cell_size).ceil() as usize).max(1);
        let search_radius_cells = (max_min_distance / cell_size).ceil() as usize + 1;

        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            search_radius_cells,
        }
    }

    #[inline]
    fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let cx = ((point.x / self.cell_size).floor() as isize).clamp(0, self.cols as isize - 1);
        let cy = ((point.y / self.cell_size).floor() as isize).clamp(0, self.rows as isize - 1);
        (cx as usize, cy as usize)
    }

    /// Stores `sample_index` at the cell containing `position`. A cell can
    /// hold many samples when their radii are far below the maximum; every
    /// one of them must stay reachable or close pairs would go undetected.
    pub fn insert(&mut self, position: Vec2, sample_index: usize) {
        let (cx, cy) = self.cell_of(position);
        self.cells[cy * self.cols + cx].push(sample_index);
    }

    /// Visits every sample index stored within the search window around
    /// `position`. Returns true as soon as `conflict` reports a hit.
    pub fn any_neighbor(&self, position: Vec2, mut conflict: impl FnMut(usize) -> bool) -> bool {
        let (cx, cy) = self.cell_of(position);
        let r = self.search_radius_cells;

        let start_x = cx.saturating_sub(r);
        let end_x = (cx + r + 1).min(self.cols);
        let start_y = cy.saturating_sub(r);
        let end_y = (cy + r + 1).min(self.rows);

        for y in start_y..end_y {
            for x in start_x..end_x {
                for &sample_index in &self.cells[y * self.cols + x] {
                    if conflict(sample_index) {
                        return true;
                    }
                }
            }
        }

        false
    }

    #[cfg(test)]
    pub fn search_radius_cells(&self) -> usize {
        self.search_radius_cells
    }

    #[cfg(test)]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }
}
