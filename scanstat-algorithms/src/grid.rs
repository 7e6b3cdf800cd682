//! Uniform-grid spatial index.
//!
//! Reorders a point set into cell-major order via counting sort and exposes
//! the resulting cell offset table, so every downstream consumer (neighbor
//! counting, the three clustering engines) can scan a bounded 3x3 cell
//! window instead of the full point array.

use scanstat_core::{BoundingBox, PointSet};

/// A cell-major reordering of a point set plus its offset table.
///
/// The cell side is exactly the search radius `r`: this is necessary and
/// sufficient for any two points within Euclidean distance `r` of each
/// other to fall in cells whose column and row differ by at most one.
#[derive(Debug, Clone)]
pub struct GridIndex {
    bbox: BoundingBox,
    cell_size: f64,
    n_block_x: usize,
    n_block_y: usize,
    offsets: Vec<usize>,
}

impl GridIndex {
    /// Builds the index and reorders `points` in place into cell-major order.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive; callers validate radius via
    /// the engine configs before reaching this point.
    #[must_use]
    pub fn build(points: &mut PointSet, bbox: BoundingBox, cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell size must be positive");

        let n_block_x = ((bbox.width() / cell_size).ceil() as usize).max(1);
        let n_block_y = ((bbox.height() / cell_size).ceil() as usize).max(1);
        let n_cells = n_block_x * n_block_y;
        let n = points.len();

        let cell_of = |x: f64, y: f64| -> usize {
            let mut col = ((x - bbox.x_min) / cell_size) as usize;
            let mut row = ((y - bbox.y_min) / cell_size) as usize;
            if col >= n_block_x {
                col = n_block_x - 1;
            }
            if row >= n_block_y {
                row = n_block_y - 1;
            }
            row * n_block_x + col
        };

        let cell_ids: Vec<usize> = points
            .x
            .iter()
            .zip(points.y.iter())
            .map(|(&x, &y)| cell_of(x, y))
            .collect();

        let mut counts = vec![0usize; n_cells];
        for &c in &cell_ids {
            counts[c] += 1;
        }

        let mut offsets = vec![0usize; n_cells + 1];
        for c in 0..n_cells {
            offsets[c + 1] = offsets[c] + counts[c];
        }

        let mut cursor = offsets.clone();
        let mut order = vec![0usize; n];
        for (i, &c) in cell_ids.iter().enumerate() {
            order[cursor[c]] = i;
            cursor[c] += 1;
        }

        points.reorder(&order);

        Self {
            bbox,
            cell_size,
            n_block_x,
            n_block_y,
            offsets,
        }
    }

    #[must_use]
    pub fn n_block_x(&self) -> usize {
        self.n_block_x
    }

    #[must_use]
    pub fn n_block_y(&self) -> usize {
        self.n_block_y
    }

    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        *self.offsets.last().unwrap_or(&0)
    }

    /// Cell coordinates of a point, clamped to grid bounds so a point
    /// exactly at `x_max`/`y_max` maps into the last column/row.
    #[must_use]
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let mut col = ((x - self.bbox.x_min) / self.cell_size) as usize;
        let mut row = ((y - self.bbox.y_min) / self.cell_size) as usize;
        if col >= self.n_block_x {
            col = self.n_block_x - 1;
        }
        if row >= self.n_block_y {
            row = self.n_block_y - 1;
        }
        (col, row)
    }

    /// Point indices (into the reordered arrays) belonging to one cell.
    #[must_use]
    pub fn cell_points(&self, col: usize, row: usize) -> std::ops::Range<usize> {
        let c = row * self.n_block_x + col;
        self.offsets[c]..self.offsets[c + 1]
    }

    /// Invokes `visit` with the point-index range of every cell in the
    /// clamped 3x3 window around `(col, row)`.
    pub fn for_each_window_cell<F: FnMut(std::ops::Range<usize>)>(
        &self,
        col: usize,
        row: usize,
        mut visit: F,
    ) {
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.n_block_x - 1);
        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.n_block_y - 1);
        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                visit(self.cell_points(c, r));
            }
        }
    }
}
