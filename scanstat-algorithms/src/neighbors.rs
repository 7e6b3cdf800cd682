//! Per-point neighbor counting over a `GridIndex`.

use scanstat_core::PointSet;

use crate::grid::GridIndex;

/// Counts, for each point, the number of points (including itself) within
/// `radius` of it, over a single-class point set.
#[must_use]
pub fn count_single(points: &PointSet, grid: &GridIndex, radius: f64) -> Vec<i64> {
    let r2 = radius * radius;
    let n = points.len();
    let mut counts = vec![0i64; n];

    for i in 0..n {
        let (col, row) = grid.cell_of(points.x[i], points.y[i]);
        let mut count = 0i64;
        grid.for_each_window_cell(col, row, |range| {
            for j in range {
                let dx = points.x[j] - points.x[i];
                let dy = points.y[j] - points.y[i];
                if dx * dx + dy * dy <= r2 {
                    count += 1;
                }
            }
        });
        counts[i] = count;
    }

    counts
}

/// Counts, for each point in a combined two-class point set, the number of
/// class-0 and class-1 neighbors (including itself) within `radius`.
///
/// Returns `(count0, count1)` parallel arrays.
pub fn count_two_class(points: &PointSet, grid: &GridIndex, radius: f64) -> (Vec<i64>, Vec<i64>) {
    let class = points
        .class
        .as_ref()
        .expect("count_two_class requires a tagged point set");
    let r2 = radius * radius;
    let n = points.len();
    let mut count0 = vec![0i64; n];
    let mut count1 = vec![0i64; n];

    for i in 0..n {
        let (col, row) = grid.cell_of(points.x[i], points.y[i]);
        let (mut c0, mut c1) = (0i64, 0i64);
        grid.for_each_window_cell(col, row, |range| {
            for j in range {
                let dx = points.x[j] - points.x[i];
                let dy = points.y[j] - points.y[i];
                if dx * dx + dy * dy <= r2 {
                    if class[j] == 0 {
                        c0 += 1;
                    } else {
                        c1 += 1;
                    }
                }
            }
        });
        count0[i] = c0;
        count1[i] = c1;
    }

    (count0, count1)
}

/// Counts, for each point in `query_points`, the number of points in a
/// separately-indexed `background_points` set within `radius`.
///
/// This is the heterogeneous-index variant the Poisson Monte Carlo driver
/// uses: the events class is scanned against a pre-built background index
/// rather than a combined one.
#[must_use]
pub fn count_cross(
    query_points: &PointSet,
    background_points: &PointSet,
    background_grid: &GridIndex,
    radius: f64,
) -> Vec<i64> {
    let r2 = radius * radius;
    let mut counts = vec![0i64; query_points.len()];

    for i in 0..query_points.len() {
        let (col, row) = background_grid.cell_of(query_points.x[i], query_points.y[i]);
        let mut count = 0i64;
        background_grid.for_each_window_cell(col, row, |range| {
            for j in range {
                let dx = background_points.x[j] - query_points.x[i];
                let dy = background_points.y[j] - query_points.y[i];
                if dx * dx + dy * dy <= r2 {
                    count += 1;
                }
            }
        });
        counts[i] = count;
    }

    counts
}
