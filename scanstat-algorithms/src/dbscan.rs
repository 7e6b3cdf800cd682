//! DBSCAN flood-fill clustering over a uniform-grid spatial index.

use scanstat_core::{ClusterLabel, DbscanConfig, PointSet, NOISE, UNVISITED_CORE};

use crate::grid::GridIndex;
use crate::neighbors::count_single;

/// Runs DBSCAN over `points` (already reordered by `grid`) and returns one
/// label per point.
///
/// Core predicate: `neighborCount(i) >= minPts` (self-inclusive). A
/// discovered cluster survives only if its core-point count strictly
/// exceeds `min_core`; otherwise its points are reset to noise and the
/// cluster id is reused.
#[must_use]
pub fn run(points: &PointSet, grid: &GridIndex, config: &DbscanConfig) -> Vec<ClusterLabel> {
    let n = points.len();
    let counts = count_single(points, grid, config.radius);
    let r2 = config.radius * config.radius;

    let mut labels: Vec<ClusterLabel> = counts
        .iter()
        .map(|&c| {
            if c >= config.min_pts {
                UNVISITED_CORE
            } else {
                NOISE
            }
        })
        .collect();

    let mut in_cluster = vec![-1i32; n];
    let mut next_id: i32 = 1;

    for seed in 0..n {
        if labels[seed] != UNVISITED_CORE {
            continue;
        }

        let cid = next_id;
        labels[seed] = cid;
        in_cluster[seed] = cid;
        let mut worklist = vec![seed];
        let mut core_count: i64 = 1;

        while let Some(q) = worklist.pop() {
            let (col, row) = grid.cell_of(points.x[q], points.y[q]);
            grid.for_each_window_cell(col, row, |range| {
                for j in range {
                    if in_cluster[j] == cid {
                        continue;
                    }
                    let dx = points.x[j] - points.x[q];
                    let dy = points.y[j] - points.y[q];
                    if dx * dx + dy * dy > r2 {
                        continue;
                    }

                    if labels[j] == UNVISITED_CORE {
                        labels[j] = cid;
                        in_cluster[j] = cid;
                        core_count += 1;
                        worklist.push(j);
                    } else if labels[j] == NOISE && config.non_core_points {
                        labels[j] = cid;
                        in_cluster[j] = cid;
                    }
                }
            });
        }

        if core_count <= config.min_core {
            for label in &mut labels {
                if *label == cid {
                    *label = NOISE;
                }
            }
            for marker in &mut in_cluster {
                if *marker == cid {
                    *marker = -1;
                }
            }
        } else {
            next_id += 1;
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanstat_core::BoundingBox;

    fn build(xs: &[f64], ys: &[f64], radius: f64) -> (PointSet, GridIndex) {
        let mut points = PointSet::new(xs.to_vec(), ys.to_vec());
        let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
        let grid = GridIndex::build(&mut points, bbox, radius);
        (points, grid)
    }

    #[test]
    fn tight_grid_forms_one_cluster() {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..4i64 {
            for j in 0..5i64 {
                xs.push(i as f64);
                ys.push(j as f64);
            }
        }
        let (points, grid) = build(&xs, &ys, 1.5);
        let config = DbscanConfig::new(1.5, 4, 3, true);
        let labels = run(&points, &grid, &config);
        assert!(labels.iter().all(|&l| l == 1));
    }

    #[test]
    fn isolated_point_is_noise() {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..4i64 {
            for j in 0..5i64 {
                xs.push(i as f64);
                ys.push(j as f64);
            }
        }
        xs.push(100.0);
        ys.push(100.0);
        let (points, grid) = build(&xs, &ys, 1.5);
        let config = DbscanConfig::new(1.5, 4, 3, true);
        let labels = run(&points, &grid, &config);

        let isolated_idx = points
            .x
            .iter()
            .position(|&x| x == 100.0)
            .expect("isolated point present");
        assert_eq!(labels[isolated_idx], NOISE);
        assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 20);
    }

    #[test]
    fn sparse_points_never_form_a_cluster() {
        let xs = [0.0, 50.0, 100.0];
        let ys = [0.0, 50.0, 100.0];
        let (points, grid) = build(&xs, &ys, 1.0);
        let config = DbscanConfig::new(1.0, 4, 3, false);
        let labels = run(&points, &grid, &config);
        assert!(labels.iter().all(|&l| l == NOISE));
    }
}
