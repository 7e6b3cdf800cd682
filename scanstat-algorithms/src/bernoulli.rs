//! Bernoulli-ESCIB flood-fill clustering engine.
//!
//! Admits a point as a candidate core when its local case proportion
//! significantly exceeds the baseline Bernoulli probability; surviving
//! clusters report a log-likelihood contrasting in-cluster and out-of-
//! cluster case/control proportions.

use scanstat_core::{
    BernoulliConfig, ClusterLabel, ClusterSummary, PointSet, NOISE, UNVISITED_CORE,
};

use crate::grid::GridIndex;
use crate::neighbors::count_two_class;
use crate::significance::binomial_sf;

/// Runs the Bernoulli-ESCIB engine and returns per-point labels plus the
/// surviving cluster summaries, in discovery order.
#[must_use]
pub fn run(
    points: &PointSet,
    grid: &GridIndex,
    config: &BernoulliConfig,
) -> (Vec<ClusterLabel>, Vec<ClusterSummary>) {
    let class = points.class.as_ref().expect("points must be class-tagged");
    let n = points.len();
    let r2 = config.radius * config.radius;

    let count_cas_total = class.iter().filter(|&&c| c == 1).count() as i64;
    let count_con_total = class.iter().filter(|&&c| c == 0).count() as i64;
    let p = config.baseline_ratio * count_cas_total as f64
        / (count_cas_total + count_con_total) as f64;

    let (con_count, cas_count) = count_two_class(points, grid, config.radius);

    let mut labels: Vec<ClusterLabel> = (0..n)
        .map(|i| {
            if binomial_sf(cas_count[i], con_count[i], p) < config.alpha {
                UNVISITED_CORE
            } else {
                NOISE
            }
        })
        .collect();

    let mut in_cluster = vec![-1i32; n];
    let mut next_id: i32 = 1;
    let mut summaries = Vec::new();

    for seed in 0..n {
        if labels[seed] != UNVISITED_CORE || class[seed] != 1 {
            continue;
        }

        let cid = next_id;
        labels[seed] = cid;
        in_cluster[seed] = cid;
        let mut worklist = vec![seed];
        let mut core_count: i64 = 1;
        let mut n_cas_in_cluster: i64 = 1;
        let mut n_con_in_cluster: i64 = 0;

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
                        if class[j] == 1 {
                            n_cas_in_cluster += 1;
                            core_count += 1;
                            worklist.push(j);
                        } else {
                            n_con_in_cluster += 1;
                        }
                    } else if labels[j] == NOISE && config.non_core_points {
                        labels[j] = cid;
                        in_cluster[j] = cid;
                        if class[j] == 1 {
                            n_cas_in_cluster += 1;
                        } else {
                            n_con_in_cluster += 1;
                        }
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
            let ll = cluster_log_likelihood(
                n_cas_in_cluster,
                n_con_in_cluster,
                count_cas_total,
                count_con_total,
                n as i64,
            );
            summaries.push(ClusterSummary::new(
                cid,
                n_cas_in_cluster,
                n_con_in_cluster,
                0.0,
                ll,
            ));
            next_id += 1;
        }
    }

    (labels, summaries)
}

/// `LL` contrasts in-cluster and out-of-cluster case/control proportions.
/// `nIn = nCas + nCon`, `nOut = totalPoints - nIn`.
#[must_use]
pub fn cluster_log_likelihood(
    n_cas_in_cluster: i64,
    n_con_in_cluster: i64,
    count_cas_total: i64,
    count_con_total: i64,
    total_points: i64,
) -> f64 {
    let n_in = (n_cas_in_cluster + n_con_in_cluster) as f64;
    let n_out = total_points as f64 - n_in;
    let n_cas = n_cas_in_cluster as f64;
    let n_con = n_con_in_cluster as f64;
    let count_cas = count_cas_total as f64;
    let count_con = count_con_total as f64;

    let mut ll = 0.0;
    if n_cas_in_cluster > 0 {
        ll += n_cas * (n_cas / n_in).ln();
    }
    if n_con_in_cluster > 0 {
        ll += n_con * (n_con / n_in).ln();
    }
    if count_cas_total > n_cas_in_cluster {
        let remaining = count_cas - n_cas;
        ll += remaining * (remaining / n_out).ln();
    }
    if count_con_total > n_con_in_cluster {
        let remaining = count_con - n_con;
        ll += remaining * (remaining / n_out).ln();
    }
    ll
}
