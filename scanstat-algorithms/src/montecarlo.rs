//! Monte Carlo permutation driver.
//!
//! Assigns a p-value to each detected cluster by comparing its observed
//! log-likelihood against the distribution of the maximum cluster
//! log-likelihood over `nSim` null-resampled replicas.

use rand::seq::index::sample;
use rand::Rng;

use scanstat_core::{BernoulliConfig, ClusterSummary, PointSet, PoissonConfig};

use crate::bernoulli;
use crate::grid::GridIndex;
use crate::neighbors::count_single;
use crate::poisson;

/// Draws a class tag array of length `n` with exactly `n_ones` positions set
/// to `1`, the rest `0`, chosen uniformly without replacement. This is the
/// resampler both null schemes use: Bernoulli relabels the combined
/// case/control set in place; Poisson relabels the background point set in
/// place to mark simulated events.
fn resample_classes<R: Rng>(n: usize, n_ones: usize, rng: &mut R) -> Vec<u8> {
    let mut class = vec![0u8; n];
    for idx in sample(rng, n, n_ones).iter() {
        class[idx] = 1;
    }
    class
}

/// Runs `n_sim` Bernoulli-null replicas and returns `observed` with each
/// summary's `p_value` populated.
///
/// `points`/`grid` are the already-indexed combined case/control set from
/// the original run; only class tags are reshuffled per replica, so the
/// grid and positions are reused unchanged.
pub fn run_bernoulli<R: Rng>(
    points: &PointSet,
    grid: &GridIndex,
    config: &BernoulliConfig,
    observed: &[ClusterSummary],
    n_sim: u32,
    rng: &mut R,
) -> Vec<ClusterSummary> {
    let n = points.len();
    let n_cas = points
        .class
        .as_ref()
        .expect("bernoulli points must be class-tagged")
        .iter()
        .filter(|&&c| c == 1)
        .count();

    let mut above = vec![0u32; observed.len()];

    for _ in 0..n_sim {
        let class = resample_classes(n, n_cas, rng);
        let mut replica = points.clone();
        replica.class = Some(class);

        let (_labels, summaries) = bernoulli::run(&replica, grid, config);
        let sim_max_ll = summaries.iter().map(|s| s.ll).fold(None, |acc, ll| {
            Some(acc.map_or(ll, |m: f64| m.max(ll)))
        });

        if let Some(sim_max_ll) = sim_max_ll {
            for (k, cluster) in observed.iter().enumerate() {
                if cluster.ll <= sim_max_ll {
                    above[k] += 1;
                }
            }
        }
    }

    observed
        .iter()
        .zip(above)
        .map(|(cluster, llabove)| {
            let mut out = cluster.clone();
            out.p_value = Some(f64::from(1 + llabove) / f64::from(1 + n_sim));
            out
        })
        .collect()
}

/// Runs `n_sim` Poisson-null replicas and returns `observed` with each
/// summary's `p_value` populated.
///
/// `background` / `background_grid` is the pre-built background-only index;
/// each replica marks `count_e` of the background positions as simulated
/// events and reuses the Poisson engine's own core predicate and
/// log-likelihood formula, per the defined null (events are uniform draws
/// from the background support, not a true conditional inhomogeneous
/// Poisson process).
///
/// The background intensity denominator (`background_count`/`count_b_total`)
/// is computed once from the unperturbed background set before the replica
/// loop: it is a fixed property of the run, not something that fluctuates
/// with each replica's random relabeling. Only the event-neighbor count is
/// recomputed per replica.
#[allow(clippy::too_many_arguments)]
pub fn run_poisson<R: Rng>(
    background: &PointSet,
    background_grid: &GridIndex,
    config: &PoissonConfig,
    count_e: usize,
    observed: &[ClusterSummary],
    n_sim: u32,
    rng: &mut R,
) -> Vec<ClusterSummary> {
    let n = background.len();
    let background_count = count_single(background, background_grid, config.radius);
    let count_b_total = n as i64;
    let mut above = vec![0u32; observed.len()];

    for _ in 0..n_sim {
        let class = resample_classes(n, count_e, rng);
        let mut replica = background.clone();
        replica.class = Some(class);

        let (_labels, summaries) = poisson::run_replica(
            &replica,
            background_grid,
            config,
            &background_count,
            count_b_total,
        );
        let sim_max_ll = summaries.iter().map(|s| s.ll).fold(None, |acc, ll| {
            Some(acc.map_or(ll, |m: f64| m.max(ll)))
        });

        if let Some(sim_max_ll) = sim_max_ll {
            for (k, cluster) in observed.iter().enumerate() {
                if cluster.ll <= sim_max_ll {
                    above[k] += 1;
                }
            }
        }
    }

    observed
        .iter()
        .zip(above)
        .map(|(cluster, llabove)| {
            let mut out = cluster.clone();
            out.p_value = Some(f64::from(1 + llabove) / f64::from(1 + n_sim));
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use scanstat_core::BoundingBox;

    #[test]
    fn resample_classes_preserves_ones_count() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let class = resample_classes(50, 7, &mut rng);
        assert_eq!(class.iter().filter(|&&c| c == 1).count(), 7);
        assert_eq!(class.len(), 50);
    }

    #[test]
    fn plus_one_smoothing_gives_minimum_pvalue() {
        // nSim = 9, a cluster whose LL exceeds every replica's max gets 1/10.
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut class = Vec::new();
        for i in 0..10i64 {
            for j in 0..10i64 {
                xs.push(i as f64);
                ys.push(j as f64);
                class.push(0u8);
            }
        }
        for i in 0..10 {
            xs.push(5.0 + (i as f64) * 0.02);
            ys.push(5.0 + (i as f64) * 0.02);
            class.push(1u8);
        }
        let mut points = PointSet::with_class(xs, ys, class);
        let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
        let radius = 1.0;
        let grid = GridIndex::build(&mut points, bbox, radius);
        let config = BernoulliConfig::new(radius, 0.05, 1.0, 3, false);
        let (_labels, observed) = bernoulli::run(&points, &grid, &config);
        assert_eq!(observed.len(), 1);

        let with_p = run_bernoulli(&points, &grid, &config, &observed, 9, &mut rng);
        assert_eq!(with_p.len(), 1);
        let p = with_p[0].p_value.unwrap();
        assert!(p >= 0.1, "p-value {p} below the 1/(1+nSim) floor");
        assert!(p <= 1.0);
    }
}
