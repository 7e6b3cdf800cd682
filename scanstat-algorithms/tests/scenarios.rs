//! End-to-end scenario tests mirroring the named test cases for grid
//! indexing, DBSCAN, Bernoulli-ESCIB, and the Monte Carlo `+1` smoothing.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use scanstat_algorithms::grid::GridIndex;
use scanstat_algorithms::{bernoulli, dbscan, montecarlo, poisson};
use scanstat_core::{BernoulliConfig, BoundingBox, DbscanConfig, PointSet, PoissonConfig, NOISE};

fn integer_grid_20() -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for i in 0..4i64 {
        for j in 0..5i64 {
            xs.push(i as f64);
            ys.push(j as f64);
        }
    }
    (xs, ys)
}

#[test]
fn scenario_dbscan_tight_cluster() {
    let (xs, ys) = integer_grid_20();
    let mut points = PointSet::new(xs, ys);
    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
    let grid = GridIndex::build(&mut points, bbox, 1.5);
    let config = DbscanConfig::new(1.5, 4, 3, true);
    let labels = dbscan::run(&points, &grid, &config);

    assert!(labels.iter().all(|&l| l == 1), "expected a single cluster id");
    assert!(!labels.iter().any(|&l| l == NOISE));
}

#[test]
fn scenario_dbscan_isolated_point_rejection() {
    let (mut xs, mut ys) = integer_grid_20();
    xs.push(100.0);
    ys.push(100.0);
    let mut points = PointSet::new(xs, ys);
    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
    let grid = GridIndex::build(&mut points, bbox, 1.5);
    let config = DbscanConfig::new(1.5, 4, 3, true);
    let labels = dbscan::run(&points, &grid, &config);

    let isolated_idx = points.x.iter().position(|&x| x == 100.0).unwrap();
    assert_eq!(labels[isolated_idx], NOISE);
    assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 20);
}

#[test]
fn scenario_bernoulli_significant_hot_spot() {
    // 100 controls on a uniform 10x10 integer grid, 10 tightly clustered
    // cases near (5,5), 5 cases scattered far from the clump.
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
        xs.push(5.0 + (i as f64) * 0.03);
        ys.push(5.0 + (i as f64) * 0.03);
        class.push(1u8);
    }
    for (x, y) in [(0.0, 9.0), (9.0, 0.0), (0.0, 0.0), (9.0, 9.0), (9.0, 0.5)] {
        xs.push(x);
        ys.push(y);
        class.push(1u8);
    }

    let mut points = PointSet::with_class(xs, ys, class);
    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
    let radius = 1.0;
    let grid = GridIndex::build(&mut points, bbox, radius);
    let config = BernoulliConfig::new(radius, 0.05, 1.0, 3, false);
    let (_labels, summaries) = bernoulli::run(&points, &grid, &config);

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].cluster_id, 1);
    assert!(summaries[0].ll > 0.0);
    assert!(summaries[0].count1 >= 10);
}

#[test]
fn scenario_grid_edge_clamping() {
    let xs = vec![0.0, 10.0];
    let ys = vec![0.0, 10.0];
    let mut points = PointSet::new(xs, ys);
    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
    let grid = GridIndex::build(&mut points, bbox, 1.0);

    assert_eq!(grid.point_count(), 2);
    assert_eq!(*grid.offsets().last().unwrap(), 2);

    let edge_idx = points.x.iter().position(|&x| x == 10.0).unwrap();
    let (col, row) = grid.cell_of(points.x[edge_idx], points.y[edge_idx]);
    let mut reachable = false;
    grid.for_each_window_cell(col, row, |range| {
        if range.contains(&edge_idx) {
            reachable = true;
        }
    });
    assert!(reachable);
}

#[test]
fn scenario_monte_carlo_plus_one_smoothing() {
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

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(123);
    let with_p = montecarlo::run_bernoulli(&points, &grid, &config, &observed, 9, &mut rng);

    let p = with_p[0].p_value.unwrap();
    assert!(p > 0.0 && p <= 1.0);
    // A cluster whose LL exceeds every one of the 9 replicas gets exactly 1/10.
    assert!((p - 0.1).abs() < 1e-9 || p > 0.1);
}

#[test]
fn scenario_poisson_no_signal_null() {
    use rand::Rng;

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let mut background_x = Vec::new();
    let mut background_y = Vec::new();
    for _ in 0..1000 {
        background_x.push(rng.gen_range(0.0..20.0));
        background_y.push(rng.gen_range(0.0..20.0));
    }
    let mut events_x = Vec::new();
    let mut events_y = Vec::new();
    for _ in 0..200 {
        events_x.push(rng.gen_range(0.0..20.0));
        events_y.push(rng.gen_range(0.0..20.0));
    }

    let background = PointSet::with_class(background_x, background_y, vec![0u8; 1000]);
    let events = PointSet::with_class(events_x, events_y, vec![1u8; 200]);

    let radius = 0.5;
    let config = PoissonConfig::new(radius, 0.05, 1.0, 5, false);

    let mut background_for_grid = background.clone();
    let background_bbox =
        BoundingBox::from_coords([(&background_for_grid.x[..], &background_for_grid.y[..])])
            .unwrap();
    let background_grid = GridIndex::build(&mut background_for_grid, background_bbox, radius);

    let mut points = PointSet::combine_classes(&background, &events);
    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])]).unwrap();
    let grid = GridIndex::build(&mut points, bbox, radius);

    let (_labels, summaries) = poisson::run(&points, &grid, &config);

    if summaries.is_empty() {
        return;
    }

    let mut mc_rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let with_p = montecarlo::run_poisson(
        &background_for_grid,
        &background_grid,
        &config,
        events.len(),
        &summaries,
        99,
        &mut mc_rng,
    );
    for summary in &with_p {
        let p = summary.p_value.unwrap();
        assert!(p > 0.0 && p <= 1.0);
    }
}
