//! `escib_poisson inputBackground inputEvents output radius alpha baselineRatio minCore nonCorePoints nSim`

use std::process::ExitCode;

use clap::Parser;
use log::info;

use scanstat_algorithms::{grid::GridIndex, montecarlo, poisson};
use scanstat_cli::CliError;
use scanstat_core::{BoundingBox, PointSet, PoissonConfig};
use scanstat_io::{info_path_for, write_poisson_info, write_poisson_points};

/// Poisson-ESCIB flood-fill clustering over background/event points, with
/// optional Monte Carlo p-value assignment.
#[derive(Parser, Debug)]
#[command(
    name = "escib_poisson",
    about = "Poisson scan-statistic clustering over background/event points"
)]
struct Args {
    input_background: String,
    input_events: String,
    output: String,
    radius: f64,
    alpha: f64,
    baseline_ratio: f64,
    min_core: i64,
    /// 0 = exclude border points, nonzero = include them.
    non_core_points: u8,
    /// Monte Carlo replica count; 0 disables Monte Carlo.
    n_sim: u32,
}

fn run() -> Result<(), CliError> {
    let args = Args::try_parse().map_err(|e| CliError::Usage(e.to_string()))?;

    let background = scanstat_io::read_classed_points(&args.input_background, 0)?;
    let events = scanstat_io::read_classed_points(&args.input_events, 1)?;
    info!(
        "loaded {} background points from {}, {} events from {}",
        background.len(),
        args.input_background,
        events.len(),
        args.input_events
    );

    let config = PoissonConfig::new(
        args.radius,
        args.alpha,
        args.baseline_ratio,
        args.min_core,
        args.non_core_points != 0,
    );
    config.validate()?;

    let mut background_for_grid = background.clone();
    let background_bbox =
        BoundingBox::from_coords([(&background_for_grid.x[..], &background_for_grid.y[..])])?;
    let background_grid =
        GridIndex::build(&mut background_for_grid, background_bbox, config.radius);

    let mut points = PointSet::combine_classes(&background, &events);
    points.validate()?;

    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])])?;
    let grid = GridIndex::build(&mut points, bbox, config.radius);
    info!(
        "grid: {} x {} cells, {} points",
        grid.n_block_x(),
        grid.n_block_y(),
        grid.point_count()
    );

    let (labels, summaries) = poisson::run(&points, &grid, &config);
    info!("{} surviving clusters", summaries.len());

    let summaries = if args.n_sim > 0 {
        let mut rng = scanstat_cli::build_rng();
        info!("running {} Monte Carlo replicas", args.n_sim);
        montecarlo::run_poisson(
            &background_for_grid,
            &background_grid,
            &config,
            events.len(),
            &summaries,
            args.n_sim,
            &mut rng,
        )
    } else {
        summaries
    };

    write_poisson_points(&args.output, &points, &labels)?;
    write_poisson_info(info_path_for(std::path::Path::new(&args.output)), &summaries)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
