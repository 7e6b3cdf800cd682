//! `dbscan inputEvents output radius minPts minCore nonCorePoints`

use std::process::ExitCode;

use clap::Parser;
use log::info;

use scanstat_algorithms::{dbscan, grid::GridIndex};
use scanstat_cli::CliError;
use scanstat_core::{BoundingBox, DbscanConfig};
use scanstat_io::write_dbscan_points;

/// Density-based spatial clustering with noise.
#[derive(Parser, Debug)]
#[command(name = "dbscan", about = "DBSCAN flood-fill clustering over a single point set")]
struct Args {
    input_events: String,
    output: String,
    radius: f64,
    min_pts: i64,
    min_core: i64,
    /// 0 = exclude border points, nonzero = include them.
    non_core_points: u8,
}

fn run() -> Result<(), CliError> {
    let args = Args::try_parse().map_err(|e| CliError::Usage(e.to_string()))?;

    let mut points = scanstat_io::read_points(&args.input_events)?;
    points.validate()?;
    info!("loaded {} points from {}", points.len(), args.input_events);

    let config = DbscanConfig::new(
        args.radius,
        args.min_pts,
        args.min_core,
        args.non_core_points != 0,
    );
    config.validate()?;

    let bbox = BoundingBox::from_coords([(&points.x[..], &points.y[..])])?;
    let grid = GridIndex::build(&mut points, bbox, config.radius);
    info!(
        "grid: {} x {} cells, {} points",
        grid.n_block_x(),
        grid.n_block_y(),
        grid.point_count()
    );

    let labels = dbscan::run(&points, &grid, &config);
    let n_clusters = labels.iter().filter(|&&l| l >= 1).count();
    info!("{n_clusters} points assigned to a surviving cluster");

    write_dbscan_points(&args.output, &points, &labels)?;
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
