//! `escib_bernoulli inputCase inputControl output radius alpha baselineRatio minCore nonCorePoints`

use std::process::ExitCode;

use clap::Parser;
use log::info;

use scanstat_algorithms::{bernoulli, grid::GridIndex};
use scanstat_cli::CliError;
use scanstat_core::{BernoulliConfig, BoundingBox, PointSet};
use scanstat_io::{info_path_for, write_bernoulli_info, write_bernoulli_points};

/// Bernoulli-ESCIB flood-fill clustering over a case/control point set.
#[derive(Parser, Debug)]
#[command(
    name = "escib_bernoulli",
    about = "Bernoulli scan-statistic clustering over case/control points"
)]
struct Args {
    input_case: String,
    input_control: String,
    output: String,
    radius: f64,
    alpha: f64,
    baseline_ratio: f64,
    min_core: i64,
    /// 0 = exclude border points, nonzero = include them.
    non_core_points: u8,
}

fn run() -> Result<(), CliError> {
    let args = Args::try_parse().map_err(|e| CliError::Usage(e.to_string()))?;

    let cases = scanstat_io::read_classed_points(&args.input_case, 1)?;
    let controls = scanstat_io::read_classed_points(&args.input_control, 0)?;
    info!(
        "loaded {} cases from {}, {} controls from {}",
        cases.len(),
        args.input_case,
        controls.len(),
        args.input_control
    );

    let mut points = PointSet::combine_classes(&controls, &cases);
    points.validate()?;

    let config = BernoulliConfig::new(
        args.radius,
        args.alpha,
        args.baseline_ratio,
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

    let (labels, summaries) = bernoulli::run(&points, &grid, &config);
    info!("{} surviving clusters", summaries.len());

    write_bernoulli_points(&args.output, &points, &labels)?;
    write_bernoulli_info(info_path_for(std::path::Path::new(&args.output)), &summaries)?;
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
