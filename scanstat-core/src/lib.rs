//! scanstat-core: domain types shared across the spatial scan-statistic
//! clustering workspace.
//!
//! Holds points, bounding boxes, cluster labels/summaries, and the
//! per-engine configuration structs. Carries no algorithmic behavior —
//! see `scanstat-algorithms` for the grid index, significance tests,
//! clustering engines, and Monte Carlo driver.

mod cluster;
mod config;
mod error;
mod geometry;
mod points;

pub use cluster::{ClusterLabel, ClusterSummary, NOISE, UNVISITED_CORE};
pub use config::{BernoulliConfig, DbscanConfig, McConfig, PoissonConfig};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Point};
pub use points::PointSet;
