//! scanstat-io: CSV point-file reading and cluster-output writing.

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{read_classed_points, read_points};
pub use writer::{
    info_path_for, write_bernoulli_info, write_bernoulli_points, write_dbscan_points,
    write_poisson_info, write_poisson_points,
};
