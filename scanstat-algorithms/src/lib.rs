//! scanstat-algorithms: grid indexing, neighbor counting, significance
//! tests, the three clustering engines, and the Monte Carlo driver.

pub mod bernoulli;
pub mod dbscan;
pub mod grid;
pub mod montecarlo;
pub mod neighbors;
pub mod poisson;
pub mod significance;

pub use grid::GridIndex;
