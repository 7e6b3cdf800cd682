//! Per-engine configuration structs.

use crate::error::{Error, Result};

/// Parameters for the DBSCAN engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanConfig {
    pub radius: f64,
    pub min_pts: i64,
    pub min_core: i64,
    pub non_core_points: bool,
}

impl DbscanConfig {
    #[must_use]
    pub fn new(radius: f64, min_pts: i64, min_core: i64, non_core_points: bool) -> Self {
        Self {
            radius,
            min_pts,
            min_core,
            non_core_points,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius <= 0.0 {
            return Err(Error::InvalidRadius(self.radius));
        }
        if self.min_pts < 1 {
            return Err(Error::Config("minPts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Parameters for the Bernoulli-ESCIB engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliConfig {
    pub radius: f64,
    pub alpha: f64,
    pub baseline_ratio: f64,
    pub min_core: i64,
    pub non_core_points: bool,
}

impl BernoulliConfig {
    #[must_use]
    pub fn new(
        radius: f64,
        alpha: f64,
        baseline_ratio: f64,
        min_core: i64,
        non_core_points: bool,
    ) -> Self {
        Self {
            radius,
            alpha,
            baseline_ratio,
            min_core,
            non_core_points,
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius <= 0.0 {
            return Err(Error::InvalidRadius(self.radius));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::Config("alpha must lie in [0, 1]".into()));
        }
        Ok(())
    }
}

/// Parameters for the Poisson-ESCIB engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonConfig {
    pub radius: f64,
    pub alpha: f64,
    pub baseline_ratio: f64,
    pub min_core: i64,
    pub non_core_points: bool,
}

impl PoissonConfig {
    #[must_use]
    pub fn new(
        radius: f64,
        alpha: f64,
        baseline_ratio: f64,
        min_core: i64,
        non_core_points: bool,
    ) -> Self {
        Self {
            radius,
            alpha,
            baseline_ratio,
            min_core,
            non_core_points,
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.radius <= 0.0 {
            return Err(Error::InvalidRadius(self.radius));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::Config("alpha must lie in [0, 1]".into()));
        }
        Ok(())
    }
}

/// Monte Carlo replica count; `n_sim == 0` disables Monte Carlo entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McConfig {
    pub n_sim: u32,
}

impl McConfig {
    #[must_use]
    pub fn new(n_sim: u32) -> Self {
        Self { n_sim }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.n_sim > 0
    }
}
