//! Shared error type and random-seed handling for the scanstat binaries.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

/// Aggregate error type returned by `main` in each binary; its `Display`
/// impl is the one-line message printed to stderr before exiting 1.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] scanstat_io::Error),

    #[error(transparent)]
    Core(#[from] scanstat_core::Error),
}

/// Builds the Monte Carlo RNG. Reads `SCANSTAT_SEED` as a `u64` for
/// reproducible replicas (the original tool seeds from OS entropy on every
/// run and has no command-line seed argument); falls back to OS entropy
/// when the variable is unset or unparseable.
#[must_use]
pub fn build_rng() -> Xoshiro256PlusPlus {
    match std::env::var("SCANSTAT_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}
