//! Benchmark parameter types.

use std::fmt;

/// Parameters for one flooding benchmark run.
#[derive(Clone, Debug)]
pub struct FloodBenchParams {
    /// Number of spins; the listing holds `2^spins` records.
    pub spins: usize,
    /// Whether pools and partition functions are accumulated.
    pub pool_accounting: bool,
}

impl fmt::Display for FloodBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},pools={}", self.spins, self.pool_accounting)
    }
}
