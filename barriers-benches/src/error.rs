//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use crate::source::SpinGlassError;
use barriers_core::BarrierError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Listing generation failed.
    #[error("spin-glass generation failed: {0}")]
    SpinGlass(#[from] SpinGlassError),
    /// Builder validation or flooding failed.
    #[error("flooding failed: {0}")]
    Barriers(#[from] BarrierError),
}
