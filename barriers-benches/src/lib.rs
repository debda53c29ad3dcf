//! Benchmark support crate for barriers.
//!
//! Provides a seeded spin-glass listing generator and parameter types used
//! by the Criterion flooding benchmarks.

pub mod error;
pub mod params;
pub mod source;
