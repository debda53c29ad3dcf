//! Move-set landscapes for the barriers engine.
//!
//! A [`Graph`] is parsed once from the graph and move-set strings and then
//! serves as the [`barriers_core::Landscape`] for a whole run.

mod errors;
mod graph;
mod permutation;
mod rna;
mod spin;
mod strings;

pub use errors::GraphError;
pub use graph::Graph;
pub use permutation::{PermutationLandscape, PermutationMoves};
pub use rna::RnaLandscape;
pub use spin::{ExchangeLandscape, SpinLandscape};
pub use strings::StringLandscape;

#[cfg(test)]
mod tests;
