use thiserror::Error;

/// Errors raised while selecting a landscape.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The graph string names no known landscape.
    #[error("graph `{graph}` is not implemented")]
    UnsupportedGraph {
        /// The rejected graph string.
        graph: String,
    },
    /// A `Q<n>` graph declared an alphabet that does not fit.
    #[error("graph `{graph}` has an invalid alphabet: {reason}")]
    InvalidAlphabet {
        /// The rejected graph string.
        graph: String,
        /// Why the alphabet was rejected.
        reason: &'static str,
    },
    /// The RNA sequence contains a symbol that is not a nucleotide.
    #[error("sequence symbol `{symbol}` at position {position} is not a nucleotide")]
    InvalidSequence {
        /// Zero-based position of the symbol.
        position: usize,
        /// The rejected symbol.
        symbol: char,
    },
}
