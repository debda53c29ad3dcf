pub(crate) use super::{
    ExchangeLandscape, Graph, GraphError, PermutationLandscape, PermutationMoves, RnaLandscape,
    SpinLandscape, StringLandscape,
};

mod permutation;
mod strings;
