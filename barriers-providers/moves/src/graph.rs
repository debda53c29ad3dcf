//! Landscape selection from the graph and move-set strings.

use std::fmt;

use barriers_core::{Landscape, LandscapeError, StructureKey};

use crate::{
    errors::GraphError,
    permutation::{PermutationLandscape, PermutationMoves},
    rna::RnaLandscape,
    spin::{ExchangeLandscape, SpinLandscape},
    strings::StringLandscape,
};

/// A landscape chosen once per run.
///
/// Phylogenetic trees (`T`) have no variant: their nearest-neighbour
/// interchange moves are not provided here, so [`Graph::parse`] rejects them
/// as unsupported. Callers flooding tree listings implement [`Landscape`]
/// themselves and pass it to the engine directly.
///
/// # Examples
/// ```
/// use barriers_core::Landscape;
/// use barriers_providers_moves::Graph;
///
/// let graph = Graph::parse("RNA-noLP", "noShift", "GGGAAACCC")?;
/// assert!(graph.is_rna());
/// assert_eq!(graph.name(), "RNA-noLP");
/// assert_eq!(graph.to_string(), "RNA with noLP=1, shift=0");
/// # Ok::<(), barriers_providers_moves::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Graph {
    /// RNA secondary structures over the reference sequence.
    Rna(RnaLandscape),
    /// `Q2` spins.
    Spin(SpinLandscape),
    /// `Q<n>` strings.
    Strings(StringLandscape),
    /// `P` permutations.
    Permutation(PermutationLandscape),
    /// `X` balanced spins with exchange moves.
    Exchange(ExchangeLandscape),
}

impl Graph {
    /// Selects the landscape named by `graph`.
    ///
    /// `reference` is the header configuration: the sequence for RNA graphs,
    /// otherwise any configuration of the right length.
    ///
    /// # Errors
    /// Returns [`GraphError::UnsupportedGraph`] for unknown graphs (including
    /// `T`), [`GraphError::InvalidAlphabet`] for a malformed `Q<n>` alphabet
    /// and [`GraphError::InvalidSequence`] for a non-nucleotide sequence.
    pub fn parse(graph: &str, moveset: &str, reference: &str) -> Result<Self, GraphError> {
        let length = reference.chars().count();
        let unsupported = || GraphError::UnsupportedGraph {
            graph: graph.to_owned(),
        };
        match graph.chars().next() {
            Some('R') if graph.starts_with("RNA") => RnaLandscape::new(
                reference,
                graph.contains("noLP"),
                !moveset.contains("noShift"),
            )
            .map(Self::Rna),
            Some('Q') if graph == "Q2" => Ok(Self::Spin(SpinLandscape::new(length, moveset == "c"))),
            Some('Q') => {
                let body = graph.get(1..).ok_or_else(unsupported)?;
                let (size, alphabet) = match body.split_once(',') {
                    Some((size, alphabet)) => (size, Some(alphabet)),
                    None => (body, None),
                };
                let size: usize = size.parse().map_err(|_| unsupported())?;
                match alphabet {
                    Some(alphabet) => StringLandscape::with_alphabet(size, alphabet, length),
                    None => StringLandscape::lettered(size, length),
                }
                .map(Self::Strings)
            }
            Some('P') => Ok(Self::Permutation(PermutationLandscape::new(
                PermutationMoves::from_moveset(moveset),
                length,
            ))),
            Some('X') => Ok(Self::Exchange(ExchangeLandscape::new(length))),
            _ => Err(unsupported()),
        }
    }

    fn landscape(&self) -> &dyn Landscape {
        match self {
            Self::Rna(landscape) => landscape,
            Self::Spin(landscape) => landscape,
            Self::Strings(landscape) => landscape,
            Self::Permutation(landscape) => landscape,
            Self::Exchange(landscape) => landscape,
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rna(rna) => write!(
                f,
                "RNA with noLP={}, shift={}",
                u8::from(rna.no_lonely_pairs()),
                u8::from(rna.shift())
            ),
            Self::Spin(spin) if spin.complement() => f.write_str("Q2 with complementation moves"),
            Self::Spin(_) => f.write_str("Q2"),
            Self::Strings(strings) => write!(
                f,
                "Q{} with alphabet '{}'",
                strings.alphabet().len(),
                strings.alphabet().iter().collect::<String>()
            ),
            Self::Permutation(permutation) => {
                write!(f, "permutations with moveset {:?}", permutation.moves())
            }
            Self::Exchange(_) => f.write_str("X with exchange moves"),
        }
    }
}

impl Landscape for Graph {
    fn name(&self) -> &str {
        self.landscape().name()
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        self.landscape().neighbors(configuration)
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        self.landscape().pack(configuration)
    }

    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        self.landscape().unpack(key)
    }

    fn is_rna(&self) -> bool {
        self.landscape().is_rna()
    }
}
