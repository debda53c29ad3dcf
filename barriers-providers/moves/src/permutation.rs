//! Permutations of distinct symbols.

use barriers_core::{Landscape, LandscapeError};

/// Move set over permutations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermutationMoves {
    /// Swap any two positions.
    #[default]
    Transposition,
    /// Swap two adjacent positions.
    Canonical,
    /// Reverse a contiguous block of at least two positions.
    Reversal,
}

impl PermutationMoves {
    /// Selects the move set from the first letter of `moveset`: `R`, `C`, and
    /// anything else (including `T`) for transpositions.
    #[must_use]
    pub fn from_moveset(moveset: &str) -> Self {
        match moveset.chars().next() {
            Some('R') => Self::Reversal,
            Some('C') => Self::Canonical,
            _ => Self::Transposition,
        }
    }
}

/// Permutations of a fixed length under one [`PermutationMoves`] set.
///
/// # Examples
/// ```
/// use barriers_core::Landscape;
/// use barriers_providers_moves::{PermutationLandscape, PermutationMoves};
///
/// let landscape = PermutationLandscape::new(PermutationMoves::Canonical, 3);
/// assert_eq!(landscape.neighbors("ABC")?, ["BAC", "ACB"]);
/// # Ok::<(), barriers_core::LandscapeError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationLandscape {
    moves: PermutationMoves,
    length: usize,
}

impl PermutationLandscape {
    /// Permutations of `length` symbols.
    #[must_use]
    pub const fn new(moves: PermutationMoves, length: usize) -> Self {
        Self { moves, length }
    }

    /// The active move set.
    #[must_use]
    pub const fn moves(&self) -> PermutationMoves {
        self.moves
    }

    fn symbols(&self, configuration: &str) -> Result<Vec<char>, LandscapeError> {
        let symbols: Vec<char> = configuration.chars().collect();
        if symbols.len() != self.length {
            return Err(LandscapeError::LengthMismatch {
                expected: self.length,
                actual: symbols.len(),
            });
        }
        for (position, symbol) in symbols.iter().enumerate() {
            if symbols[..position].contains(symbol) {
                return Err(LandscapeError::InvalidSymbol {
                    position,
                    symbol: *symbol,
                });
            }
        }
        Ok(symbols)
    }
}

impl Landscape for PermutationLandscape {
    fn name(&self) -> &str {
        "P"
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        let current = self.symbols(configuration)?;
        let n = current.len();
        let mut out = Vec::new();
        match self.moves {
            PermutationMoves::Canonical => {
                for i in 1..n {
                    let mut next = current.clone();
                    next.swap(i - 1, i);
                    out.push(next.into_iter().collect());
                }
            }
            PermutationMoves::Transposition | PermutationMoves::Reversal => {
                for i in 0..n {
                    for j in i + 1..n {
                        let mut next = current.clone();
                        if self.moves == PermutationMoves::Reversal {
                            next[i..=j].reverse();
                        } else {
                            next.swap(i, j);
                        }
                        out.push(next.into_iter().collect());
                    }
                }
            }
        }
        Ok(out)
    }
}
