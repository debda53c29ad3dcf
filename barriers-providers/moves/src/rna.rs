//! RNA secondary structures in dot-bracket notation.
//!
//! Neighbours are reached by opening one base pair, closing one compatible
//! pair, or (unless disabled) shifting one end of an existing pair. Keys store
//! each position as a base-3 digit, five positions per byte.

use barriers_core::{Landscape, LandscapeError, StructureKey};

use crate::errors::GraphError;

/// Unpaired bases a hairpin loop needs at minimum.
const MIN_HAIRPIN: usize = 3;
const DIGITS_PER_BYTE: usize = 5;
/// `3^5`; every packed byte is below this.
const BYTE_LIMIT: u8 = 243;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Base {
    A,
    C,
    G,
    U,
}

impl Base {
    fn parse(position: usize, symbol: char) -> Result<Self, GraphError> {
        match symbol.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'C' => Ok(Self::C),
            'G' => Ok(Self::G),
            'U' | 'T' => Ok(Self::U),
            _ => Err(GraphError::InvalidSequence { position, symbol }),
        }
    }

    const fn pairs_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::A, Self::U)
                | (Self::U, Self::A)
                | (Self::G, Self::C)
                | (Self::C, Self::G)
                | (Self::G, Self::U)
                | (Self::U, Self::G)
        )
    }
}

/// Partner of every position, if paired.
type PairTable = Vec<Option<usize>>;

/// Secondary structures over a fixed sequence.
///
/// # Examples
/// ```
/// use barriers_core::Landscape;
/// use barriers_providers_moves::RnaLandscape;
///
/// let landscape = RnaLandscape::new("GGGAAACCC", false, true)?;
/// let neighbors = landscape.neighbors("(((...)))")?;
/// assert_eq!(neighbors, [".((...)).", "(.(...).)", "((.....))"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RnaLandscape {
    sequence: Vec<Base>,
    no_lonely_pairs: bool,
    shift: bool,
}

impl RnaLandscape {
    /// Builds the landscape of `sequence`; `T` is read as `U`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidSequence`] for a symbol that is not a
    /// nucleotide.
    pub fn new(sequence: &str, no_lonely_pairs: bool, shift: bool) -> Result<Self, GraphError> {
        let sequence = sequence
            .chars()
            .enumerate()
            .map(|(position, symbol)| Base::parse(position, symbol))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            sequence,
            no_lonely_pairs,
            shift,
        })
    }

    /// Sequence length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Whether structures with isolated pairs are excluded.
    #[must_use]
    pub const fn no_lonely_pairs(&self) -> bool {
        self.no_lonely_pairs
    }

    /// Whether shift moves are generated.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.shift
    }

    fn can_pair(&self, i: usize, j: usize) -> bool {
        j > i + MIN_HAIRPIN
            && match (self.sequence.get(i), self.sequence.get(j)) {
                (Some(left), Some(right)) => left.pairs_with(*right),
                _ => false,
            }
    }

    fn pair_table(&self, structure: &str) -> Result<PairTable, LandscapeError> {
        let actual = structure.chars().count();
        if actual != self.len() {
            return Err(LandscapeError::LengthMismatch {
                expected: self.len(),
                actual,
            });
        }
        let mut table = vec![None; actual];
        let mut open = Vec::new();
        for (position, symbol) in structure.chars().enumerate() {
            match symbol {
                '.' => {}
                '(' => open.push(position),
                ')' => {
                    let partner = open.pop().ok_or(LandscapeError::Unbalanced { position })?;
                    table[partner] = Some(position);
                    table[position] = Some(partner);
                }
                _ => return Err(LandscapeError::InvalidSymbol { position, symbol }),
            }
        }
        match open.pop() {
            Some(position) => Err(LandscapeError::Unbalanced { position }),
            None => Ok(table),
        }
    }

    fn emit(&self, table: &PairTable, out: &mut Vec<String>) {
        if self.no_lonely_pairs && has_lonely_pair(table) {
            return;
        }
        out.push(render(table));
    }

    fn closures(&self, table: &PairTable, out: &mut Vec<String>) {
        let loops = enclosing_pairs(table);
        for i in 0..table.len() {
            if table[i].is_some() {
                continue;
            }
            for j in i + MIN_HAIRPIN + 1..table.len() {
                if table[j].is_none() && loops[i] == loops[j] && self.can_pair(i, j) {
                    let mut next = table.clone();
                    next[i] = Some(j);
                    next[j] = Some(i);
                    self.emit(&next, out);
                }
            }
        }
    }

    fn shifts(&self, table: &PairTable, pairs: &[(usize, usize)], out: &mut Vec<String>) {
        for &(i, j) in pairs {
            let mut opened = table.clone();
            opened[i] = None;
            opened[j] = None;
            let loops = enclosing_pairs(&opened);
            for k in (0..opened.len()).filter(|&k| k != i && k != j && opened[k].is_none()) {
                for anchor in [i, j] {
                    let (low, high) = (anchor.min(k), anchor.max(k));
                    if loops[low] == loops[high] && self.can_pair(low, high) {
                        let mut next = opened.clone();
                        next[low] = Some(high);
                        next[high] = Some(low);
                        self.emit(&next, out);
                    }
                }
            }
        }
    }
}

impl Landscape for RnaLandscape {
    fn name(&self) -> &str {
        if self.no_lonely_pairs {
            "RNA-noLP"
        } else {
            "RNA"
        }
    }

    /// Openings first, then closures, then shifts.
    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        let table = self.pair_table(configuration)?;
        let pairs: Vec<(usize, usize)> = table
            .iter()
            .enumerate()
            .filter_map(|(i, partner)| partner.filter(|&j| j > i).map(|j| (i, j)))
            .collect();
        let mut out = Vec::new();
        for &(i, j) in &pairs {
            let mut next = table.clone();
            next[i] = None;
            next[j] = None;
            self.emit(&next, &mut out);
        }
        self.closures(&table, &mut out);
        if self.shift {
            self.shifts(&table, &pairs, &mut out);
        }
        Ok(out)
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        let table = self.pair_table(configuration)?;
        let digits: Vec<u8> = table
            .iter()
            .enumerate()
            .map(|(i, partner)| match partner {
                None => 0,
                Some(j) if *j > i => 1,
                Some(_) => 2,
            })
            .collect();
        let bytes: Vec<u8> = digits
            .chunks(DIGITS_PER_BYTE)
            .map(|chunk| {
                (0..DIGITS_PER_BYTE).fold(0_u8, |byte, slot| {
                    byte * 3 + chunk.get(slot).copied().unwrap_or(0)
                })
            })
            .collect();
        Ok(StructureKey::new(bytes))
    }

    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        let invalid = LandscapeError::InvalidKey { length: key.len() };
        if key.len() != self.len().div_ceil(DIGITS_PER_BYTE) {
            return Err(invalid);
        }
        let mut structure = String::with_capacity(self.len());
        for &byte in key.as_bytes() {
            if byte >= BYTE_LIMIT {
                return Err(invalid);
            }
            let mut divisor = 81_u8;
            for _ in 0..DIGITS_PER_BYTE {
                structure.push(match (byte / divisor) % 3 {
                    0 => '.',
                    1 => '(',
                    _ => ')',
                });
                divisor /= 3;
            }
        }
        structure.truncate(self.len());
        Ok(structure)
    }

    fn is_rna(&self) -> bool {
        true
    }
}

fn render(table: &PairTable) -> String {
    table
        .iter()
        .enumerate()
        .map(|(i, partner)| match partner {
            None => '.',
            Some(j) if *j > i => '(',
            Some(_) => ')',
        })
        .collect()
}

/// Innermost pair around each position, by opening index.
///
/// Two unpaired positions share a loop exactly when their entries agree.
fn enclosing_pairs(table: &PairTable) -> Vec<Option<usize>> {
    let mut open: Vec<usize> = Vec::new();
    table
        .iter()
        .enumerate()
        .map(|(i, partner)| match partner {
            Some(j) if *j > i => {
                let outer = open.last().copied();
                open.push(i);
                outer
            }
            Some(_) => {
                open.pop();
                open.last().copied()
            }
            None => open.last().copied(),
        })
        .collect()
}

/// A pair is lonely when neither the pair outside nor the pair inside it
/// stacks on it.
fn has_lonely_pair(table: &PairTable) -> bool {
    table.iter().enumerate().any(|(i, partner)| {
        partner.is_some_and(|j| {
            let stacked_outside =
                i > 0 && table.get(i - 1).copied().flatten() == Some(j + 1);
            let stacked_inside = table.get(i + 1).copied().flatten() == Some(j.wrapping_sub(1));
            j > i && !stacked_outside && !stacked_inside
        })
    })
}
