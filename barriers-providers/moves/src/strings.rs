//! Strings over a finite alphabet with single-substitution moves.

use barriers_core::{Landscape, LandscapeError};

use crate::errors::GraphError;

/// Largest alphabet the default `A..` lettering covers.
const MAX_DEFAULT_ALPHABET: usize = 26;

/// Hamming graph `Q<n>`: every position may change to any other letter.
///
/// # Examples
/// ```
/// use barriers_core::Landscape;
/// use barriers_providers_moves::StringLandscape;
///
/// let landscape = StringLandscape::lettered(3, 2)?;
/// assert_eq!(landscape.neighbors("AB")?, ["BB", "CB", "AA", "AC"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLandscape {
    name: String,
    alphabet: Vec<char>,
    length: usize,
}

impl StringLandscape {
    /// Uses the first `size` capital letters.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidAlphabet`] unless `1 <= size <= 26`.
    pub fn lettered(size: usize, length: usize) -> Result<Self, GraphError> {
        if size == 0 || size > MAX_DEFAULT_ALPHABET {
            return Err(GraphError::InvalidAlphabet {
                graph: format!("Q{size}"),
                reason: "size must lie in 1..=26",
            });
        }
        let alphabet = ('A'..='Z').take(size).collect();
        Ok(Self {
            name: format!("Q{size}"),
            alphabet,
            length,
        })
    }

    /// Uses an explicit alphabet whose length must equal `size`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidAlphabet`] when the alphabet has the wrong
    /// length or repeats a letter.
    pub fn with_alphabet(size: usize, alphabet: &str, length: usize) -> Result<Self, GraphError> {
        let name = format!("Q{size},{alphabet}");
        let letters: Vec<char> = alphabet.chars().collect();
        if letters.len() != size {
            return Err(GraphError::InvalidAlphabet {
                graph: name,
                reason: "alphabet length differs from its size",
            });
        }
        if letters
            .iter()
            .enumerate()
            .any(|(i, letter)| letters[..i].contains(letter))
        {
            return Err(GraphError::InvalidAlphabet {
                graph: name,
                reason: "alphabet repeats a letter",
            });
        }
        Ok(Self {
            name,
            alphabet: letters,
            length,
        })
    }

    /// Letters in move order.
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn letters(&self, configuration: &str) -> Result<Vec<char>, LandscapeError> {
        let letters: Vec<char> = configuration.chars().collect();
        if letters.len() != self.length {
            return Err(LandscapeError::LengthMismatch {
                expected: self.length,
                actual: letters.len(),
            });
        }
        match letters
            .iter()
            .position(|letter| !self.alphabet.contains(letter))
        {
            Some(position) => Err(LandscapeError::InvalidSymbol {
                position,
                symbol: letters[position],
            }),
            None => Ok(letters),
        }
    }
}

impl Landscape for StringLandscape {
    fn name(&self) -> &str {
        &self.name
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        let current = self.letters(configuration)?;
        let mut out = Vec::with_capacity(current.len() * self.alphabet.len().saturating_sub(1));
        for (position, letter) in current.iter().enumerate() {
            for substitute in self.alphabet.iter().filter(|&candidate| candidate != letter) {
                let mut next = current.clone();
                next[position] = *substitute;
                out.push(next.into_iter().collect());
            }
        }
        Ok(out)
    }
}
