//! Binary `+`/`-` configurations packed one bit per position.

use barriers_core::{Landscape, LandscapeError, StructureKey};

const BITS_PER_BYTE: usize = 8;

fn spins(configuration: &str, length: usize) -> Result<Vec<bool>, LandscapeError> {
    let actual = configuration.chars().count();
    if actual != length {
        return Err(LandscapeError::LengthMismatch {
            expected: length,
            actual,
        });
    }
    configuration
        .chars()
        .enumerate()
        .map(|(position, symbol)| match symbol {
            '+' => Ok(true),
            '-' => Ok(false),
            _ => Err(LandscapeError::InvalidSymbol { position, symbol }),
        })
        .collect()
}

fn render(spins: &[bool]) -> String {
    spins.iter().map(|&up| if up { '+' } else { '-' }).collect()
}

fn pack_spins(configuration: &str, length: usize) -> Result<StructureKey, LandscapeError> {
    let bytes: Vec<u8> = spins(configuration, length)?
        .chunks(BITS_PER_BYTE)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0_u8, |byte, (slot, &up)| byte | (u8::from(up) << (7 - slot)))
        })
        .collect();
    Ok(StructureKey::new(bytes))
}

fn unpack_spins(key: &StructureKey, length: usize) -> Result<String, LandscapeError> {
    if key.len() != length.div_ceil(BITS_PER_BYTE) {
        return Err(LandscapeError::InvalidKey { length: key.len() });
    }
    let spins: Vec<bool> = key
        .as_bytes()
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).map(move |slot| byte & (0x80 >> slot) != 0))
        .take(length)
        .collect();
    Ok(render(&spins))
}

/// Hamming graph over `+`/`-` strings: every single spin flip, optionally
/// plus the global complement.
///
/// # Examples
/// ```
/// use barriers_core::Landscape;
/// use barriers_providers_moves::SpinLandscape;
///
/// let landscape = SpinLandscape::new(3, true);
/// assert_eq!(landscape.neighbors("+-+")?, ["--+", "+++", "+--", "-+-"]);
/// # Ok::<(), barriers_core::LandscapeError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinLandscape {
    length: usize,
    complement: bool,
}

impl SpinLandscape {
    /// Spins of `length` positions; `complement` adds the all-flip move.
    #[must_use]
    pub const fn new(length: usize, complement: bool) -> Self {
        Self { length, complement }
    }

    /// Whether the global complement is a move.
    #[must_use]
    pub const fn complement(&self) -> bool {
        self.complement
    }
}

impl Landscape for SpinLandscape {
    fn name(&self) -> &str {
        "Q2"
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        let current = spins(configuration, self.length)?;
        let mut out: Vec<String> = (0..current.len())
            .map(|flip| {
                let mut next = current.clone();
                next[flip] = !next[flip];
                render(&next)
            })
            .collect();
        // A single spin's complement is its only flip.
        if self.complement && current.len() > 1 {
            let flipped: Vec<bool> = current.iter().map(|up| !up).collect();
            out.push(render(&flipped));
        }
        Ok(out)
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        pack_spins(configuration, self.length)
    }

    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        unpack_spins(key, self.length)
    }
}

/// Johnson graph: exchange one `+` with one `-`, preserving magnetisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeLandscape {
    length: usize,
}

impl ExchangeLandscape {
    /// Configurations of `length` positions.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Landscape for ExchangeLandscape {
    fn name(&self) -> &str {
        "X"
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        let current = spins(configuration, self.length)?;
        let mut out = Vec::new();
        for i in 0..current.len() {
            for j in i + 1..current.len() {
                if current[i] != current[j] {
                    let mut next = current.clone();
                    next.swap(i, j);
                    out.push(render(&next));
                }
            }
        }
        Ok(out)
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        pack_spins(configuration, self.length)
    }

    fn unpack(&self, key: &StructureKey) -> Result<String, LandscapeError> {
        unpack_spins(key, self.length)
    }
}
