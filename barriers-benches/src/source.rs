//! Synthetic spin-glass listings for benchmarking.
//!
//! Provides [`SpinGlass`], a Sherrington-Kirkpatrick style model with seeded
//! random couplings and fields. Every configuration is enumerated and sorted
//! by energy, producing the kind of complete listing the flooding engine
//! consumes. Spins are written `+`/`-` so the listing floods through the
//! `Q2` landscape.

use barriers_core::Record;
use barriers_providers_moves::SpinLandscape;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Largest spin count the generator enumerates.
pub const MAX_SPINS: usize = 24;

/// Errors that may occur during spin-glass generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SpinGlassError {
    /// The requested spin count was zero.
    #[error("spin count must be greater than zero")]
    ZeroSpins,
    /// The requested spin count would not fit in memory.
    #[error("spin count {spins} exceeds the supported maximum {max}")]
    TooManySpins {
        /// Requested spin count.
        spins: usize,
        /// Supported maximum.
        max: usize,
    },
}

/// Configuration for spin-glass generation.
#[derive(Clone, Debug)]
pub struct SpinGlassConfig {
    /// Number of spins.
    pub spins: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A fully connected spin glass with couplings and fields in `[-1, 1)`.
///
/// The energy of a state is `-sum(J_ij s_i s_j) - sum(h_i s_i)` over `i < j`.
///
/// # Examples
///
/// ```
/// use barriers_benches::source::{SpinGlass, SpinGlassConfig};
///
/// let glass = SpinGlass::generate(&SpinGlassConfig { spins: 4, seed: 7 })?;
/// let records = glass.sorted_records();
/// assert_eq!(records.len(), 16);
/// # Ok::<(), barriers_benches::source::SpinGlassError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SpinGlass {
    spins: usize,
    couplings: Vec<Vec<f64>>,
    fields: Vec<f64>,
}

impl SpinGlass {
    /// Draws couplings and fields from a seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns [`SpinGlassError::ZeroSpins`] for zero spins and
    /// [`SpinGlassError::TooManySpins`] above [`MAX_SPINS`].
    pub fn generate(config: &SpinGlassConfig) -> Result<Self, SpinGlassError> {
        if config.spins == 0 {
            return Err(SpinGlassError::ZeroSpins);
        }
        if config.spins > MAX_SPINS {
            return Err(SpinGlassError::TooManySpins {
                spins: config.spins,
                max: MAX_SPINS,
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let couplings: Vec<Vec<f64>> = (0..config.spins)
            .map(|row| {
                (row + 1..config.spins)
                    .map(|_| rng.gen_range(-1.0..1.0))
                    .collect()
            })
            .collect();
        let fields: Vec<f64> = (0..config.spins)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();

        Ok(Self {
            spins: config.spins,
            couplings,
            fields,
        })
    }

    /// Number of spins.
    #[must_use]
    pub const fn spins(&self) -> usize {
        self.spins
    }

    /// The `Q2` landscape matching this model's listings.
    #[must_use]
    pub const fn landscape(&self) -> SpinLandscape {
        SpinLandscape::new(self.spins, false)
    }

    /// Energy of `state`, whose most significant used bit is spin 0.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "spin-glass energies are sums of float products"
    )]
    pub fn energy(&self, state: u64) -> f64 {
        let spin = |position: usize| -> f64 {
            if (state >> (self.spins - 1 - position)) & 1 == 1 {
                1.0
            } else {
                -1.0
            }
        };
        let mut energy = 0.0_f64;
        for (i, (row, field)) in self.couplings.iter().zip(&self.fields).enumerate() {
            let si = spin(i);
            energy -= field * si;
            for (offset, coupling) in row.iter().enumerate() {
                energy -= coupling * si * spin(i + 1 + offset);
            }
        }
        energy
    }

    /// `+`/`-` rendering of `state`.
    #[must_use]
    pub fn configuration(&self, state: u64) -> String {
        (0..self.spins)
            .map(|position| {
                if (state >> (self.spins - 1 - position)) & 1 == 1 {
                    '+'
                } else {
                    '-'
                }
            })
            .collect()
    }

    /// Every configuration with its energy, sorted by ascending energy.
    ///
    /// Ties are broken by state so the listing is deterministic.
    #[must_use]
    pub fn sorted_records(&self) -> Vec<Record> {
        let mut states: Vec<(f64, u64)> = (0..1_u64 << self.spins)
            .map(|state| (self.energy(state), state))
            .collect();
        states.sort_by(|left, right| left.0.total_cmp(&right.0).then(left.1.cmp(&right.1)));
        states
            .into_iter()
            .map(|(energy, state)| Record::new(self.configuration(state), energy))
            .collect()
    }
}
