//! Streaming flood of a sorted energy landscape.
//!
//! [`FloodState`] is the single mutable context threaded through the driver:
//! it owns the structure index, the basin forest and the level-local
//! component tracker, plus the run counters. The per-record classifier lives
//! in [`classify`]; the end-of-level merge lives in [`finalize`].

mod classify;
mod components;
mod finalize;

use crate::{forest::BasinForest, index::StructureIndex};

#[cfg(test)]
use self::classify::Classification;
use self::components::LevelComponentTracker;
pub(crate) use self::finalize::ComponentReport;

/// Relative tolerance under which two energies belong to the same level.
pub(crate) const LEVEL_TOLERANCE: f64 = 1e-6;

/// Returns whether `neighbor` and `current` are joined by a same-energy saddle.
pub(crate) fn same_level(neighbor: f64, current: f64) -> bool {
    (neighbor - current).abs() <= LEVEL_TOLERANCE * current.abs()
}

/// Run parameters consumed while flooding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FloodSettings {
    pub(crate) minh: f64,
    pub(crate) max_print: usize,
    pub(crate) pool_accounting: bool,
    pub(crate) kt: f64,
}

#[derive(Debug)]
pub(crate) struct FloodState<I> {
    pub(crate) index: I,
    pub(crate) forest: BasinForest,
    tracker: LevelComponentTracker,
    pub(crate) settings: FloodSettings,
    pub(crate) reference_energy: f64,
    pub(crate) energy: f64,
    pub(crate) records: u64,
    pub(crate) saddles: usize,
    pub(crate) false_minima: usize,
}

impl<I: StructureIndex> FloodState<I> {
    pub(crate) fn new(index: I, settings: FloodSettings) -> Self {
        Self {
            index,
            forest: BasinForest::with_capacity(1024),
            tracker: LevelComponentTracker::default(),
            settings,
            reference_energy: 0.0,
            energy: 0.0,
            records: 0,
            saddles: 0,
            false_minima: 0,
        }
    }

    /// Seeds the current level and the Boltzmann reference from the first
    /// record.
    pub(crate) fn start(&mut self, energy: f64, reference_energy: Option<f64>) {
        self.energy = energy;
        self.reference_energy = reference_energy.unwrap_or(energy);
    }

    /// Boltzmann weight of a structure at `energy`.
    pub(crate) fn weight(&self, energy: f64) -> f64 {
        ((self.reference_energy - energy) / self.settings.kt).exp()
    }

    /// Whether the requested number of significant saddles has been reached.
    pub(crate) fn saturated(&self) -> bool {
        self.settings.max_print != 0 && self.saddles + 1 == self.settings.max_print
    }
}
