//! Result of a barrier analysis.
//!
//! [`BarrierTree`] owns the finished forest and the structure index it points
//! into, and exposes the post-processing steps: significance renumbering,
//! path reconstruction and free energies.

use crate::{
    Result,
    error::BarrierError,
    flooding::FloodState,
    forest::{BasinForest, BasinId},
    index::{EntryId, HashStructureIndex, IndexEntry, StructureIndex},
    path::{PathReconstructor, PathStep},
    significance::{Renumbering, effective_saddle},
};

/// Offset above the last energy that marks the top of the explored landscape.
const CEILING_OFFSET: f64 = 0.001;

/// Counters reported once a run completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Records consumed from the stream.
    pub records: u64,
    /// Significant saddles found.
    pub saddles: usize,
    /// Basins discovered.
    pub basins: usize,
    /// Structures held by the index.
    pub structures: usize,
    /// Energy just above the last record read.
    pub ceiling: f64,
    /// Energy of the first basin.
    pub ground: f64,
}

/// Finished merge tree over the structures read.
#[derive(Debug)]
pub struct BarrierTree<I = HashStructureIndex> {
    forest: BasinForest,
    index: I,
    records_read: u64,
    saddles: usize,
    false_minima: usize,
    reference_energy: f64,
    kt: f64,
    last_energy: f64,
    minh: f64,
    max_print: usize,
}

impl<I: StructureIndex> BarrierTree<I> {
    pub(crate) fn from_flood(flood: FloodState<I>, minh: f64, max_print: usize) -> Self {
        Self {
            forest: flood.forest,
            index: flood.index,
            records_read: flood.records,
            saddles: flood.saddles,
            false_minima: flood.false_minima,
            reference_energy: flood.reference_energy,
            kt: flood.settings.kt,
            last_energy: flood.energy,
            minh,
            max_print,
        }
    }

    /// The basin forest.
    #[must_use]
    pub fn forest(&self) -> &BasinForest {
        &self.forest
    }

    /// The structure index.
    #[must_use]
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Looks up an indexed structure.
    #[must_use]
    pub fn structure(&self, entry: EntryId) -> Option<&IndexEntry> {
        self.index.get(entry)
    }

    /// Records consumed before flooding stopped.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Number of significant saddles counted within the output range.
    #[must_use]
    pub fn saddle_count(&self) -> usize {
        self.saddles
    }

    /// Number of merges below the significance threshold within the output
    /// range.
    #[must_use]
    pub fn false_minima(&self) -> usize {
        self.false_minima
    }

    /// Reference energy of the Boltzmann weights.
    #[must_use]
    pub fn reference_energy(&self) -> f64 {
        self.reference_energy
    }

    /// Thermal energy of the Boltzmann weights.
    #[must_use]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Energy of the last record read.
    #[must_use]
    pub fn last_energy(&self) -> f64 {
        self.last_energy
    }

    /// Significance threshold the tree was built with.
    #[must_use]
    pub fn minh(&self) -> f64 {
        self.minh
    }

    /// Energy just above the last record read.
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.last_energy + CEILING_OFFSET
    }

    /// Saddle height used for reporting `basin`; unmerged basins sit just
    /// above the last energy read.
    #[must_use]
    pub fn effective_saddle_energy(&self, basin: BasinId) -> Option<f64> {
        self.forest
            .get(basin)
            .map(|found| effective_saddle(found, self.last_energy))
    }

    /// Reported barrier height of `basin`.
    #[must_use]
    pub fn barrier(&self, basin: BasinId) -> Option<f64> {
        let found = self.forest.get(basin)?;
        Some(effective_saddle(found, self.last_energy) - found.energy())
    }

    /// Converts a partition sum into a free energy, `ref - kT ln z`.
    #[must_use]
    pub fn free_energy(&self, z: f64) -> f64 {
        self.reference_energy - self.kt * z.ln()
    }

    /// Numbers the significant basins contiguously.
    ///
    /// # Examples
    /// ```
    /// use barriers_core::{BarrierBuilder, Landscape, LandscapeError, Record};
    ///
    /// struct Isolated;
    ///
    /// impl Landscape for Isolated {
    ///     fn name(&self) -> &str { "isolated" }
    ///     fn neighbors(&self, _: &str) -> Result<Vec<String>, LandscapeError> { Ok(Vec::new()) }
    /// }
    ///
    /// let records = [("a", 0.0), ("b", 1.0), ("c", 2.0)]
    ///     .into_iter()
    ///     .map(|(configuration, energy)| Ok(Record::new(configuration, energy)));
    /// let tree = BarrierBuilder::new().with_minh(0.5).build()?.run(&Isolated, records)?;
    /// let renumbering = tree.renumber();
    /// assert_eq!(renumbering.len(), 2);
    /// # Ok::<(), barriers_core::BarrierError>(())
    /// ```
    #[must_use]
    pub fn renumber(&self) -> Renumbering {
        Renumbering::compute(&self.forest, self.minh, self.max_print, self.last_energy)
    }

    /// Reconstructs the path between two renumbered basins.
    ///
    /// # Errors
    /// Returns [`BarrierError::UnknownBasin`] when either id is not in
    /// `renumbering`, [`BarrierError::NoSaddle`] when the basins never merged
    /// and [`BarrierError::InconsistentForest`] when forest links are broken.
    pub fn reconstruct_path(
        &self,
        from: usize,
        to: usize,
        renumbering: &Renumbering,
    ) -> Result<Vec<PathStep>> {
        let resolve = |rank: usize| {
            renumbering.raw(rank).ok_or(BarrierError::UnknownBasin {
                basin: rank,
                bound: renumbering.len(),
            })
        };
        self.reconstruct_path_between(resolve(from)?, resolve(to)?)
    }

    /// Reconstructs the path between two forest basins.
    ///
    /// # Errors
    /// As [`Self::reconstruct_path`].
    pub fn reconstruct_path_between(&self, from: BasinId, to: BasinId) -> Result<Vec<PathStep>> {
        PathReconstructor::new(&self.forest, &self.index).reconstruct(from, to)
    }

    /// Summary counters of the run.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            records: self.records_read,
            saddles: self.saddles,
            basins: self.forest.len(),
            structures: self.index.len(),
            ceiling: self.ceiling(),
            ground: self
                .forest
                .get(BasinId::first())
                .map_or(self.last_energy, |basin| basin.energy()),
        }
    }
}
