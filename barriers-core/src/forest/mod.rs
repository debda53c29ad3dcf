//! Basin forest: every local minimum discovered so far and how they merge.
//!
//! Basins are numbered from `1` in discovery order. A merged basin points at
//! the basin it drained into through `father`; fathers always carry a smaller
//! id than their children, so following fathers terminates at a root in at
//! most `len()` steps. Links into the [`crate::StructureIndex`] are
//! [`EntryId`]s, which stay valid while both tables grow.

use std::{fmt, num::NonZeroUsize};

use tracing::debug;

use crate::{Result, error::BarrierError, index::EntryId};

/// One-based identifier of a basin in a [`BasinForest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasinId(NonZeroUsize);

impl BasinId {
    /// Creates an id, returning `None` for `0`.
    ///
    /// # Examples
    /// ```
    /// use barriers_core::BasinId;
    ///
    /// assert!(BasinId::new(0).is_none());
    /// assert_eq!(BasinId::new(3).map(BasinId::get), Some(3));
    /// ```
    #[must_use]
    pub const fn new(raw: usize) -> Option<Self> {
        match NonZeroUsize::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// The id of the first basin discovered.
    #[rustfmt::skip]
    #[must_use]
    pub const fn first() -> Self { Self(NonZeroUsize::MIN) }

    /// Returns the raw one-based id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0.get() }

    const fn slot(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for BasinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Saddle through which a basin merged into its father.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Saddle {
    entry: EntryId,
    energy: f64,
    left: EntryId,
    right: EntryId,
}

impl Saddle {
    pub(crate) const fn new(entry: EntryId, energy: f64, left: EntryId, right: EntryId) -> Self {
        Self {
            entry,
            energy,
            left,
            right,
        }
    }

    /// Representative saddle configuration.
    #[must_use]
    pub const fn entry(&self) -> EntryId {
        self.entry
    }

    /// Saddle height.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Structure on the merged basin's side of the saddle.
    #[must_use]
    pub const fn left(&self) -> EntryId {
        self.left
    }

    /// Structure on the father's side of the saddle.
    #[must_use]
    pub const fn right(&self) -> EntryId {
        self.right
    }
}

/// A local minimum and the accumulators of the region draining into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Basin {
    minimum: EntryId,
    energy: f64,
    father: Option<BasinId>,
    saddle: Option<Saddle>,
    pool: u64,
    fathers_pool: u64,
    gradient_pool: u64,
    z: f64,
    zg: f64,
}

impl Basin {
    pub(crate) const fn new_minimum(minimum: EntryId, energy: f64, z: f64) -> Self {
        Self {
            minimum,
            energy,
            father: None,
            saddle: None,
            pool: 1,
            fathers_pool: 0,
            gradient_pool: 0,
            z,
            zg: 0.0,
        }
    }

    /// Index entry of the minimum configuration.
    #[must_use]
    pub const fn minimum(&self) -> EntryId {
        self.minimum
    }

    /// Energy of the minimum.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Basin this one merged into, `None` while unmerged.
    #[must_use]
    pub const fn father(&self) -> Option<BasinId> {
        self.father
    }

    /// Saddle of the merge, set exactly once together with the father.
    #[must_use]
    pub const fn saddle(&self) -> Option<&Saddle> {
        self.saddle.as_ref()
    }

    /// Number of structures accumulated into this basin.
    #[must_use]
    pub const fn pool(&self) -> u64 {
        self.pool
    }

    /// Father's pool size at the moment this basin merged.
    #[must_use]
    pub const fn fathers_pool(&self) -> u64 {
        self.fathers_pool
    }

    /// Number of structures whose steepest descent ends here.
    #[must_use]
    pub const fn gradient_pool(&self) -> u64 {
        self.gradient_pool
    }

    /// Boltzmann-weighted partition sum of the basin.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// Partition sum of the gradient basin.
    #[must_use]
    pub const fn zg(&self) -> f64 {
        self.zg
    }

    /// Height of the barrier separating this basin from its father.
    #[must_use]
    pub fn barrier(&self) -> Option<f64> {
        self.saddle.map(|saddle| saddle.energy - self.energy)
    }

    pub(crate) fn absorb(&mut self, pool: u64, z: f64) {
        self.pool += pool;
        self.z += z;
    }
}

/// Growable table of basins with father links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasinForest {
    basins: Vec<Basin>,
}

impl BasinForest {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            basins: Vec::with_capacity(capacity),
        }
    }

    /// Number of basins discovered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.basins.len()
    }

    /// Returns whether no basin has been discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.basins.is_empty()
    }

    /// Returns the basin behind `id`.
    #[must_use]
    pub fn get(&self, id: BasinId) -> Option<&Basin> {
        self.basins.get(id.slot())
    }

    pub(crate) fn get_mut(&mut self, id: BasinId) -> Option<&mut Basin> {
        self.basins.get_mut(id.slot())
    }

    /// Iterates over basins in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (BasinId, &Basin)> {
        self.basins
            .iter()
            .enumerate()
            .map(|(slot, basin)| (Self::id_at(slot), basin))
    }

    /// Follows father links from `id` to the unmerged basin it drains into.
    ///
    /// # Examples
    /// ```
    /// use barriers_core::{BasinForest, BasinId};
    ///
    /// let forest = BasinForest::default();
    /// assert_eq!(forest.root(BasinId::first()), BasinId::first());
    /// ```
    #[must_use]
    pub fn root(&self, id: BasinId) -> BasinId {
        let mut current = id;
        while let Some(father) = self.get(current).and_then(Basin::father) {
            current = father;
        }
        current
    }

    /// Number of father links between `id` and its root.
    #[must_use]
    pub fn depth(&self, id: BasinId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(father) = self.get(current).and_then(Basin::father) {
            depth += 1;
            current = father;
        }
        depth
    }

    pub(crate) fn next_id(&self) -> BasinId {
        Self::id_at(self.basins.len())
    }

    pub(crate) fn push(&mut self, basin: Basin) -> BasinId {
        if self.basins.len() == self.basins.capacity() {
            debug!(basins = self.basins.len(), "growing basin table");
        }
        let id = self.next_id();
        self.basins.push(basin);
        id
    }

    pub(crate) fn attach(&mut self, child: BasinId, father: BasinId, saddle: Saddle) -> Result<()> {
        if father >= child {
            return Err(BarrierError::InconsistentForest {
                invariant: "a father must be discovered before its child",
            });
        }
        let bound = self.basins.len();
        let basin = self.get_mut(child).ok_or(BarrierError::UnknownBasin {
            basin: child.get(),
            bound,
        })?;
        if basin.father.is_some() {
            return Err(BarrierError::InconsistentForest {
                invariant: "only unmerged basins can merge",
            });
        }
        basin.father = Some(father);
        basin.saddle = Some(saddle);
        Ok(())
    }

    pub(crate) fn record_fathers_pool(&mut self, child: BasinId, pool: u64) {
        if let Some(basin) = self.get_mut(child) {
            basin.fathers_pool = pool;
        }
    }

    pub(crate) fn accumulate_gradient(&mut self, id: BasinId, weight: f64) {
        if let Some(basin) = self.get_mut(id) {
            basin.gradient_pool += 1;
            basin.zg += weight;
        }
    }

    fn id_at(slot: usize) -> BasinId {
        BasinId(NonZeroUsize::MIN.saturating_add(slot))
    }
}
