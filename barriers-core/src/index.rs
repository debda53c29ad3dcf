//! Structure index: every configuration seen so far, keyed by packed form.
//!
//! Entries are addressed by [`EntryId`]. All cross references between
//! entries (`down`) and from the basin forest into the index (saddles and the
//! representatives on either side of a merge) are ids, never borrows, so the
//! index can grow without invalidating them.

use std::collections::HashMap;

use thiserror::Error;

use crate::{forest::BasinId, landscape::StructureKey};

/// Stable handle to an [`IndexEntry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    /// Creates an id from its raw position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(raw: usize) -> Self { Self(raw) }

    /// Returns the raw position.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Level-local component membership recorded when an entry is indexed.
///
/// The component id is only meaningful while `level` is still the current
/// energy level; older stamps are ignored by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ComponentStamp {
    pub(crate) level: u64,
    pub(crate) component: usize,
}

/// One indexed configuration with its flooding provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexEntry {
    key: StructureKey,
    energy: f64,
    basin: BasinId,
    gradient_basin: BasinId,
    down: Option<EntryId>,
    component: Option<ComponentStamp>,
    sequence: u64,
}

impl IndexEntry {
    pub(crate) fn new(
        key: StructureKey,
        energy: f64,
        basin: BasinId,
        gradient_basin: BasinId,
        down: Option<EntryId>,
        component: Option<ComponentStamp>,
        sequence: u64,
    ) -> Self {
        Self {
            key,
            energy,
            basin,
            gradient_basin,
            down,
            component,
            sequence,
        }
    }

    /// Packed configuration.
    #[must_use]
    pub fn key(&self) -> &StructureKey {
        &self.key
    }

    /// Energy of the configuration.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Basin assigned when the entry was classified.
    ///
    /// The basin may since have merged into a deeper one; resolve through
    /// [`crate::BasinForest::root`] for the current attractor.
    #[must_use]
    pub fn basin(&self) -> BasinId {
        self.basin
    }

    /// Minimum reached by steepest descent from this entry.
    #[must_use]
    pub fn gradient_basin(&self) -> BasinId {
        self.gradient_basin
    }

    /// Lowest neighbour seen when the entry was classified, `None` for local
    /// minima.
    #[must_use]
    pub fn down(&self) -> Option<EntryId> {
        self.down
    }

    /// One-based position of the record in the input stream.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether the entry is a local minimum.
    #[must_use]
    pub fn is_minimum(&self) -> bool {
        self.down.is_none()
    }

    pub(crate) fn component(&self) -> Option<ComponentStamp> {
        self.component
    }
}

/// Returned by [`StructureIndex::insert`] when the key is already present.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("structure is already indexed as entry {existing:?}")]
pub struct DuplicateKey {
    /// Entry that already holds the key.
    pub existing: EntryId,
}

/// Index of visited configurations.
///
/// Insertion must reject keys that are already present; the flooding engine
/// treats that as a fatal consistency error.
pub trait StructureIndex {
    /// Finds the entry for `key`.
    fn find(&self, key: &StructureKey) -> Option<(EntryId, &IndexEntry)>;

    /// Returns the entry behind `id`.
    fn get(&self, id: EntryId) -> Option<&IndexEntry>;

    /// Inserts `entry`, returning its new id.
    ///
    /// # Errors
    /// Returns [`DuplicateKey`] when an entry with the same key exists.
    fn insert(&mut self, entry: IndexEntry) -> Result<EntryId, DuplicateKey>;

    /// Number of indexed entries.
    fn len(&self) -> usize;

    /// Returns whether the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-backed [`StructureIndex`] storing entries densely in insertion order.
///
/// # Examples
/// ```
/// use barriers_core::{HashStructureIndex, StructureIndex, StructureKey};
///
/// let index = HashStructureIndex::default();
/// assert!(index.is_empty());
/// assert!(index.find(&StructureKey::from("..")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct HashStructureIndex {
    entries: Vec<IndexEntry>,
    by_key: HashMap<StructureKey, EntryId>,
}

impl HashStructureIndex {
    /// Creates an index with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            by_key: HashMap::with_capacity(capacity),
        }
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &IndexEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(raw, entry)| (EntryId::new(raw), entry))
    }
}

impl StructureIndex for HashStructureIndex {
    fn find(&self, key: &StructureKey) -> Option<(EntryId, &IndexEntry)> {
        let id = *self.by_key.get(key)?;
        self.entries.get(id.get()).map(|entry| (id, entry))
    }

    fn get(&self, id: EntryId) -> Option<&IndexEntry> {
        self.entries.get(id.get())
    }

    fn insert(&mut self, entry: IndexEntry) -> Result<EntryId, DuplicateKey> {
        if let Some(existing) = self.by_key.get(&entry.key) {
            return Err(DuplicateKey {
                existing: *existing,
            });
        }
        let id = EntryId::new(self.entries.len());
        self.by_key.insert(entry.key.clone(), id);
        self.entries.push(entry);
        Ok(id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
