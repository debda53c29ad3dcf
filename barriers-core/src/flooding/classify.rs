//! Per-record neighbour flooding.

use std::sync::Arc;

use super::{FloodState, components::Member, same_level};
use crate::{
    Result,
    error::BarrierError,
    forest::{Basin, BasinId},
    index::{ComponentStamp, EntryId, IndexEntry, StructureIndex},
    landscape::StructureKey,
};

/// Outcome of classifying one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Classification {
    pub(crate) entry: EntryId,
    pub(crate) basin: BasinId,
    pub(crate) component: usize,
    pub(crate) down: Option<EntryId>,
}

impl Classification {
    pub(crate) fn is_minimum(&self) -> bool {
        self.down.is_none()
    }
}

/// Lowest indexed neighbour seen so far.
#[derive(Clone, Copy, Debug)]
struct Descent {
    entry: EntryId,
    energy: f64,
    root: BasinId,
    gradient: BasinId,
}

impl Descent {
    fn improves_on(&self, best: Option<&Self>) -> bool {
        best.is_none_or(|best| {
            self.energy < best.energy || (self.energy == best.energy && self.root < best.root)
        })
    }
}

impl<I: StructureIndex> FloodState<I> {
    /// Floods `neighbors` of the current record and indexes the record.
    ///
    /// Neighbours that were never indexed are ignored. Touched basins are
    /// folded by consecutive root id, so a basin revisited after a different
    /// one is recorded twice and deduplicated later by the component.
    pub(crate) fn classify(
        &mut self,
        configuration: &str,
        key: StructureKey,
        neighbors: &[StructureKey],
    ) -> Result<Classification> {
        let energy = self.energy;
        let level = self.tracker.level();
        let mut is_minimum = true;
        let mut best: Option<Descent> = None;
        let mut component: Option<usize> = None;
        let mut touched: Vec<Member> = Vec::new();
        let mut previous_root: Option<BasinId> = None;

        for neighbor in neighbors {
            let Some((id, entry)) = self.index.find(neighbor) else {
                continue;
            };
            let candidate = Descent {
                entry: id,
                energy: entry.energy(),
                root: self.forest.root(entry.basin()),
                gradient: entry.gradient_basin(),
            };
            let stamp = entry.component();

            if candidate.energy < energy {
                is_minimum = false;
            }
            if candidate.improves_on(best.as_ref()) {
                best = Some(candidate);
            }
            let current_level = stamp.filter(|stamp| stamp.level == level);
            if let Some(stamp) = current_level.filter(|_| same_level(candidate.energy, energy)) {
                let theirs = self.tracker.find(stamp.component);
                component = Some(match component {
                    Some(mine) => self.tracker.union(mine, theirs),
                    None => theirs,
                });
            }
            if previous_root != Some(candidate.root) {
                touched.push(Member {
                    basin: candidate.root,
                    via: id,
                });
            }
            previous_root = Some(candidate.root);
        }

        let opens_component = component.is_none();
        let component = component.unwrap_or_else(|| self.tracker.next_id());
        let (basin, gradient, down) = if is_minimum {
            let basin = self.forest.next_id();
            (basin, basin, None)
        } else {
            let first = touched.first().ok_or(BarrierError::InconsistentForest {
                invariant: "a non-minimum touches at least one basin",
            })?;
            let descent = best.ok_or(BarrierError::InconsistentForest {
                invariant: "a non-minimum has a lowest neighbour",
            })?;
            (first.basin, descent.gradient, Some(descent.entry))
        };

        let entry = IndexEntry::new(
            key,
            energy,
            basin,
            gradient,
            down,
            Some(ComponentStamp { level, component }),
            self.records,
        );
        let id = self
            .index
            .insert(entry)
            .map_err(|_| BarrierError::DuplicateStructure {
                structure: Arc::from(configuration),
            })?;

        if opens_component {
            let opened = self.tracker.open(id);
            debug_assert_eq!(opened, component);
        }
        if is_minimum {
            let weight = self.weight(energy);
            self.forest.push(Basin::new_minimum(id, energy, weight));
            touched.push(Member { basin, via: id });
        } else {
            self.tracker.grow(component);
        }
        self.tracker.absorb(component, touched);
        let weight = self.weight(energy);
        self.forest.accumulate_gradient(gradient, weight);

        Ok(Classification {
            entry: id,
            basin,
            component,
            down,
        })
    }
}
