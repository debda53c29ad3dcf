//! End-of-level merge of components into the basin forest.

use tracing::debug;

use super::FloodState;
use crate::{
    Result,
    error::BarrierError,
    forest::{BasinId, Saddle},
    index::{EntryId, StructureIndex},
};

/// A component joining more than one basin, reported for the saddle log.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ComponentReport {
    pub(crate) energy: f64,
    pub(crate) size: u64,
    pub(crate) saddle: EntryId,
    pub(crate) basins: Vec<BasinId>,
}

impl<I: StructureIndex> FloodState<I> {
    /// Collapses the components of the current level into father links.
    ///
    /// Components are visited in canonical order. Within a component the
    /// deepest root survives as father; every other distinct root merges
    /// into it through the component's representative saddle.
    pub(crate) fn finalize_level(&mut self) -> Result<Vec<ComponentReport>> {
        let energy = self.energy;
        let level_weight = self.weight(energy);
        let components = self.tracker.drain();
        let survivors = components.len();
        let mut reports = Vec::new();
        let mut merges = 0_usize;

        for component in components {
            if component.members.len() > 1 {
                reports.push(ComponentReport {
                    energy,
                    size: component.size,
                    saddle: component.saddle,
                    basins: component.members.iter().map(|member| member.basin).collect(),
                });
            }
            let Some((first, rest)) = component.members.split_first() else {
                continue;
            };
            let mut father = self.forest.root(first.basin);
            let mut pool = 0_u64;
            let mut z = 0.0_f64;

            for member in rest {
                let mut child = self.forest.root(member.basin);
                if child == father {
                    continue;
                }
                let (left, right) = if child < father {
                    std::mem::swap(&mut child, &mut father);
                    (first.via, member.via)
                } else {
                    (member.via, first.via)
                };
                let merged = self.forest.get(child).ok_or(BarrierError::UnknownBasin {
                    basin: child.get(),
                    bound: self.forest.len(),
                })?;
                let (child_energy, child_pool, child_z) = (merged.energy(), merged.pool(), merged.z());

                if self.counts_toward_output(child) {
                    if energy - child_energy >= self.settings.minh {
                        self.saddles += 1;
                    } else {
                        self.false_minima += 1;
                    }
                }
                self.forest
                    .attach(child, father, Saddle::new(component.saddle, energy, left, right))?;
                merges += 1;

                if self.settings.pool_accounting {
                    let fathers_pool = self.forest.get(father).map_or(0, |basin| basin.pool());
                    self.forest.record_fathers_pool(child, fathers_pool);
                    pool += child_pool;
                    z += child_z;
                }
            }

            if self.settings.pool_accounting {
                if let Some(basin) = self.forest.get_mut(father) {
                    basin.absorb(pool + component.size, z + component.size as f64 * level_weight);
                }
            }
        }

        debug!(energy, components = survivors, merges, "closed energy level");
        Ok(reports)
    }

    /// Merges beyond the requested output range are not counted.
    fn counts_toward_output(&self, child: BasinId) -> bool {
        let max_print = self.settings.max_print;
        max_print == 0 || child.get() <= max_print + self.false_minima
    }
}
