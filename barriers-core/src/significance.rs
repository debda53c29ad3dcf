//! Dense renumbering of the basins worth reporting.

use crate::forest::{Basin, BasinForest, BasinId};

/// Offset above the last energy read that stands in for the saddle of a
/// basin that never merged.
pub(crate) const UNMERGED_SADDLE_OFFSET: f64 = 1e-6;

/// Maps forest ids of significant basins onto the contiguous range `1..=K`.
///
/// A basin is significant when its barrier reaches the threshold `minh`.
/// Basins that never merged use a saddle just above the last energy read, so
/// they are excluded only when their minimum lies within `minh` of the top of
/// the explored landscape. Numbering follows ascending forest ids and stops
/// once the output cap is reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Renumbering {
    by_basin: Vec<Option<usize>>,
    by_rank: Vec<BasinId>,
}

impl Renumbering {
    pub(crate) fn compute(
        forest: &BasinForest,
        minh: f64,
        max_print: usize,
        last_energy: f64,
    ) -> Self {
        let total = forest.len();
        let cap = if max_print == 0 || max_print > total {
            total
        } else {
            max_print
        };
        let mut by_basin = vec![None; total];
        let mut by_rank = Vec::with_capacity(cap);

        for ((id, basin), slot) in forest.iter().zip(by_basin.iter_mut()) {
            if by_rank.len() >= cap {
                break;
            }
            let saddle = effective_saddle(basin, last_energy);
            if saddle - basin.energy() >= minh {
                by_rank.push(id);
                *slot = Some(by_rank.len());
            }
        }

        Self { by_basin, by_rank }
    }

    /// Returns the renumbered id of forest basin `basin`, `None` when it is
    /// filtered out.
    #[must_use]
    pub fn get(&self, basin: BasinId) -> Option<usize> {
        self.by_basin.get(basin.get() - 1).copied().flatten()
    }

    /// Returns the forest basin behind renumbered id `rank`.
    #[must_use]
    pub fn raw(&self, rank: usize) -> Option<BasinId> {
        rank.checked_sub(1)
            .and_then(|slot| self.by_rank.get(slot))
            .copied()
    }

    /// Number of significant basins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_rank.len()
    }

    /// Returns whether no basin survived the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_rank.is_empty()
    }

    /// Iterates over `(renumbered id, forest id)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, BasinId)> + '_ {
        self.by_rank
            .iter()
            .enumerate()
            .map(|(slot, &basin)| (slot + 1, basin))
    }
}

/// Saddle height used for filtering and reporting.
pub(crate) fn effective_saddle(basin: &Basin, last_energy: f64) -> f64 {
    basin
        .saddle()
        .map_or(last_energy + UNMERGED_SADDLE_OFFSET, |saddle| saddle.energy())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{forest::Saddle, index::EntryId};

    fn forest() -> BasinForest {
        let mut forest = BasinForest::default();
        for (raw, energy) in [0.0, 0.5, 0.8].into_iter().enumerate() {
            forest.push(Basin::new_minimum(EntryId::new(raw), energy, 1.0));
        }
        let saddle = |energy| Saddle::new(EntryId::new(9), energy, EntryId::new(0), EntryId::new(1));
        forest
            .attach(BasinId::new(3).expect("id"), BasinId::new(2).expect("id"), saddle(1.0))
            .expect("3 merges into 2");
        forest
            .attach(BasinId::new(2).expect("id"), BasinId::first(), saddle(2.0))
            .expect("2 merges into 1");
        forest
    }

    #[rstest]
    #[case(0.0, 0, vec![1, 2, 3])]
    #[case(0.5, 0, vec![1, 2])]
    #[case(0.0, 2, vec![1, 2])]
    #[case(5.0, 0, vec![])]
    fn renumbering_is_contiguous_over_significant_basins(
        #[case] minh: f64,
        #[case] max_print: usize,
        #[case] expected: Vec<usize>,
    ) {
        let renumbering = Renumbering::compute(&forest(), minh, max_print, 2.0);
        let raw: Vec<usize> = renumbering.iter().map(|(_, basin)| basin.get()).collect();
        let ranks: Vec<usize> = renumbering.iter().map(|(rank, _)| rank).collect();

        assert_eq!(raw, expected);
        assert_eq!(ranks, (1..=expected.len()).collect::<Vec<_>>());
    }

    #[test]
    fn lookups_resolve_in_both_directions() {
        let renumbering = Renumbering::compute(&forest(), 0.5, 0, 2.0);

        assert_eq!(renumbering.get(BasinId::first()), Some(1));
        assert_eq!(renumbering.get(BasinId::new(3).expect("id")), None);
        assert_eq!(renumbering.raw(2), BasinId::new(2));
        assert_eq!(renumbering.raw(0), None);
        assert_eq!(renumbering.raw(3), None);
    }
}
