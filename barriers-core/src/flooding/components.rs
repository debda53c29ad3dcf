//! Level-local connected components of equal-energy structures.
//!
//! A component collects the basins joined by saddles found at the current
//! energy level. Components are merged through a small union-find with path
//! compression and are drained, in canonical order, when the level closes.

use std::cmp::Ordering;

use crate::{forest::BasinId, index::EntryId};

/// A basin touched during the current level together with the structure that
/// reached it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Member {
    pub(crate) basin: BasinId,
    pub(crate) via: EntryId,
}

#[derive(Clone, Debug)]
struct Component {
    parent: usize,
    size: u64,
    saddle: EntryId,
    members: Vec<Member>,
}

/// Surviving component handed to the level finalizer.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelComponent {
    pub(crate) saddle: EntryId,
    pub(crate) size: u64,
    pub(crate) members: Vec<Member>,
}

impl LevelComponent {
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.members
            .iter()
            .map(|member| member.basin)
            .cmp(other.members.iter().map(|member| member.basin))
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct LevelComponentTracker {
    level: u64,
    components: Vec<Component>,
}

impl LevelComponentTracker {
    pub(crate) fn level(&self) -> u64 {
        self.level
    }

    pub(crate) fn next_id(&self) -> usize {
        self.components.len()
    }

    /// Opens a component whose representative saddle is `saddle`.
    pub(crate) fn open(&mut self, saddle: EntryId) -> usize {
        let id = self.components.len();
        self.components.push(Component {
            parent: id,
            size: 0,
            saddle,
            members: Vec::new(),
        });
        id
    }

    pub(crate) fn find(&mut self, mut component: usize) -> usize {
        let mut root = component;
        while self.components[root].parent != root {
            root = self.components[root].parent;
        }

        while self.components[component].parent != component {
            let parent = self.components[component].parent;
            self.components[component].parent = root;
            component = parent;
        }

        root
    }

    /// Joins two components. The strictly larger one survives; ties keep the
    /// earlier id.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> usize {
        let left = self.find(left);
        let right = self.find(right);
        if left == right {
            return left;
        }
        let (winner, loser) = match self.components[left]
            .size
            .cmp(&self.components[right].size)
        {
            Ordering::Greater => (left, right),
            Ordering::Less => (right, left),
            Ordering::Equal => (left.min(right), left.max(right)),
        };
        let members = std::mem::take(&mut self.components[loser].members);
        let size = self.components[loser].size;
        self.components[loser].parent = winner;
        let survivor = &mut self.components[winner];
        survivor.size += size;
        merge_members(&mut survivor.members, members);
        winner
    }

    /// Counts one more non-minimum structure in `component`.
    pub(crate) fn grow(&mut self, component: usize) {
        let root = self.find(component);
        self.components[root].size += 1;
    }

    pub(crate) fn absorb(&mut self, component: usize, touched: Vec<Member>) {
        let root = self.find(component);
        merge_members(&mut self.components[root].members, touched);
    }

    /// Closes the level: returns surviving components sorted by their member
    /// basin sequences and starts a fresh level.
    pub(crate) fn drain(&mut self) -> Vec<LevelComponent> {
        let mut survivors: Vec<LevelComponent> = self
            .components
            .drain(..)
            .enumerate()
            .filter(|(id, component)| component.parent == *id)
            .map(|(_, component)| LevelComponent {
                saddle: component.saddle,
                size: component.size,
                members: component.members,
            })
            .collect();
        survivors.sort_by(LevelComponent::canonical_cmp);
        self.level += 1;
        survivors
    }
}

/// Merges `incoming` into `members`, keeping the set sorted by basin id and
/// the first structure recorded for each basin.
fn merge_members(members: &mut Vec<Member>, incoming: Vec<Member>) {
    members.extend(incoming);
    members.sort_by_key(|member| member.basin);
    members.dedup_by_key(|member| member.basin);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn member(basin: usize, via: usize) -> Member {
        Member {
            basin: BasinId::new(basin).expect("non-zero"),
            via: EntryId::new(via),
        }
    }

    #[test]
    fn union_keeps_strictly_larger_component() {
        let mut tracker = LevelComponentTracker::default();
        let small = tracker.open(EntryId::new(0));
        let large = tracker.open(EntryId::new(1));
        tracker.grow(large);

        assert_eq!(tracker.union(small, large), large);
        assert_eq!(tracker.find(small), large);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    fn union_ties_keep_earlier_component(#[case] left: usize, #[case] right: usize) {
        let mut tracker = LevelComponentTracker::default();
        tracker.open(EntryId::new(0));
        tracker.open(EntryId::new(1));

        assert_eq!(tracker.union(left, right), 0);
    }

    #[test]
    fn find_compresses_paths() {
        let mut tracker = LevelComponentTracker::default();
        for raw in 0..4 {
            tracker.open(EntryId::new(raw));
        }
        tracker.union(2, 3);
        tracker.union(1, 2);
        tracker.union(0, 1);

        assert_eq!(tracker.find(3), 0);
        assert_eq!(tracker.components[3].parent, 0);
    }

    #[test]
    fn absorb_sorts_and_keeps_first_structure_per_basin() {
        let mut tracker = LevelComponentTracker::default();
        let id = tracker.open(EntryId::new(9));
        tracker.absorb(id, vec![member(3, 1), member(1, 2)]);
        tracker.absorb(id, vec![member(3, 7), member(2, 4)]);

        let drained = tracker.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(
            drained[0].members,
            vec![member(1, 2), member(2, 4), member(3, 1)]
        );
    }

    #[test]
    fn drain_returns_survivors_in_canonical_order() {
        let mut tracker = LevelComponentTracker::default();
        let first = tracker.open(EntryId::new(0));
        let second = tracker.open(EntryId::new(1));
        let third = tracker.open(EntryId::new(2));
        tracker.absorb(first, vec![member(4, 0)]);
        tracker.absorb(second, vec![member(2, 1), member(5, 1)]);
        tracker.absorb(third, vec![member(2, 2)]);
        tracker.grow(third);
        tracker.union(first, third);

        let level = tracker.level();
        let drained = tracker.drain();

        assert_eq!(tracker.level(), level + 1);
        assert_eq!(tracker.next_id(), 0);
        let sequences: Vec<Vec<usize>> = drained
            .iter()
            .map(|component| component.members.iter().map(|m| m.basin.get()).collect())
            .collect();
        assert_eq!(sequences, vec![vec![2, 4], vec![2, 5]]);
        assert_eq!(drained[0].size, 1);
        assert_eq!(drained[0].saddle, EntryId::new(2));
    }
}
