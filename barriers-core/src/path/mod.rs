//! Steepest-descent paths between two basins through the saddle forest.
//!
//! The reconstructor climbs father links from both basins to the highest
//! saddle separating them, then walks `down` links from the structures on
//! either side of that saddle. When a walk settles in a basin other than the
//! one expected, the search recurses between the basin reached and the
//! intended target. Steps carry a branch tag and a signed step counter;
//! sorting by both yields the path in presentation order.

use std::cmp::Ordering;

use crate::{
    Result,
    error::BarrierError,
    forest::{Basin, BasinForest, BasinId, Saddle},
    index::{EntryId, IndexEntry, StructureIndex},
};

/// Role of a structure on a reconstructed path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathMark {
    /// A local minimum, with its forest basin id.
    Minimum(BasinId),
    /// The saddle connecting two branches.
    Saddle,
    /// Any other structure on a descent.
    Intermediate,
}

/// One structure visited on a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    entry: EntryId,
    tag: String,
    step: i64,
    mark: PathMark,
}

impl PathStep {
    /// Index entry of the visited structure.
    #[must_use]
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    /// Branch tag; `M` suffixes mark saddles.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Signed position along the branch.
    #[must_use]
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Role of the structure.
    #[must_use]
    pub fn mark(&self) -> PathMark {
        self.mark
    }

    fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.tag
            .cmp(&other.tag)
            .then_with(|| self.step.cmp(&other.step))
    }
}

pub(crate) struct PathReconstructor<'a, I> {
    forest: &'a BasinForest,
    index: &'a I,
    steps: Vec<PathStep>,
    active: Vec<(BasinId, BasinId)>,
}

impl<'a, I: StructureIndex> PathReconstructor<'a, I> {
    pub(crate) fn new(forest: &'a BasinForest, index: &'a I) -> Self {
        Self {
            forest,
            index,
            steps: Vec::new(),
            active: Vec::new(),
        }
    }

    pub(crate) fn reconstruct(mut self, from: BasinId, to: BasinId) -> Result<Vec<PathStep>> {
        if from == to {
            let minimum = self.basin(from)?.minimum();
            self.push(minimum, String::from("M"), 0)?;
        } else {
            self.backtrack(from, to, "")?;
        }
        self.steps.sort_by(PathStep::presentation_cmp);
        Ok(self.steps)
    }

    fn backtrack(&mut self, from: BasinId, to: BasinId, tag: &str) -> Result<()> {
        let (low, high, direction) = if from > to {
            (to, from, -1)
        } else {
            (from, to, 1)
        };
        if self.active.contains(&(low, high)) {
            return Err(BarrierError::InconsistentForest {
                invariant: "path search re-enters a basin pair it is still resolving",
            });
        }
        self.active.push((low, high));
        let outcome = self.descend_from_saddle(low, high, direction, tag);
        self.active.pop();
        outcome
    }

    fn descend_from_saddle(
        &mut self,
        low: BasinId,
        high: BasinId,
        direction: i64,
        tag: &str,
    ) -> Result<()> {
        let (saddle, toward_high) = self.connecting_saddle(low, high)?;
        self.push(saddle.entry(), format!("{tag}M"), 0)?;

        let (high_side, low_side) = if toward_high {
            (saddle.left(), saddle.right())
        } else {
            (saddle.right(), saddle.left())
        };
        self.walk_limb(high_side, high, -direction, tag, saddle.entry())?;
        self.walk_limb(low_side, low, direction, tag, saddle.entry())
    }

    /// Climbs from `high` towards `low`, returning the highest saddle between
    /// them and whether its left side faces `high`.
    fn connecting_saddle(&self, low: BasinId, high: BasinId) -> Result<(Saddle, bool)> {
        let mut child = high;
        let mut father = low;
        let mut highest = child;
        let mut toward_high = true;
        let mut swapped = false;

        loop {
            let up = self.basin(child)?.father();
            if up == Some(father) {
                break;
            }
            child = up.ok_or(BarrierError::NoSaddle {
                left: high.get(),
                right: low.get(),
            })?;
            if child < father {
                std::mem::swap(&mut child, &mut father);
                swapped = !swapped;
            }
            if self.saddle_height(child)? > self.saddle_height(highest)? {
                highest = child;
                toward_high = !swapped;
            }
        }

        let saddle = self
            .basin(highest)?
            .saddle()
            .copied()
            .ok_or(BarrierError::InconsistentForest {
                invariant: "a merged basin records its saddle",
            })?;
        Ok((saddle, toward_high))
    }

    fn walk_limb(
        &mut self,
        start: EntryId,
        target: BasinId,
        increment: i64,
        tag: &str,
        saddle: EntryId,
    ) -> Result<()> {
        let limb = if increment > 0 {
            format!("{tag}R")
        } else {
            format!("{tag}LZ")
        };
        let mut current = start;
        let mut step = 0_i64;
        let mut hops = 0_usize;

        while let Some(down) = self.entry(current)?.down() {
            if current != saddle {
                self.push(current, limb.clone(), step)?;
            }
            current = down;
            step += increment;
            hops += 1;
            if hops > self.index.len() {
                return Err(BarrierError::InconsistentForest {
                    invariant: "descent chains terminate at a minimum",
                });
            }
        }

        let reached = self.entry(current)?.basin();
        if reached == target {
            if current != saddle {
                self.push(current, limb, step)?;
            }
            return Ok(());
        }
        if increment < 0 {
            self.backtrack(reached, target, &format!("{tag}L"))
        } else {
            self.backtrack(target, reached, &limb)
        }
    }

    fn push(&mut self, entry: EntryId, tag: String, step: i64) -> Result<()> {
        let indexed = self.entry(entry)?;
        let mark = if indexed.is_minimum() {
            PathMark::Minimum(indexed.basin())
        } else if tag.ends_with('M') {
            PathMark::Saddle
        } else {
            PathMark::Intermediate
        };
        self.steps.push(PathStep {
            entry,
            tag,
            step,
            mark,
        });
        Ok(())
    }

    fn saddle_height(&self, basin: BasinId) -> Result<f64> {
        Ok(self
            .basin(basin)?
            .saddle()
            .map_or(f64::INFINITY, Saddle::energy))
    }

    fn basin(&self, basin: BasinId) -> Result<&'a Basin> {
        self.forest.get(basin).ok_or(BarrierError::UnknownBasin {
            basin: basin.get(),
            bound: self.forest.len(),
        })
    }

    fn entry(&self, entry: EntryId) -> Result<&'a IndexEntry> {
        self.index.get(entry).ok_or(BarrierError::InconsistentForest {
            invariant: "forest links point at indexed structures",
        })
    }
}
