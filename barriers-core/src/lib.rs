//! Barrier-tree construction over sorted discrete energy landscapes.
//!
//! A stream of `(configuration, energy)` records sorted by energy is flooded
//! through a [`Landscape`]: every record either founds a new local minimum or
//! joins the basins of its already-seen neighbours, and basins that become
//! connected at an energy level merge into the deepest one. The resulting
//! [`BarrierTree`] supports significance renumbering and steepest-descent path
//! reconstruction between basins.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod barriers;
mod builder;
mod error;
mod flooding;
mod forest;
mod index;
mod landscape;
mod path;
mod record;
mod result;
mod significance;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    barriers::Barriers,
    builder::BarrierBuilder,
    error::{BarrierError, BarrierErrorCode, LandscapeError, LandscapeErrorCode, Result},
    forest::{Basin, BasinForest, BasinId, Saddle},
    index::{DuplicateKey, EntryId, HashStructureIndex, IndexEntry, StructureIndex},
    landscape::{Landscape, StructureKey},
    path::{PathMark, PathStep},
    record::{Record, RecordReader},
    result::{BarrierTree, RunSummary},
    significance::Renumbering,
};
