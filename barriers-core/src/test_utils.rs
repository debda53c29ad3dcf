//! Shared test utilities for `barriers-core`.

use std::collections::BTreeMap;

use barriers_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    BarrierBuilder, BarrierTree, Result, error::LandscapeError, landscape::Landscape,
    record::Record,
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `BARRIERS_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`Landscape`] over an explicit undirected graph of named configurations.
///
/// Neighbours are returned in the order their edges were added.
#[derive(Clone, Debug, Default)]
pub(crate) struct GraphLandscape {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl GraphLandscape {
    pub(crate) fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for &(left, right) in edges {
            adjacency
                .entry(left.to_owned())
                .or_default()
                .push(right.to_owned());
            adjacency
                .entry(right.to_owned())
                .or_default()
                .push(left.to_owned());
        }
        Self { adjacency }
    }
}

impl Landscape for GraphLandscape {
    fn name(&self) -> &str {
        "graph"
    }

    fn neighbors(&self, configuration: &str) -> core::result::Result<Vec<String>, LandscapeError> {
        Ok(self
            .adjacency
            .get(configuration)
            .cloned()
            .unwrap_or_default())
    }
}

/// Wraps `(configuration, energy)` pairs as an in-memory record stream.
pub(crate) fn records(pairs: &[(&str, f64)]) -> Vec<Result<Record>> {
    pairs
        .iter()
        .map(|&(configuration, energy)| Ok(Record::new(configuration, energy)))
        .collect()
}

/// Runs the default configuration over `pairs` on `landscape`.
pub(crate) fn flood(landscape: &GraphLandscape, pairs: &[(&str, f64)]) -> BarrierTree {
    BarrierBuilder::new()
        .build()
        .and_then(|barriers| barriers.run(landscape, records(pairs)))
        .expect("flooding succeeds")
}
