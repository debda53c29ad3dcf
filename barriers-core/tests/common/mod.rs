use std::collections::BTreeMap;

use barriers_core::{BarrierError, Landscape, LandscapeError, Record, StructureKey};

/// Explicit undirected graph of named configurations.
#[derive(Clone, Debug, Default)]
pub struct GraphLandscape {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl GraphLandscape {
    #[must_use]
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for &(left, right) in edges {
            adjacency.entry(left.to_owned()).or_default().push(right.to_owned());
            adjacency.entry(right.to_owned()).or_default().push(left.to_owned());
        }
        Self { adjacency }
    }
}

impl Landscape for GraphLandscape {
    fn name(&self) -> &str {
        "graph"
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        Ok(self.adjacency.get(configuration).cloned().unwrap_or_default())
    }
}

/// Bit strings of a fixed width whose neighbours differ by one flip.
#[derive(Clone, Copy, Debug)]
pub struct Hypercube {
    width: usize,
}

impl Hypercube {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Every vertex of the cube in counting order.
    #[must_use]
    pub fn vertices(&self) -> Vec<String> {
        (0..1_usize << self.width)
            .map(|bits| format!("{bits:0width$b}", width = self.width))
            .collect()
    }

    fn check(&self, configuration: &str) -> Result<(), LandscapeError> {
        let actual = configuration.chars().count();
        if actual != self.width {
            return Err(LandscapeError::LengthMismatch {
                expected: self.width,
                actual,
            });
        }
        match configuration
            .chars()
            .enumerate()
            .find(|&(_, symbol)| symbol != '0' && symbol != '1')
        {
            Some((position, symbol)) => Err(LandscapeError::InvalidSymbol { position, symbol }),
            None => Ok(()),
        }
    }
}

impl Landscape for Hypercube {
    fn name(&self) -> &str {
        "hypercube"
    }

    fn neighbors(&self, configuration: &str) -> Result<Vec<String>, LandscapeError> {
        self.check(configuration)?;
        Ok((0..self.width)
            .map(|flip| {
                configuration
                    .char_indices()
                    .map(|(i, bit)| match (i == flip, bit) {
                        (true, '0') => '1',
                        (true, _) => '0',
                        (false, bit) => bit,
                    })
                    .collect()
            })
            .collect())
    }

    fn pack(&self, configuration: &str) -> Result<StructureKey, LandscapeError> {
        self.check(configuration)?;
        Ok(StructureKey::from(configuration))
    }
}

/// Wraps `(configuration, energy)` pairs as an in-memory record stream.
#[must_use]
pub fn records(pairs: &[(&str, f64)]) -> Vec<Result<Record, BarrierError>> {
    pairs
        .iter()
        .map(|&(configuration, energy)| Ok(Record::new(configuration, energy)))
        .collect()
}

/// `a - s2 - b - s1 - c`: `c` merges into `b` at 1.0 and `b` into `a` at 2.0.
#[must_use]
pub fn staircase() -> (GraphLandscape, Vec<Result<Record, BarrierError>>) {
    (
        GraphLandscape::from_edges(&[("a", "s2"), ("s2", "b"), ("b", "s1"), ("s1", "c")]),
        records(&[("a", 0.0), ("b", 0.5), ("c", 0.8), ("s1", 1.0), ("s2", 2.0)]),
    )
}
