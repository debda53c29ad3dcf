//! Flooding runs over the packed move-set landscapes.

use barriers_core::{BarrierBuilder, BasinId, Landscape, Record};
use barriers_providers_moves::Graph;

fn stream<'a>(pairs: &'a [(&'a str, f64)]) -> impl Iterator<Item = barriers_core::Result<Record>> + 'a {
    pairs
        .iter()
        .map(|&(configuration, energy)| Ok(Record::new(configuration, energy)))
}

#[test]
fn two_spin_cube_merges_through_the_mixed_state() {
    let graph = Graph::parse("Q2", "", "++").expect("Q2 is supported");
    let tree = BarrierBuilder::new()
        .build()
        .and_then(|barriers| {
            barriers.run(
                &graph,
                stream(&[("++", 0.0), ("--", 0.5), ("+-", 1.0), ("-+", 2.0)]),
            )
        })
        .expect("flooding succeeds");

    assert_eq!(tree.forest().len(), 2);
    assert_eq!(tree.saddle_count(), 1);
    let second = tree
        .forest()
        .get(BasinId::new(2).expect("non-zero id"))
        .expect("basin 2 exists");
    assert_eq!(second.father(), Some(BasinId::first()));

    let saddle = second.saddle().expect("basin 2 merged");
    let entry = tree.structure(saddle.entry()).expect("saddle is indexed");
    assert_eq!(graph.unpack(entry.key()).expect("key decodes"), "+-");
}

#[test]
fn rna_stack_openings_drain_into_the_hairpin() {
    let graph = Graph::parse("RNA", "", "GGGAAACCC").expect("RNA is supported");
    let tree = BarrierBuilder::new()
        .build()
        .and_then(|barriers| {
            barriers.run(
                &graph,
                stream(&[
                    ("(((...)))", -1.2),
                    (".((...)).", -0.4),
                    ("((.....))", -0.3),
                ]),
            )
        })
        .expect("flooding succeeds");

    assert_eq!(tree.forest().len(), 1);
    assert_eq!(tree.records_read(), 3);
    let ground = tree.forest().get(BasinId::first()).expect("ground basin");
    assert_eq!(ground.pool(), 3);
    let minimum = tree.structure(ground.minimum()).expect("minimum is indexed");
    assert_eq!(graph.unpack(minimum.key()).expect("key decodes"), "(((...)))");
}
