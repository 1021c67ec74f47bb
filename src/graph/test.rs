use crate::error::NetworkError;
use crate::graph::util::{HORIZONTAL, grid};
use crate::graph::*;

use approx::assert_relative_eq;
use geo::wkt;

#[test_log::test]
fn builds_fixture_grid() {
    let graph = grid();

    assert_eq!(graph.size(), 18);
    assert_eq!(graph.edge_count(), 25);

    let edge = graph.edge(1000).expect("edge exists");
    assert_eq!((edge.source, edge.target), (0, 1));
    assert_relative_eq!(edge.length, HORIZONTAL, epsilon = 1e-6);

    let oneway = graph.edge(1010).expect("edge exists");
    assert_eq!(oneway.access, Access::FORWARD);
    assert_eq!(oneway.traversals().as_slice(), &[Traversal::forward(1010)]);
}

#[test_log::test]
fn rejects_duplicate_edges() {
    let result = GraphBuilder::default()
        .edge(1, 1, 2, wkt! { LINESTRING(4.890 52.370, 4.891 52.370) }, Access::BOTH)
        .edge(1, 2, 3, wkt! { LINESTRING(4.891 52.370, 4.892 52.370) }, Access::BOTH)
        .build();

    assert_eq!(result.err(), Some(NetworkError::DuplicateEdge(1)));
}

#[test_log::test]
fn rejects_degenerate_edges() {
    let result = GraphBuilder::default()
        .edge(7, 1, 2, wkt! { LINESTRING(4.890 52.370) }, Access::BOTH)
        .build();

    assert!(matches!(result, Err(NetworkError::InvalidEdge { id: 7, .. })));
}

#[test_log::test]
fn orients_traversals() {
    let graph = grid();
    let edge = graph.resolve(2001).expect("edge exists");

    assert_eq!(edge.origin(false), 1);
    assert_eq!(edge.destination(false), 11);
    assert_eq!(edge.origin(true), 11);
    assert_eq!(edge.destination(true), 1);

    let reversed = edge.directed_geometry(true);
    assert_eq!(reversed.0.first(), edge.geometry.0.last());
    assert_eq!(reversed.0.last(), edge.geometry.0.first());
}

#[test_log::test]
fn lists_adjacent_traversals() -> Result<(), NetworkError> {
    let graph = grid();

    assert_eq!(
        graph.traversals(1, petgraph::Direction::Outgoing)?,
        vec![
            Traversal::backward(1000),
            Traversal::forward(1001),
            Traversal::forward(2001)
        ]
    );

    // The one-way edge 1010 only ever leaves node 10.
    assert_eq!(
        graph.traversals(10, petgraph::Direction::Outgoing)?,
        vec![
            Traversal::forward(1010),
            Traversal::backward(2000),
            Traversal::forward(2010)
        ]
    );

    assert_eq!(
        graph.traversals(11, petgraph::Direction::Incoming)?,
        vec![
            Traversal::forward(1010),
            Traversal::backward(1011),
            Traversal::forward(2001),
            Traversal::backward(2011)
        ]
    );

    assert_eq!(
        graph.traversals(404, petgraph::Direction::Incoming),
        Err(NetworkError::UnknownNode(404))
    );

    Ok(())
}
