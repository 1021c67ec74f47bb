use crate::error::NetworkError;
use crate::geo::length;
use crate::graph::edge::EdgeEnvelope;
use crate::graph::item::GraphStructure;
use crate::graph::{Access, Edge, EdgeId, Graph, NodeId};

use geo::LineString;
use log::{debug, info};
use measure_time::debug_time;
use rstar::RTree;
use rustc_hash::{FxHashMap, FxHashSet};

/// Collects edges and assembles them into a [`Graph`].
///
/// ```rust
/// use roadmatch::graph::{Access, GraphBuilder};
/// use geo::wkt;
///
/// let graph = GraphBuilder::default()
///     .edge(1, 10, 11, wkt! { LINESTRING(4.890 52.370, 4.891 52.370) }, Access::BOTH)
///     .build()
///     .expect("valid network");
///
/// assert_eq!(graph.size(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    edges: Vec<(EdgeId, NodeId, NodeId, LineString, Access)>,
}

impl GraphBuilder {
    pub fn edge(
        mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        geometry: LineString,
        access: Access,
    ) -> Self {
        self.insert(id, source, target, geometry, access);
        self
    }

    pub fn insert(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        geometry: LineString,
        access: Access,
    ) -> &mut Self {
        self.edges.push((id, source, target, geometry, access));
        self
    }

    /// Validates the collected edges and indexes them.
    ///
    /// Every edge must carry at least two coordinates and a unique id.
    pub fn build(self) -> Result<Graph, NetworkError> {
        debug_time!("Graph assembly");
        info!("Ingesting {} edges...", self.edges.len());

        let mut seen = FxHashSet::default();
        let mut sorted = self.edges;
        sorted.sort_by_key(|(id, ..)| *id);

        let mut graph = GraphStructure::default();
        let mut nodes = FxHashMap::default();
        let mut edges = FxHashMap::default();

        for (id, source, target, geometry, access) in sorted {
            if !seen.insert(id) {
                return Err(NetworkError::DuplicateEdge(id));
            }

            if geometry.0.len() < 2 {
                return Err(NetworkError::InvalidEdge {
                    id,
                    reason: format!("{} coordinates given, two required", geometry.0.len()),
                });
            }

            let mut index_of =
                |node: NodeId| *nodes.entry(node).or_insert_with(|| graph.add_node(node));
            let (a, b) = (index_of(source), index_of(target));

            let edge = Edge {
                id,
                source,
                target,
                length: length(&geometry),
                geometry,
                access,
            };

            for traversal in edge.traversals() {
                match traversal.reversed {
                    false => graph.add_edge(a, b, traversal),
                    true => graph.add_edge(b, a, traversal),
                };
            }

            edges.insert(id, edge);
        }

        let index = RTree::bulk_load(
            edges
                .values()
                .map(|edge| EdgeEnvelope {
                    id: edge.id,
                    bounds: edge.bounds(),
                })
                .collect(),
        );

        debug!("Indexed {} edge envelopes", index.size());
        info!(
            "Finished. Ingested {} nodes and {} edges ({} traversals)",
            nodes.len(),
            edges.len(),
            graph.edge_count()
        );

        Ok(Graph {
            graph,
            nodes,
            edges,
            index,
        })
    }
}
