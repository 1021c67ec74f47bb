use crate::error::NetworkError;
use crate::graph::edge::EdgeEnvelope;
use crate::graph::{Edge, EdgeId, NodeId, Traversal};

use petgraph::graph::{DiGraph, NodeIndex};
use rstar::RTree;
use rustc_hash::FxHashMap;

use std::fmt::{Debug, Formatter};

/// Each permitted traversal of an edge is one directed graph edge.
pub type GraphStructure = DiGraph<NodeId, Traversal>;

/// In-memory routing network.
///
/// Built with a [`GraphBuilder`](crate::graph::GraphBuilder), read-only
/// afterwards, and therefore safe to share across matching threads.
pub struct Graph {
    pub(crate) graph: GraphStructure,
    pub(crate) nodes: FxHashMap<NodeId, NodeIndex>,
    pub(crate) edges: FxHashMap<EdgeId, Edge>,

    pub(crate) index: RTree<EdgeEnvelope>,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph with Nodes: {}, Edges: {}",
            self.nodes.len(),
            self.edges.len()
        )
    }
}

impl Graph {
    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Number of (undirected) edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    #[inline]
    pub(crate) fn node_index(&self, node: NodeId) -> Result<NodeIndex, NetworkError> {
        self.nodes
            .get(&node)
            .copied()
            .ok_or(NetworkError::UnknownNode(node))
    }
}
