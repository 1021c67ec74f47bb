use crate::error::NetworkError;
use crate::graph::{Edge, EdgeId, Graph, NodeId, Traversal};

use petgraph::Direction;

/// Adjacency and edge lookups.
pub trait Topology {
    fn edge(&self, id: EdgeId) -> Option<&Edge>;

    /// Permitted traversals touching `node`.
    ///
    /// [`Direction::Outgoing`] yields traversals leaving the node,
    /// [`Direction::Incoming`] those arriving at it. Ordered by traversal.
    fn traversals(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Result<Vec<Traversal>, NetworkError>;

    /// Like [`Topology::edge`], failing on unknown ids.
    fn resolve(&self, id: EdgeId) -> Result<&Edge, NetworkError> {
        self.edge(id).ok_or(NetworkError::UnknownEdge(id))
    }
}

impl Topology for Graph {
    #[inline]
    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    fn traversals(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Result<Vec<Traversal>, NetworkError> {
        let index = self.node_index(node)?;

        let mut traversals = self
            .graph
            .edges_directed(index, direction)
            .map(|edge| *edge.weight())
            .collect::<Vec<_>>();

        traversals.sort();
        Ok(traversals)
    }
}
