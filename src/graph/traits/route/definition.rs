use crate::error::NetworkError;
use crate::graph::{NodeId, Traversal, Weighting};

/// A directed route through the network.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Sum of traversed edge lengths, in metres.
    pub distance: f64,
    /// Sum of traversal costs under the weighting used.
    pub weight: f64,
    /// Traversals in travel order. Empty when start and finish coincide.
    pub traversals: Vec<Traversal>,
}

pub trait Route {
    /// Finds the cheapest route between two nodes under `weighting`.
    ///
    /// `Ok(None)` means the nodes are not connected, which is an expected
    /// outcome rather than a failure.
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        weighting: &dyn Weighting,
    ) -> Result<Option<Path>, NetworkError>;
}
