use crate::error::NetworkError;
use crate::graph::{Graph, NodeId, Path, Route, Traversal, Weighting};

use itertools::Itertools;
use log::debug;
use petgraph::graph::EdgeReference;
use petgraph::visit::EdgeFiltered;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Route for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self, weighting)))]
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        weighting: &dyn Weighting,
    ) -> Result<Option<Path>, NetworkError> {
        let (start, finish) = (self.node_index(from)?, self.node_index(to)?);
        if start == finish {
            return Ok(Some(Path::default()));
        }

        let cost = |traversal: &Traversal| {
            self.edges
                .get(&traversal.edge)
                .and_then(|edge| weighting.cost(edge, traversal.reversed))
        };

        let filtered = EdgeFiltered::from_fn(&self.graph, |edge: EdgeReference<'_, Traversal>| {
            cost(edge.weight()).is_some()
        });

        let Some((weight, nodes)) = petgraph::algo::astar(
            &filtered,
            start,
            |node| node == finish,
            |edge| cost(edge.weight()).unwrap_or(f64::INFINITY),
            |_| 0.0,
        ) else {
            debug!("No {} route {from} -> {to}", weighting.name());
            return Ok(None);
        };

        // The graph is a multigraph; pick the cheapest parallel traversal per hop.
        let traversals = nodes
            .iter()
            .tuple_windows()
            .map(|(a, b)| {
                self.graph
                    .edges_connecting(*a, *b)
                    .filter_map(|edge| cost(edge.weight()).map(|value| (value, *edge.weight())))
                    .min_by(|(a, _), (b, _)| a.total_cmp(b))
                    .map(|(_, traversal)| traversal)
                    .ok_or_else(|| {
                        NetworkError::Inconsistent(format!(
                            "route {from} -> {to} crosses nodes with no traversable edge"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let distance = traversals
            .iter()
            .filter_map(|traversal| self.edges.get(&traversal.edge))
            .map(|edge| edge.length)
            .sum();

        Ok(Some(Path {
            distance,
            weight,
            traversals,
        }))
    }
}
