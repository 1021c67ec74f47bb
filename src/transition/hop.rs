use crate::error::{MatchError, NetworkError};
use crate::graph::{NodeId, Path, Route, Traversal, Weighting};
use crate::transition::Candidate;

use log::trace;
use rustc_hash::FxHashMap;

/// The network movement between two candidates.
#[derive(Clone, Debug, PartialEq)]
pub struct Hop {
    /// Metres travelled from the source candidate to the target candidate.
    pub distance: f64,

    /// Every traversal touched, starting with the source candidate's
    /// and ending with the target candidate's. A movement within one
    /// traversal holds just that traversal.
    pub traversals: Vec<Traversal>,
}

/// Computes [hops](Hop) between candidates of consecutive observations.
///
/// Shortest paths are memoised by node pair for the lifetime of the model,
/// which is a single matching invocation.
pub struct TransitionCostModel<'a, N>
where
    N: Route + ?Sized,
{
    network: &'a N,
    weighting: &'a dyn Weighting,

    /// Metres a target may sit behind its source on the same traversal
    /// and still count as standing still.
    reverse_tolerance: f64,

    cache: FxHashMap<(NodeId, NodeId), Option<Path>>,
}

impl<'a, N> TransitionCostModel<'a, N>
where
    N: Route + ?Sized,
{
    pub fn new(network: &'a N, weighting: &'a dyn Weighting, reverse_tolerance: f64) -> Self {
        Self {
            network,
            weighting,
            reverse_tolerance,
            cache: FxHashMap::default(),
        }
    }

    fn path(&mut self, from: NodeId, to: NodeId) -> Result<Option<Path>, MatchError> {
        if let Some(path) = self.cache.get(&(from, to)) {
            return Ok(path.clone());
        }

        let path = self.network.shortest_path(from, to, self.weighting)?;
        if let Some(found) = &path {
            if from != to && found.traversals.is_empty() {
                return Err(NetworkError::Inconsistent(format!(
                    "route {from} -> {to} was found but holds no edges"
                ))
                .into());
            }
        }

        self.cache.insert((from, to), path.clone());
        Ok(path)
    }

    /// The hop from `source` to `target`, or `None` when the network
    /// offers no way between them.
    ///
    /// Only the unused part of the source edge and the used part of the
    /// target edge are counted, so candidates a few metres apart on one
    /// edge are a few metres apart here too.
    pub fn cost(
        &mut self,
        source: &Candidate,
        target: &Candidate,
    ) -> Result<Option<Hop>, MatchError> {
        if source.traversal == target.traversal {
            let behind = (source.offset() - target.offset()) * source.length;

            if behind <= self.reverse_tolerance {
                return Ok(Some(Hop {
                    distance: (-behind).max(0.0),
                    traversals: vec![source.traversal],
                }));
            }
        }

        let Some(path) = self.path(source.destination, target.origin)? else {
            trace!(
                "No path between {:?} and {:?}",
                source.traversal, target.traversal
            );
            return Ok(None);
        };

        let mut traversals = Vec::with_capacity(path.traversals.len() + 2);
        traversals.push(source.traversal);
        traversals.extend(path.traversals);
        traversals.push(target.traversal);

        Ok(Some(Hop {
            distance: source.remaining() + path.distance + target.travelled(),
            traversals,
        }))
    }
}
