use crate::error::{MatchError, NetworkError};
use crate::geo::{split, substring};
use crate::graph::{NodeId, Topology, Traversal, Weighting};
use crate::matcher::{IsochroneMatch, LinkSlice};
use crate::transition::Candidate;

use geo::LineString;
use log::debug;
use pathfinding::num_traits::Zero;
use pathfinding::prelude::dijkstra_reach;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::cmp::Ordering;
use std::ops::Add;
use strum::Display;

/// Metres walked, totally ordered so the walk can settle on it.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Distance(f64);

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Self) -> Self::Output {
        Distance(self.0 + rhs.0)
    }
}

impl Zero for Distance {
    fn zero() -> Self {
        Distance(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

/// Which way an expansion walks relative to the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    /// Against travel: where could the object have come from.
    Upstream,
    /// With travel: where could the object go.
    Downstream,
}

impl Direction {
    /// Adjacency followed from each settled node.
    #[inline]
    fn adjacency(self) -> petgraph::Direction {
        match self {
            Direction::Upstream => petgraph::Direction::Incoming,
            Direction::Downstream => petgraph::Direction::Outgoing,
        }
    }
}

/// The point an expansion starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
    pub traversal: Traversal,

    /// Position along the traversal, in the direction of travel.
    pub offset: f64,
}

impl From<&Candidate> for Origin {
    fn from(candidate: &Candidate) -> Self {
        Origin {
            traversal: candidate.traversal,
            offset: candidate.offset(),
        }
    }
}

/// Walks the network outward from an origin up to a distance budget.
pub struct IsochroneExpander<'a, N>
where
    N: Topology + ?Sized,
{
    network: &'a N,
    weighting: &'a dyn Weighting,
}

impl<'a, N> IsochroneExpander<'a, N>
where
    N: Topology + ?Sized,
{
    pub fn new(network: &'a N, weighting: &'a dyn Weighting) -> Self {
        Self { network, weighting }
    }

    /// Every edge slice within `max_distance` metres of `origin`.
    ///
    /// The origin's own edge is split at the origin. The part lying in
    /// the requested direction is reported first, its fractions measured
    /// against the split part rather than the whole edge. Should the walk
    /// come back round to the origin's traversal, the part it left behind
    /// is reported as well, in the whole edge's frame and ending at the
    /// origin. All other edges are reported whole, or truncated where the
    /// budget runs out, each flagged with the direction it was travelled in.
    pub fn expand(
        &self,
        origin: Origin,
        max_distance: f64,
        direction: Direction,
    ) -> Result<Vec<IsochroneMatch>, MatchError> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return Err(MatchError::invalid(format!(
                "max distance must be non-negative, got {max_distance}"
            )));
        }

        let traversal = origin.traversal;
        let edge = self.network.resolve(traversal.edge)?;
        let offset = origin.offset.clamp(0.0, 1.0);

        let geometry = edge.directed_geometry(traversal.reversed);
        let (before, after) = split(&geometry, offset);

        let (start, start_length, frontier) = match direction {
            Direction::Downstream => (
                after,
                (1.0 - offset) * edge.length,
                edge.destination(traversal.reversed),
            ),
            Direction::Upstream => (
                before,
                offset * edge.length,
                edge.origin(traversal.reversed),
            ),
        };

        let mut matches = Vec::new();
        if start_length > 0.0 {
            let covered = start_length.min(max_distance);
            matches.push(Self::slice(
                traversal,
                &start,
                covered / start_length,
                covered,
                direction,
            ));
        }

        if start_length >= max_distance {
            return Ok(matches);
        }

        // Left behind at the origin; reached only by coming round again.
        let remnant = match direction {
            Direction::Downstream => offset,
            Direction::Upstream => 1.0 - offset,
        } * edge.length;

        let adjacency = direction.adjacency();
        let mut emitted = FxHashSet::default();
        let failure: Cell<Option<NetworkError>> = Cell::new(None);

        let successors = |node: &NodeId| {
            let traversals = match self.network.traversals(*node, adjacency) {
                Ok(traversals) => traversals,
                Err(error) => {
                    failure.set(Some(error));
                    Vec::new()
                }
            };

            traversals
                .into_iter()
                .filter_map(|next| {
                    let edge = self.network.edge(next.edge)?;
                    self.weighting.cost(edge, next.reversed)?;

                    let far = match direction {
                        Direction::Downstream => edge.destination(next.reversed),
                        Direction::Upstream => edge.origin(next.reversed),
                    };

                    Some((far, Distance(edge.length)))
                })
                .collect::<Vec<_>>()
        };

        for item in dijkstra_reach(&frontier, successors) {
            let walked = start_length + item.total_cost.0;
            if walked >= max_distance {
                break;
            }

            // Successors are gathered as a node is settled, before it is yielded.
            if let Some(error) = failure.take() {
                return Err(error.into());
            }

            for next in self.network.traversals(item.node, adjacency)? {
                if !emitted.insert(next) {
                    continue;
                }

                let edge = self.network.resolve(next.edge)?;
                if self.weighting.cost(edge, next.reversed).is_none() {
                    continue;
                }

                let length = match next == traversal {
                    true if remnant <= 0.0 => continue,
                    true => remnant,
                    false => edge.length,
                };

                let covered = length.min(max_distance - walked);
                let ratio = match edge.length > 0.0 {
                    true => covered / edge.length,
                    false => 1.0,
                };

                let geometry = edge.directed_geometry(next.reversed);
                matches.push(Self::slice(
                    next,
                    &geometry,
                    ratio,
                    walked + covered,
                    direction,
                ));
            }
        }

        debug!(
            "Expanded {direction} {max_distance}m from {:?} onto {} slices",
            origin.traversal,
            matches.len()
        );

        Ok(matches)
    }

    /// The part of `geometry` nearest the walk's current node, covering
    /// `ratio` of it.
    ///
    /// Walking downstream that is the head of the geometry, walking
    /// upstream its tail.
    fn slice(
        traversal: Traversal,
        geometry: &LineString,
        ratio: f64,
        distance: f64,
        direction: Direction,
    ) -> IsochroneMatch {
        let ratio = ratio.clamp(0.0, 1.0);
        let (start_fraction, end_fraction) = match direction {
            Direction::Downstream => (0.0, ratio),
            Direction::Upstream => (1.0 - ratio, 1.0),
        };

        IsochroneMatch {
            slice: LinkSlice {
                traversal,
                start_fraction,
                end_fraction,
                geometry: substring(geometry, start_fraction, end_fraction),
            },
            distance,
        }
    }
}
