use crate::geo::Projection;
use crate::graph::{Edge, NodeId, Traversal};

use geo::Point;

/// Deduplication key of a candidate.
///
/// Candidates travelling the same way out of the same nearest node
/// are interchangeable for routing purposes, so only the closest is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorKey {
    pub node: NodeId,
    pub reversed: bool,
}

/// A hypothesis that an observation lies on a directed edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub traversal: Traversal,

    /// Position along the edge in its canonical (stored) orientation, in `[0, 1]`.
    pub fraction: f64,

    /// Planar distance, in metres, between the observation and [`position`](#field.position).
    pub distance: f64,

    /// Bearing of travel along the edge at the projected point.
    pub bearing: f64,

    /// The observation projected onto the edge.
    pub position: Point,

    /// The edge endpoint nearest to the projected point.
    pub anchor: NodeId,

    /// Node where travel enters the edge.
    pub origin: NodeId,

    /// Node where travel leaves the edge.
    pub destination: NodeId,

    /// Length of the edge in metres.
    pub length: f64,
}

impl Candidate {
    pub fn new(edge: &Edge, projection: &Projection, reversed: bool) -> Self {
        let bearing = match reversed {
            false => projection.bearing,
            true => (projection.bearing + 180.0).rem_euclid(360.0),
        };

        let anchor = match projection.fraction <= 0.5 {
            true => edge.source,
            false => edge.target,
        };

        Candidate {
            traversal: Traversal {
                edge: edge.id,
                reversed,
            },
            fraction: projection.fraction,
            distance: projection.distance,
            bearing,
            position: projection.point,
            anchor,
            origin: edge.origin(reversed),
            destination: edge.destination(reversed),
            length: edge.length,
        }
    }

    #[inline]
    pub fn key(&self) -> AnchorKey {
        AnchorKey {
            node: self.anchor,
            reversed: self.traversal.reversed,
        }
    }

    /// Position along the edge in the direction of travel, in `[0, 1]`.
    #[inline]
    pub fn offset(&self) -> f64 {
        match self.traversal.reversed {
            false => self.fraction,
            true => 1.0 - self.fraction,
        }
    }

    /// Metres travelled on the edge before reaching the candidate.
    #[inline]
    pub fn travelled(&self) -> f64 {
        self.offset() * self.length
    }

    /// Metres left on the edge after the candidate.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (1.0 - self.offset()) * self.length
    }
}
