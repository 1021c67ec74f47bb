use crate::geo::reversed as reverse_line;
use crate::graph::{EdgeId, NodeId};

use geo::LineString;
use rstar::{AABB, RTreeObject};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Per-direction travel permission of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Access {
    /// Travel from source to target is permitted.
    pub forward: bool,
    /// Travel from target to source is permitted.
    pub backward: bool,
}

impl Access {
    pub const BOTH: Access = Access {
        forward: true,
        backward: true,
    };

    pub const FORWARD: Access = Access {
        forward: true,
        backward: false,
    };

    pub const BACKWARD: Access = Access {
        forward: false,
        backward: true,
    };

    #[inline]
    pub const fn permits(&self, reversed: bool) -> bool {
        match reversed {
            false => self.forward,
            true => self.backward,
        }
    }
}

/// An edge travelled in one direction.
///
/// A forward traversal runs from the edge's source to its target,
/// a reversed one from target to source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Traversal {
    pub edge: EdgeId,
    pub reversed: bool,
}

impl Traversal {
    #[inline]
    pub const fn forward(edge: EdgeId) -> Self {
        Traversal {
            edge,
            reversed: false,
        }
    }

    #[inline]
    pub const fn backward(edge: EdgeId) -> Self {
        Traversal {
            edge,
            reversed: true,
        }
    }

    /// The same edge travelled the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        Traversal {
            edge: self.edge,
            reversed: !self.reversed,
        }
    }
}

/// A network edge with its canonical (stored) orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub geometry: LineString,
    /// Length of the geometry in metres.
    pub length: f64,
    pub access: Access,
}

impl Edge {
    /// Node where travel enters the edge.
    #[inline]
    pub const fn origin(&self, reversed: bool) -> NodeId {
        match reversed {
            false => self.source,
            true => self.target,
        }
    }

    /// Node where travel leaves the edge.
    #[inline]
    pub const fn destination(&self, reversed: bool) -> NodeId {
        match reversed {
            false => self.target,
            true => self.source,
        }
    }

    /// Geometry in the order it is travelled.
    pub fn directed_geometry(&self, reversed: bool) -> Cow<'_, LineString> {
        match reversed {
            false => Cow::Borrowed(&self.geometry),
            true => Cow::Owned(reverse_line(&self.geometry)),
        }
    }

    /// Every traversal the edge permits.
    pub fn traversals(&self) -> SmallVec<[Traversal; 2]> {
        [false, true]
            .into_iter()
            .filter(|reversed| self.access.permits(*reversed))
            .map(|reversed| Traversal {
                edge: self.id,
                reversed,
            })
            .collect()
    }

    pub(crate) fn bounds(&self) -> AABB<[f64; 2]> {
        let points = self
            .geometry
            .coords()
            .map(|coord| [coord.x, coord.y])
            .collect::<Vec<_>>();

        AABB::from_points(&points)
    }
}

/// Spatial index entry for an edge.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeEnvelope {
    pub id: EdgeId,
    pub bounds: AABB<[f64; 2]>,
}

impl RTreeObject for EdgeEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}
