//! Travel-profile weightings.
//!
//! A weighting decides whether, and at what cost, an edge may be travelled
//! in a given direction. They are handed to each routing call rather than
//! stored on the network, so concurrent matches never share mutable state.

use crate::graph::Edge;
use std::fmt::{Debug, Formatter};

pub trait Weighting: Send + Sync {
    /// The cost of travelling `edge` in the given direction,
    /// or `None` if it may not be travelled that way.
    fn cost(&self, edge: &Edge, reversed: bool) -> Option<f64>;

    /// A human-readable profile name, used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<W: Weighting + ?Sized> Weighting for &W {
    fn cost(&self, edge: &Edge, reversed: bool) -> Option<f64> {
        (**self).cost(edge, reversed)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Costs every permitted traversal by its length.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestWeighting;

impl Weighting for ShortestWeighting {
    #[inline]
    fn cost(&self, edge: &Edge, reversed: bool) -> Option<f64> {
        edge.access.permits(reversed).then_some(edge.length)
    }

    fn name(&self) -> &str {
        "shortest"
    }
}

/// Wraps another weighting and blocks every traversal the predicate rejects.
///
/// ```rust
/// use roadmatch::graph::{RestrictedWeighting, ShortestWeighting};
///
/// // Never enter edge 42.
/// let weighting = RestrictedWeighting::new(ShortestWeighting, |edge, _| edge.id != 42);
/// ```
pub struct RestrictedWeighting<W, F> {
    inner: W,
    allowed: F,
}

impl<W, F> RestrictedWeighting<W, F>
where
    W: Weighting,
    F: Fn(&Edge, bool) -> bool + Send + Sync,
{
    pub fn new(inner: W, allowed: F) -> Self {
        Self { inner, allowed }
    }
}

impl<W, F> Weighting for RestrictedWeighting<W, F>
where
    W: Weighting,
    F: Fn(&Edge, bool) -> bool + Send + Sync,
{
    fn cost(&self, edge: &Edge, reversed: bool) -> Option<f64> {
        match (self.allowed)(edge, reversed) {
            true => self.inner.cost(edge, reversed),
            false => None,
        }
    }

    fn name(&self) -> &str {
        "restricted"
    }
}

impl<W: Debug, F> Debug for RestrictedWeighting<W, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RestrictedWeighting({:?})", self.inner)
    }
}
