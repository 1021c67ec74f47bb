use crate::transition::{Candidate, Strategy};

pub trait TransitionStrategy: for<'a> Strategy<TransitionContext<'a>> {}
impl<T> TransitionStrategy for T where T: for<'a> Strategy<TransitionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// The candidate the transition leaves.
    pub source: &'a Candidate,

    /// The candidate the transition arrives at.
    pub target: &'a Candidate,

    /// Metres travelled on the network between both candidates.
    pub route_distance: f64,

    /// Metres between the two observations, as the crow flies.
    pub straight_distance: f64,
}

impl<'a> TransitionContext<'a> {
    pub fn new(
        source: &'a Candidate,
        target: &'a Candidate,
        route_distance: f64,
        straight_distance: f64,
    ) -> Self {
        Self {
            source,
            target,
            route_distance,
            straight_distance,
        }
    }

    /// How much longer, or shorter, the route is than the straight line.
    #[inline]
    pub fn deviance(&self) -> f64 {
        (self.route_distance - self.straight_distance).abs()
    }
}
