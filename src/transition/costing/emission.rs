use crate::transition::{Candidate, Observation, Strategy};

pub trait EmissionStrategy: for<'a> Strategy<EmissionContext<'a>> {}
impl<T> EmissionStrategy for T where T: for<'a> Strategy<EmissionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct EmissionContext<'a> {
    /// The proposed (candidate) position to be matched onto.
    ///
    /// This belongs to the network, and is not provided
    /// as input to the match query.
    pub candidate: &'a Candidate,

    /// The observation the costing method is matching.
    pub observation: &'a Observation,
}

impl<'a> EmissionContext<'a> {
    pub fn new(candidate: &'a Candidate, observation: &'a Observation) -> Self {
        Self {
            candidate,
            observation,
        }
    }
}
