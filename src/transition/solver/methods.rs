use crate::error::MatchError;
use crate::graph::{Route, Traversal};
use crate::transition::*;

/// The most likely explanation of a [`Lattice`].
#[derive(Clone, Debug, PartialEq)]
pub struct Collapse {
    /// The chosen candidate of every layer.
    pub candidates: Vec<Candidate>,

    /// Emission probability of every chosen candidate.
    pub emissions: Vec<f64>,

    /// Dense, contiguous traversals from the first candidate to the last.
    pub traversals: Vec<Traversal>,

    /// Cumulative log-probability of the path.
    pub score: f64,

    /// Metres travelled from the first candidate to the last.
    pub distance: f64,
}

impl Collapse {
    /// Travel-frame offset of the first candidate on the first traversal.
    pub fn start_offset(&self) -> f64 {
        self.candidates.first().map_or(0.0, Candidate::offset)
    }

    /// Travel-frame offset of the last candidate on the last traversal.
    pub fn end_offset(&self) -> f64 {
        self.candidates.last().map_or(0.0, Candidate::offset)
    }
}

/// Defines a structure which can collapse a [`Lattice`] into a [`Collapse`].
pub trait Solver {
    /// Finds the most likely path through the lattice.
    ///
    /// It fails with [`MatchError::NoMatch`] when some observation has no
    /// candidate, or no transition reaches any of them. Network failures
    /// while computing transitions are passed on.
    fn solve<N, E, T>(
        &self,
        lattice: &Lattice,
        model: &mut TransitionCostModel<N>,
        heuristics: &CostingStrategies<E, T>,
    ) -> Result<Collapse, MatchError>
    where
        N: Route + ?Sized,
        E: EmissionStrategy,
        T: TransitionStrategy;
}
