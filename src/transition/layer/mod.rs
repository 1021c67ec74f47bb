#[doc(hidden)]
mod generator;

#[doc(inline)]
pub use generator::*;

use crate::transition::{Candidate, Observation};

/// The candidates of a single observation.
#[derive(Clone, Debug)]
pub struct Layer {
    pub observation: Observation,
    pub candidates: Vec<Candidate>,

    /// Emission probability of each candidate, by index.
    pub emissions: Vec<f64>,
}

impl Layer {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// One [`Layer`] per observation, in sequence order.
#[derive(Clone, Debug, Default)]
pub struct Lattice {
    pub layers: Vec<Layer>,
}

impl Lattice {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn first(&self) -> Option<&Layer> {
        self.layers.first()
    }

    pub fn last(&self) -> Option<&Layer> {
        self.layers.last()
    }
}

impl FromIterator<Layer> for Lattice {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Lattice {
            layers: iter.into_iter().collect(),
        }
    }
}
