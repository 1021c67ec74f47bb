use crate::error::MatchError;
use crate::graph::{Scan, Weighting};
use crate::transition::*;

use log::debug;
use measure_time::debug_time;

/// Generates the layers of the lattice.
///
/// Each layer holds the candidates found within `cutoff` metres of
/// one observation, scored by the emission strategy once, up front.
pub struct LayerGenerator<'a, N, E, T>
where
    N: Scan + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// The maximum distance, in metres, between an observation and its candidates.
    pub cutoff: f64,

    /// The costing heuristics required to generate the layers.
    pub heuristics: &'a CostingStrategies<E, T>,

    candidates: CandidateGenerator<'a, N>,
    weighting: &'a dyn Weighting,
}

impl<'a, N, E, T> LayerGenerator<'a, N, E, T>
where
    N: Scan + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(
        candidates: CandidateGenerator<'a, N>,
        heuristics: &'a CostingStrategies<E, T>,
        weighting: &'a dyn Weighting,
        cutoff: f64,
    ) -> Self {
        LayerGenerator {
            cutoff,
            heuristics,
            candidates,
            weighting,
        }
    }

    pub fn layer(&self, observation: &Observation) -> Result<Layer, MatchError> {
        let candidates = self.candidates.generate(
            &observation.position(),
            self.cutoff,
            observation.direction.as_ref(),
            self.weighting,
        )?;

        let emissions = candidates
            .iter()
            .map(|candidate| {
                self.heuristics
                    .emission(EmissionContext::new(candidate, observation))
            })
            .collect();

        Ok(Layer {
            observation: *observation,
            candidates,
            emissions,
        })
    }

    /// Builds the lattice for the whole sequence.
    pub fn with_observations(&self, observations: &[Observation]) -> Result<Lattice, MatchError> {
        debug_time!("Lattice generation");

        let lattice = observations
            .iter()
            .map(|observation| self.layer(observation))
            .collect::<Result<Lattice, _>>()?;

        debug!(
            "Generated {} layers with {} candidates",
            lattice.len(),
            lattice
                .layers
                .iter()
                .map(|layer| layer.candidates.len())
                .sum::<usize>()
        );

        Ok(lattice)
    }
}
