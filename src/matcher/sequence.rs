use crate::error::MatchError;
use crate::graph::{Network, Weighting};
use crate::matcher::links::assemble;
use crate::matcher::{Match, Matcher, conclude, config::non_negative};
use crate::transition::*;

use geo::LineString;
use log::debug;
use measure_time::debug_time;
use wkt::ToWkt;

#[cfg(feature = "tracing")]
use tracing::Level;

impl<N, E, T> Matcher<'_, N, E, T>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Matches a sequence of observations onto the network.
    ///
    /// Every observation is explained by exactly one candidate, and the
    /// candidates are joined by shortest paths into one contiguous run of
    /// links. Reliability is the mean emission probability of the chosen
    /// candidates.
    ///
    /// Only an out-of-range `cutoff` or an empty sequence is an error.
    /// Every other failure is reported through the [`Match`] status.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all, err(level = Level::INFO)))]
    pub fn match_sequence(
        &self,
        observations: &[Observation],
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Match, MatchError> {
        non_negative("cutoff", cutoff)?;
        if observations.is_empty() {
            return Err(MatchError::invalid("at least one observation is required"));
        }

        let outcome = self
            .decode(observations, cutoff, weighting)
            .and_then(|collapse| {
                let links = assemble(
                    self.network,
                    &collapse.traversals,
                    collapse.start_offset(),
                    collapse.end_offset(),
                )?;

                Ok(Match::matched(
                    links,
                    ReliabilityScorer::emission(&collapse.emissions),
                ))
            })
            .and_then(|result| self.finish(result, weighting));

        conclude(outcome)
    }

    /// Matches a traced path, observing each of its vertices.
    ///
    /// Reliability compares the matched geometry against the trace itself,
    /// reaching zero once they lie `cutoff` metres apart on average.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all, err(level = Level::INFO)))]
    pub fn match_line(
        &self,
        line: &LineString,
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Match, MatchError> {
        non_negative("cutoff", cutoff)?;
        if line.0.is_empty() {
            return Err(MatchError::invalid("line requires at least one coordinate"));
        }

        debug!("Matching {} within {cutoff}m", line.wkt_string());

        let observations = Observation::trace(line);
        let scorer = ReliabilityScorer::new(cutoff);

        let outcome = self
            .decode(&observations, cutoff, weighting)
            .and_then(|collapse| {
                let links = assemble(
                    self.network,
                    &collapse.traversals,
                    collapse.start_offset(),
                    collapse.end_offset(),
                )?;

                let result = Match::matched(links, 0.0);
                let reliability = scorer.geometry(&result.geometry, line);

                Ok(Match {
                    reliability,
                    ..result
                })
            })
            .and_then(|result| self.finish(result, weighting));

        conclude(outcome)
    }

    /// Builds the lattice for the observations and collapses it.
    pub(crate) fn decode(
        &self,
        observations: &[Observation],
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Collapse, MatchError> {
        debug_time!("Sequence decoding");

        let candidates = CandidateGenerator::new(self.network, self.config.max_candidates);
        let lattice = LayerGenerator::new(candidates, &self.costing, weighting, cutoff)
            .with_observations(observations)?;

        let mut model =
            TransitionCostModel::new(self.network, weighting, self.config.reverse_tolerance);

        ViterbiSolver.solve(&lattice, &mut model, &self.costing)
    }
}
