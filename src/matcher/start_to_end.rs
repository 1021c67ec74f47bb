use crate::error::{MatchError, NoMatchReason};
use crate::graph::{Network, Weighting};
use crate::matcher::links::assemble;
use crate::matcher::{Match, Matcher, conclude, config::non_negative};
use crate::transition::*;

use geo::{LineString, Point};
use log::debug;
use measure_time::debug_time;

#[cfg(feature = "tracing")]
use tracing::Level;

impl<N, E, T> Matcher<'_, N, E, T>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Matches a line by its two ends alone.
    ///
    /// Candidates are only generated at the first and last coordinate. Every
    /// start and end pair joined by the network is compared against the whole
    /// line, and the closest fit wins. Equal fits prefer the shorter route,
    /// then the earlier pair.
    ///
    /// Faster than [`Matcher::match_line`] on long, sparsely sampled lines,
    /// at the cost of ignoring where the line went in between.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all, err(level = Level::INFO)))]
    pub fn match_start_to_end(
        &self,
        line: &LineString,
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Match, MatchError> {
        non_negative("cutoff", cutoff)?;

        let (Some(first), Some(last)) = (line.0.first(), line.0.last()) else {
            return Err(MatchError::invalid("line requires at least one coordinate"));
        };

        let outcome = self
            .connect(line, Point(*first), Point(*last), cutoff, weighting)
            .and_then(|result| self.finish(result, weighting));

        conclude(outcome)
    }

    fn connect(
        &self,
        line: &LineString,
        first: Point,
        last: Point,
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Match, MatchError> {
        debug_time!("Start-to-end matching");

        let generator = CandidateGenerator::new(self.network, self.config.max_candidates);

        let starts = generator.generate(&first, cutoff, None, weighting)?;
        if starts.is_empty() {
            return Err(NoMatchReason::NoCandidates { index: 0 }.into());
        }

        let ends = generator.generate(&last, cutoff, None, weighting)?;
        if ends.is_empty() {
            return Err(NoMatchReason::NoCandidates {
                index: line.0.len() - 1,
            }
            .into());
        }

        let scorer = ReliabilityScorer::new(cutoff);
        let mut model =
            TransitionCostModel::new(self.network, weighting, self.config.reverse_tolerance);

        let mut best: Option<(f64, f64, Match)> = None;

        for start in &starts {
            for end in &ends {
                let Some(hop) = model.cost(start, end)? else {
                    continue;
                };

                let links = assemble(self.network, &hop.traversals, start.offset(), end.offset())?;
                let pairing = Match::matched(links, 0.0);
                let score = scorer.geometry(&pairing.geometry, line);

                let better = best.as_ref().is_none_or(|(current, distance, _)| {
                    score > *current || (score == *current && hop.distance < *distance)
                });

                if better {
                    best = Some((
                        score,
                        hop.distance,
                        Match {
                            reliability: score,
                            ..pairing
                        },
                    ));
                }
            }
        }

        debug!(
            "Paired {} start and {} end candidates",
            starts.len(),
            ends.len()
        );

        best.map(|(_, _, result)| result)
            .ok_or(NoMatchReason::NoConnectingPath.into())
    }
}
