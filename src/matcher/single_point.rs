use crate::error::MatchError;
use crate::graph::{Network, Traversal, Weighting};
use crate::matcher::{IsochroneMatch, MatchStatus, Matcher, config::non_negative};
use crate::transition::*;

use geo::Point;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::Display;
use wkt::ToWkt;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Order in which the candidates of a point match are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MatchSort {
    /// Nearest first.
    #[default]
    ShortestDistance,
    /// Most reliable first, nearest among equals.
    HighestReliability,
}

impl MatchSort {
    fn compare(&self, a: &CandidateMatch, b: &CandidateMatch) -> Ordering {
        let nearest = a
            .distance
            .total_cmp(&b.distance)
            .then_with(|| a.traversal.cmp(&b.traversal));

        match self {
            MatchSort::ShortestDistance => nearest,
            MatchSort::HighestReliability => b.reliability.total_cmp(&a.reliability).then(nearest),
        }
    }
}

/// Which of the sorted candidates of a point match are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum MatchFilter {
    #[default]
    All,
    /// Only the first after sorting.
    First,
    /// Those at least this reliable, in percent.
    Threshold(f64),
}

impl MatchFilter {
    fn apply(&self, mut matches: Vec<CandidateMatch>) -> Vec<CandidateMatch> {
        match *self {
            MatchFilter::All => {}
            MatchFilter::First => matches.truncate(1),
            MatchFilter::Threshold(minimum) => matches.retain(|found| found.reliability >= minimum),
        }

        matches
    }
}

/// One place a single point may lie on the network.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateMatch {
    pub traversal: Traversal,

    /// Position along the traversal, in the direction of travel.
    pub fraction: f64,

    /// The point snapped onto the edge.
    pub point: Point,
    pub distance: f64,
    pub bearing: f64,

    /// Emission probability as a percentage.
    pub reliability: f64,

    pub upstream: Option<Vec<IsochroneMatch>>,
    pub downstream: Option<Vec<IsochroneMatch>>,
}

/// A single point to match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointQuery {
    pub point: Point,
    pub cutoff: f64,
    pub direction: Option<BearingRange>,
    pub sort: MatchSort,
    pub filter: MatchFilter,
}

impl PointQuery {
    pub fn new(point: Point, cutoff: f64) -> Self {
        Self {
            point,
            cutoff,
            direction: None,
            sort: MatchSort::default(),
            filter: MatchFilter::default(),
        }
    }

    pub fn with_direction(self, direction: BearingRange) -> Self {
        Self {
            direction: Some(direction),
            ..self
        }
    }

    pub fn with_sort(self, sort: MatchSort) -> Self {
        Self { sort, ..self }
    }

    pub fn with_filter(self, filter: MatchFilter) -> Self {
        Self { filter, ..self }
    }
}

/// The outcome of matching one point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointMatch {
    pub id: Option<String>,
    pub status: MatchStatus,
    pub candidates: Vec<CandidateMatch>,
    pub error: Option<String>,
}

impl PointMatch {
    pub fn with_id(self, id: impl Into<String>) -> Self {
        PointMatch {
            id: Some(id.into()),
            ..self
        }
    }
}

impl<N, E, T> Matcher<'_, N, E, T>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Every place on the network a single point may lie.
    ///
    /// Candidates are sorted and filtered as the query asks. A point with
    /// no surviving candidate is a [`MatchStatus::NoMatch`].
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self, weighting), err(level = Level::INFO)))]
    pub fn match_point(
        &self,
        query: &PointQuery,
        weighting: &dyn Weighting,
    ) -> Result<PointMatch, MatchError> {
        non_negative("cutoff", query.cutoff)?;
        if let MatchFilter::Threshold(minimum) = query.filter {
            if !(0.0..=100.0).contains(&minimum) {
                return Err(MatchError::invalid(format!(
                    "reliability threshold must lie within [0, 100], got {minimum}"
                )));
            }
        }

        let (status, candidates, error) = match self.snap(query, weighting) {
            Ok(candidates) if candidates.is_empty() => (MatchStatus::NoMatch, candidates, None),
            Ok(candidates) => (MatchStatus::Match, candidates, None),
            Err(MatchError::InvalidInput(reason)) => return Err(MatchError::InvalidInput(reason)),
            Err(error) => {
                warn!("Matching {} failed: {error}", query.point.wkt_string());
                (MatchStatus::Exception, Vec::new(), Some(error.to_string()))
            }
        };

        info!(
            "Matched {} onto {} candidates",
            query.point.wkt_string(),
            candidates.len()
        );

        Ok(PointMatch {
            id: None,
            status,
            candidates,
            error,
        })
    }

    fn snap(
        &self,
        query: &PointQuery,
        weighting: &dyn Weighting,
    ) -> Result<Vec<CandidateMatch>, MatchError> {
        let observation = Observation {
            index: 0,
            geometry: ObservationGeometry::Point(query.point),
            direction: query.direction,
        };

        let candidates = CandidateGenerator::new(self.network, self.config.max_candidates)
            .generate(&query.point, query.cutoff, query.direction.as_ref(), weighting)?;

        let mut matches = candidates
            .iter()
            .map(|candidate| {
                let emission = self
                    .costing
                    .emission(EmissionContext::new(candidate, &observation));

                CandidateMatch {
                    traversal: candidate.traversal,
                    fraction: candidate.offset(),
                    point: candidate.position,
                    distance: candidate.distance,
                    bearing: candidate.bearing,
                    reliability: ReliabilityScorer::emission(&[emission]),
                    upstream: None,
                    downstream: None,
                }
            })
            .collect::<Vec<_>>();

        matches.sort_by(|a, b| query.sort.compare(a, b));
        let mut matches = query.filter.apply(matches);

        let expander = IsochroneExpander::new(self.network, weighting);
        for found in matches.iter_mut() {
            let origin = Origin {
                traversal: found.traversal,
                offset: found.fraction,
            };

            if let Some(distance) = self.config.upstream_distance {
                found.upstream = Some(expander.expand(origin, distance, Direction::Upstream)?);
            }

            if let Some(distance) = self.config.downstream_distance {
                found.downstream = Some(expander.expand(origin, distance, Direction::Downstream)?);
            }
        }

        Ok(matches)
    }
}
