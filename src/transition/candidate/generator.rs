use crate::error::MatchError;
use crate::geo::project;
use crate::graph::{Scan, Weighting};
use crate::transition::{BearingRange, Candidate};

use geo::Point;
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, warn};
use rustc_hash::FxBuildHasher;
use wkt::ToWkt;

/// Snaps positions onto nearby directed edges.
pub struct CandidateGenerator<'a, N>
where
    N: Scan + ?Sized,
{
    network: &'a N,

    /// Most candidates kept per position.
    limit: usize,
}

impl<'a, N> CandidateGenerator<'a, N>
where
    N: Scan + ?Sized,
{
    pub fn new(network: &'a N, limit: usize) -> Self {
        Self { network, limit }
    }

    /// Generates the candidates for `point` within `cutoff` metres.
    ///
    /// Every direction the weighting admits becomes its own candidate.
    /// When a `direction` range is given, only candidates travelling
    /// within it survive. Candidates sharing an [anchor](Candidate::key)
    /// collapse onto the closest, earliest one.
    ///
    /// The output is ordered by distance and may be empty.
    pub fn generate(
        &self,
        point: &Point,
        cutoff: f64,
        direction: Option<&BearingRange>,
        weighting: &dyn Weighting,
    ) -> Result<Vec<Candidate>, MatchError> {
        if cutoff.is_nan() || cutoff < 0.0 {
            return Err(MatchError::invalid(format!(
                "cutoff must be non-negative, got {cutoff}"
            )));
        }

        let mut edges = self.network.nearest_edges(point, cutoff)?;
        edges.sort_by_key(|edge| edge.id);

        let mut unique = IndexMap::with_hasher(FxBuildHasher);

        for edge in edges {
            let projection = match project(&edge.geometry, *point) {
                Ok(projection) => projection,
                Err(error) => {
                    warn!("Skipping edge {}: {error}", edge.id);
                    continue;
                }
            };

            if projection.distance > cutoff {
                continue;
            }

            for traversal in edge.traversals() {
                if weighting.cost(edge, traversal.reversed).is_none() {
                    continue;
                }

                let candidate = Candidate::new(edge, &projection, traversal.reversed);
                if direction.is_some_and(|range| !range.contains(candidate.bearing)) {
                    continue;
                }

                match unique.entry(candidate.key()) {
                    Entry::Vacant(entry) => {
                        entry.insert(candidate);
                    }
                    Entry::Occupied(mut entry) => {
                        if candidate.distance < entry.get().distance {
                            entry.insert(candidate);
                        }
                    }
                }
            }
        }

        let mut candidates = unique.into_values().collect::<Vec<_>>();
        candidates.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.traversal.cmp(&b.traversal))
        });
        candidates.truncate(self.limit);

        debug!(
            "Generated {} candidates within {cutoff}m of {}",
            candidates.len(),
            point.wkt_string()
        );

        Ok(candidates)
    }
}
