use crate::error::MatchError;
use crate::graph::{Network, Weighting};
use crate::matcher::{Match, Matcher, config::non_negative};
use crate::transition::{EmissionStrategy, TransitionStrategy};

use geo::LineString;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::Display;

/// One input of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineLocation {
    pub id: String,
    pub geometry: LineString,
}

impl LineLocation {
    pub fn new(id: impl Into<String>, geometry: LineString) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }
}

/// The pipeline a batch runs each input through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MatchMethod {
    /// [`Matcher::match_line`]
    #[default]
    Trace,
    /// [`Matcher::match_start_to_end`]
    StartToEnd,
}

impl<N, E, T> Matcher<'_, N, E, T>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Lazily matches every location, in order, one result per input.
    ///
    /// The shared `cutoff` is checked once up front. After that, nothing an
    /// individual location does stops the batch: its failure is recorded as
    /// an [`Exception`](crate::matcher::MatchStatus::Exception) match.
    pub fn match_batch<'b, I>(
        &'b self,
        locations: I,
        method: MatchMethod,
        cutoff: f64,
        weighting: &'b dyn Weighting,
    ) -> Result<impl Iterator<Item = Match> + 'b, MatchError>
    where
        I: IntoIterator<Item = LineLocation>,
        I::IntoIter: 'b,
    {
        non_negative("cutoff", cutoff)?;
        let interval = self.config.progress_interval.max(1);

        Ok(locations
            .into_iter()
            .enumerate()
            .map(move |(index, location)| {
                let result = self.match_location(&location, method, cutoff, weighting);

                if (index + 1) % interval == 0 {
                    info!("Matched {} locations", index + 1);
                }

                result
            }))
    }

    /// Matches every location across the rayon pool.
    ///
    /// Results come back in input order.
    pub fn match_batch_par(
        &self,
        locations: &[LineLocation],
        method: MatchMethod,
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Result<Vec<Match>, MatchError>
    where
        E: Sync,
        T: Sync,
    {
        non_negative("cutoff", cutoff)?;

        let interval = self.config.progress_interval.max(1);
        let done = AtomicUsize::new(0);

        let results = locations
            .par_iter()
            .map(|location| {
                let result = self.match_location(location, method, cutoff, weighting);

                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % interval == 0 {
                    info!("Matched {finished} of {} locations", locations.len());
                }

                result
            })
            .collect::<Vec<_>>();

        info!("Matched {} locations", results.len());
        Ok(results)
    }

    fn match_location(
        &self,
        location: &LineLocation,
        method: MatchMethod,
        cutoff: f64,
        weighting: &dyn Weighting,
    ) -> Match {
        let outcome = match method {
            MatchMethod::Trace => self.match_line(&location.geometry, cutoff, weighting),
            MatchMethod::StartToEnd => {
                self.match_start_to_end(&location.geometry, cutoff, weighting)
            }
        };

        match outcome {
            Ok(result) => result.with_id(location.id.as_str()),
            Err(error) => {
                warn!("Location {} failed: {error}", location.id);
                Match::exception(&error).with_id(location.id.as_str())
            }
        }
    }
}
