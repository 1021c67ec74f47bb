//! Public entry points of the engine.
//!
//! A [`Matcher`] binds a routing network to a fixed [`MatchConfig`]. Every
//! call takes its own cutoff and [`Weighting`], and builds its candidates,
//! lattice and path cache from scratch, so one matcher may serve many
//! threads at once.

pub mod batch;
pub mod config;
mod links;
pub mod result;
pub mod sequence;
pub mod single_point;
pub mod start_to_end;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use batch::*;
#[doc(inline)]
pub use config::MatchConfig;
#[doc(inline)]
pub use result::*;
#[doc(inline)]
pub use single_point::*;

use crate::error::MatchError;
use crate::graph::{Network, Weighting};
use crate::transition::*;

use log::{debug, info, warn};

#[cfg(feature = "tracing")]
use tracing::Level;

pub struct Matcher<'a, N, E = DefaultEmissionCost, T = DefaultTransitionCost>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    network: &'a N,
    config: MatchConfig,
    costing: CostingStrategies<E, T>,
}

impl<'a, N> Matcher<'a, N>
where
    N: Network + ?Sized,
{
    /// A matcher with the default costing, tuned by `config`.
    ///
    /// Fails with [`MatchError::InvalidInput`] if the configuration is out of range.
    pub fn new(network: &'a N, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;

        Ok(Matcher {
            network,
            costing: CostingStrategies::from_config(&config),
            config,
        })
    }
}

impl<'a, N, E, T> Matcher<'a, N, E, T>
where
    N: Network + ?Sized,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Swaps in different costing strategies.
    pub fn with_costing<E2, T2>(self, costing: CostingStrategies<E2, T2>) -> Matcher<'a, N, E2, T2>
    where
        E2: EmissionStrategy,
        T2: TransitionStrategy,
    {
        Matcher {
            network: self.network,
            config: self.config,
            costing,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn network(&self) -> &'a N {
        self.network
    }

    /// Every edge slice reachable within `max_distance` metres of a match.
    ///
    /// Upstream expansion starts where the first link starts, downstream
    /// expansion where the last link ends. A match without links reaches
    /// nothing.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip(self, origin, weighting), err(level = Level::INFO)))]
    pub fn expand_accessibility(
        &self,
        origin: &Match,
        max_distance: f64,
        direction: Direction,
        weighting: &dyn Weighting,
    ) -> Result<Vec<IsochroneMatch>, MatchError> {
        config::non_negative("max distance", max_distance)?;

        let Some(start) = origin.origin(direction) else {
            debug!("Match has no links, nothing is accessible {direction}");
            return Ok(Vec::new());
        };

        IsochroneExpander::new(self.network, weighting).expand(start, max_distance, direction)
    }

    /// Attaches the isochrones the configuration asks for.
    fn finish(&self, mut result: Match, weighting: &dyn Weighting) -> Result<Match, MatchError> {
        if !result.is_match() {
            return Ok(result);
        }

        if let Some(distance) = self.config.upstream_distance {
            let upstream =
                self.expand_accessibility(&result, distance, Direction::Upstream, weighting)?;
            result.upstream = Some(upstream);
        }

        if let Some(distance) = self.config.downstream_distance {
            let downstream =
                self.expand_accessibility(&result, distance, Direction::Downstream, weighting)?;
            result.downstream = Some(downstream);
        }

        Ok(result)
    }
}

/// Turns the outcome of a pipeline into what the caller sees.
///
/// Invalid input stays an error. A missing match and a failing network
/// both become a [`Match`], with [`MatchStatus::NoMatch`] and
/// [`MatchStatus::Exception`] respectively.
pub(crate) fn conclude(outcome: Result<Match, MatchError>) -> Result<Match, MatchError> {
    match outcome {
        Ok(result) => {
            info!(
                "Matched onto {} links (reliability {:.1})",
                result.links.len(),
                result.reliability
            );
            Ok(result)
        }
        Err(MatchError::InvalidInput(reason)) => Err(MatchError::InvalidInput(reason)),
        Err(MatchError::NoMatch(reason)) => {
            info!("No match: {reason}");
            Ok(Match::no_match())
        }
        Err(error) => {
            warn!("Matching failed: {error}");
            Ok(Match::exception(&error))
        }
    }
}
