use crate::error::MatchError;
use crate::transition::{DEFAULT_BEARING_ERROR, DEFAULT_EMISSION_ERROR, DEFAULT_TRANSITION_SCALE};

use serde::{Deserialize, Serialize};

/// Tuning of a [`Matcher`](crate::matcher::Matcher).
///
/// Fixed for the lifetime of the matcher. Anything that varies per request,
/// such as the search cutoff or the travel profile, is passed to each call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Standard deviation of the observation position, in metres.
    /// Default: 10.0
    pub sigma: f64,

    /// Standard deviation of the observed bearing, in degrees.
    /// Default: 45.0
    pub bearing_sigma: f64,

    /// Scale, in metres, of the penalty on routes longer or shorter than
    /// the straight line between observations.
    /// Default: 10.0
    pub beta: f64,

    /// Metres a candidate may fall behind its predecessor on the same edge
    /// while still counting as stationary.
    /// Default: 5.0
    pub reverse_tolerance: f64,

    /// Most candidates kept per observation.
    /// Default: 8
    pub max_candidates: usize,

    /// Inputs between progress log lines in batch mode.
    /// Default: 1000
    pub progress_interval: usize,

    /// When set, matches carry every slice reachable this many metres
    /// upstream of their start.
    pub upstream_distance: Option<f64>,

    /// When set, matches carry every slice reachable this many metres
    /// downstream of their end.
    pub downstream_distance: Option<f64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_EMISSION_ERROR,
            bearing_sigma: DEFAULT_BEARING_ERROR,
            beta: DEFAULT_TRANSITION_SCALE,
            reverse_tolerance: 5.0,
            max_candidates: 8,
            progress_interval: 1000,
            upstream_distance: None,
            downstream_distance: None,
        }
    }
}

impl MatchConfig {
    /// Rejects values the costing cannot work with.
    pub fn validate(&self) -> Result<(), MatchError> {
        positive("sigma", self.sigma)?;
        positive("bearing_sigma", self.bearing_sigma)?;
        positive("beta", self.beta)?;
        non_negative("reverse_tolerance", self.reverse_tolerance)?;

        if let Some(distance) = self.upstream_distance {
            non_negative("upstream_distance", distance)?;
        }

        if let Some(distance) = self.downstream_distance {
            non_negative("downstream_distance", distance)?;
        }

        if self.max_candidates == 0 {
            return Err(MatchError::invalid("max_candidates must be at least 1"));
        }

        Ok(())
    }

    pub fn with_sigma(self, sigma: f64) -> Self {
        Self { sigma, ..self }
    }

    pub fn with_bearing_sigma(self, bearing_sigma: f64) -> Self {
        Self {
            bearing_sigma,
            ..self
        }
    }

    pub fn with_beta(self, beta: f64) -> Self {
        Self { beta, ..self }
    }

    pub fn with_reverse_tolerance(self, reverse_tolerance: f64) -> Self {
        Self {
            reverse_tolerance,
            ..self
        }
    }

    pub fn with_max_candidates(self, max_candidates: usize) -> Self {
        Self {
            max_candidates,
            ..self
        }
    }

    pub fn with_progress_interval(self, progress_interval: usize) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    pub fn with_upstream(self, distance: f64) -> Self {
        Self {
            upstream_distance: Some(distance),
            ..self
        }
    }

    pub fn with_downstream(self, distance: f64) -> Self {
        Self {
            downstream_distance: Some(distance),
            ..self
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), MatchError> {
    match value.is_finite() && value > 0.0 {
        true => Ok(()),
        false => Err(MatchError::invalid(format!(
            "{name} must be positive and finite, got {value}"
        ))),
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<(), MatchError> {
    match value.is_finite() && value >= 0.0 {
        true => Ok(()),
        false => Err(MatchError::invalid(format!(
            "{name} must be non-negative and finite, got {value}"
        ))),
    }
}
