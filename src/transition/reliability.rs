use crate::geo::{distance, project};

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

/// How a match's reliability is judged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReliabilityMode {
    /// Compare the matched geometry against a traced input shape.
    #[default]
    Geometry,

    /// Average the emission probabilities of sparse point observations.
    Emission,
}

/// Converts a decoded path into a confidence percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReliabilityScorer {
    /// Average offset, in metres, at which the geometry score reaches zero.
    pub cutoff: f64,
}

impl ReliabilityScorer {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn score(
        &self,
        matched: &LineString,
        input: &LineString,
        emissions: &[f64],
        mode: ReliabilityMode,
    ) -> f64 {
        match mode {
            ReliabilityMode::Geometry => self.geometry(matched, input),
            ReliabilityMode::Emission => Self::emission(emissions),
        }
    }

    /// Scores the average offset between both geometries, measured from
    /// the vertices of each onto the other.
    ///
    /// ```math
    /// score = 100 * (1 - min(offset / cutoff, 1))
    /// ```
    pub fn geometry(&self, matched: &LineString, input: &LineString) -> f64 {
        let (Some(there), Some(back)) = (
            average_offset(input, matched),
            average_offset(matched, input),
        ) else {
            return 0.0;
        };

        let offset = (there + back) / 2.0;
        if self.cutoff <= 0.0 {
            return if offset <= 0.0 { 100.0 } else { 0.0 };
        }

        100.0 * (1.0 - (offset / self.cutoff).min(1.0))
    }

    /// Mean emission probability, as a percentage.
    pub fn emission(emissions: &[f64]) -> f64 {
        if emissions.is_empty() {
            return 0.0;
        }

        let mean = emissions.iter().sum::<f64>() / emissions.len() as f64;
        (100.0 * mean).clamp(0.0, 100.0)
    }
}

/// Mean distance, in metres, from the vertices of `from` onto `onto`.
///
/// `None` if either geometry is empty.
pub fn average_offset(from: &LineString, onto: &LineString) -> Option<f64> {
    if from.0.is_empty() {
        return None;
    }

    let total = from
        .points()
        .map(|point: Point| match onto.0.as_slice() {
            [single] => Ok(distance(point, Point(*single))),
            _ => project(onto, point).map(|projection| projection.distance),
        })
        .sum::<Result<f64, _>>()
        .ok()?;

    Some(total / from.0.len() as f64)
}
