use crate::geo::bearing;

use geo::{Line, LineString, Point};
use serde::{Deserialize, Serialize};

/// A clockwise range of permitted bearings, in degrees.
///
/// The range may wrap across north, so `from = 350, to = 10`
/// admits everything within ten degrees of north.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BearingRange {
    pub from: f64,
    pub to: f64,
}

impl BearingRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from: from.rem_euclid(360.0),
            to: to.rem_euclid(360.0),
        }
    }

    /// Everything within `tolerance` degrees either side of `bearing`.
    pub fn around(bearing: f64, tolerance: f64) -> Self {
        Self::new(bearing - tolerance, bearing + tolerance)
    }

    pub fn contains(&self, bearing: f64) -> bool {
        let bearing = bearing.rem_euclid(360.0);

        match self.from <= self.to {
            true => (self.from..=self.to).contains(&bearing),
            false => bearing >= self.from || bearing <= self.to,
        }
    }
}

/// What was observed: a bare position, or a short movement ending at it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObservationGeometry {
    Point(Point),
    Segment(Line),
}

/// One element of an input sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    /// Position of the observation within its sequence.
    pub index: usize,
    pub geometry: ObservationGeometry,
    /// Optional restriction on the bearing of matched edges.
    pub direction: Option<BearingRange>,
}

impl Observation {
    pub fn point(index: usize, point: Point) -> Self {
        Self {
            index,
            geometry: ObservationGeometry::Point(point),
            direction: None,
        }
    }

    pub fn segment(index: usize, line: Line) -> Self {
        Self {
            index,
            geometry: ObservationGeometry::Segment(line),
            direction: None,
        }
    }

    pub fn with_direction(self, direction: BearingRange) -> Self {
        Self {
            direction: Some(direction),
            ..self
        }
    }

    /// The observed position. For a segment, where it ends.
    pub fn position(&self) -> Point {
        match self.geometry {
            ObservationGeometry::Point(point) => point,
            ObservationGeometry::Segment(line) => line.end_point(),
        }
    }

    /// Bearing of the observed movement, if the observation carries one.
    pub fn travel_bearing(&self) -> Option<f64> {
        match self.geometry {
            ObservationGeometry::Segment(line) if line.start != line.end => {
                Some(bearing(line.start_point(), line.end_point()))
            }
            _ => None,
        }
    }

    /// One point observation per position, without bearings.
    pub fn sequence(points: impl IntoIterator<Item = Point>) -> Vec<Observation> {
        points
            .into_iter()
            .enumerate()
            .map(|(index, point)| Observation::point(index, point))
            .collect()
    }

    /// Observations for every vertex of a traced path.
    ///
    /// Each vertex after the first is observed as the segment arriving at it,
    /// which lends it the bearing the trace was moving in.
    pub fn trace(line: &LineString) -> Vec<Observation> {
        line.points()
            .enumerate()
            .scan(None, |previous: &mut Option<Point>, (index, point)| {
                let observation = match previous.replace(point) {
                    Some(before) if before != point => {
                        Observation::segment(index, Line::new(before, point))
                    }
                    _ => Observation::point(index, point),
                };

                Some(observation)
            })
            .collect()
    }
}
