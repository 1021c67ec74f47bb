use crate::error::ProjectionError;
use crate::geo::EARTH_RADIUS;

use geo::{Bearing, Coord, Geodesic, LineString, Point};

/// The result of projecting a point onto a segment or line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Normalised position of the closest point along the geometry, in `[0, 1]`.
    pub fraction: f64,

    /// Planar distance, in metres, from the projected point to the closest point.
    pub distance: f64,

    /// Compass bearing, in degrees `[0, 360)`, of the segment holding the closest point.
    pub bearing: f64,

    /// The closest point on the geometry.
    pub point: Point,

    /// Index of the segment holding the closest point.
    pub segment: usize,
}

/// Planar distance in metres between two points.
///
/// Longitude is shrunk by the cosine of the mean latitude of both points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let shrink = ((a.y() + b.y()) / 2.0).to_radians().cos();
    let dx = (b.x() - a.x()).to_radians() * shrink;
    let dy = (b.y() - a.y()).to_radians();

    EARTH_RADIUS * dx.hypot(dy)
}

/// Ellipsoidal initial bearing from `from` to `to`, normalised to `[0, 360)`.
#[inline]
pub fn bearing(from: Point, to: Point) -> f64 {
    Geodesic.bearing(from, to).rem_euclid(360.0)
}

/// Smallest angle, in degrees, between two bearings.
#[inline]
pub fn deviation(a: f64, b: f64) -> f64 {
    let delta = (a - b).rem_euclid(360.0);
    delta.min(360.0 - delta)
}

/// Projects `point` onto the segment from `start` to `end`.
///
/// The perpendicular foot is found in a plane local to the segment and
/// clamped onto it, so points beyond either end resolve to that endpoint.
/// A zero-length segment projects everything onto its start.
pub fn project_segment(start: Point, end: Point, point: Point) -> Projection {
    let shrink = ((start.y() + end.y()) / 2.0).to_radians().cos();

    let dx = (end.x() - start.x()) * shrink;
    let dy = end.y() - start.y();
    let span = dx * dx + dy * dy;

    let fraction = if span > 0.0 {
        let px = (point.x() - start.x()) * shrink;
        let py = point.y() - start.y();
        ((px * dx + py * dy) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let foot = Point(start.0 + (end.0 - start.0) * fraction);

    Projection {
        fraction,
        distance: distance(point, foot),
        bearing: bearing(start, end),
        point: foot,
        segment: 0,
    }
}

/// Projects `point` onto the closest segment of `line`.
///
/// The returned fraction is measured by length along the entire line.
/// On equal distances the earliest segment wins.
pub fn project(line: &LineString, point: Point) -> Result<Projection, ProjectionError> {
    if line.0.len() < 2 {
        return Err(ProjectionError::TooFewCoordinates(line.0.len()));
    }

    let mut walked = 0.0;
    let mut best: Option<(Projection, f64)> = None;

    for (index, segment) in line.lines().enumerate() {
        let (start, end) = (Point(segment.start), Point(segment.end));
        let span = distance(start, end);

        let mut projection = project_segment(start, end, point);
        projection.segment = index;

        let offset = walked + projection.fraction * span;
        if best
            .as_ref()
            .is_none_or(|(current, _)| projection.distance < current.distance)
        {
            best = Some((projection, offset));
        }

        walked += span;
    }

    let (mut projection, offset) = best.ok_or(ProjectionError::TooFewCoordinates(0))?;
    projection.fraction = if walked > 0.0 {
        (offset / walked).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(projection)
}

/// Bearing of the segment of `line` that contains the given length fraction.
pub fn bearing_at(line: &LineString, fraction: f64) -> Option<f64> {
    let coords: &[Coord] = &line.0;
    if coords.len() < 2 {
        return None;
    }

    let total = crate::geo::length(line);
    let target = fraction.clamp(0.0, 1.0) * total;

    let mut walked = 0.0;
    for segment in line.lines() {
        let span = distance(Point(segment.start), Point(segment.end));
        if span > 0.0 && walked + span >= target {
            return Some(bearing(Point(segment.start), Point(segment.end)));
        }
        walked += span;
    }

    let last = coords.len() - 1;
    Some(bearing(Point(coords[last - 1]), Point(coords[last])))
}
