use crate::geo::distance;
use geo::{Coord, LineString, Point};

/// Length of a line in metres.
pub fn length(line: &LineString) -> f64 {
    line.lines()
        .map(|segment| distance(Point(segment.start), Point(segment.end)))
        .sum()
}

/// Locates the point `target` metres along `line`, with the index of the
/// segment it lies on.
fn position(line: &LineString, target: f64) -> (usize, Coord) {
    let mut walked = 0.0;

    for (index, segment) in line.lines().enumerate() {
        let span = distance(Point(segment.start), Point(segment.end));
        if span > 0.0 && walked + span >= target {
            let t = ((target - walked) / span).clamp(0.0, 1.0);
            if t >= 1.0 {
                return (index, segment.end);
            }
            return (index, segment.start + (segment.end - segment.start) * t);
        }
        walked += span;
    }

    let last = line.0.len().saturating_sub(1);
    (last.saturating_sub(1), line.0[last])
}

/// Point at a length fraction along `line`.
pub fn interpolate(line: &LineString, fraction: f64) -> Option<Point> {
    if line.0.is_empty() {
        return None;
    }

    let (_, coord) = position(line, fraction.clamp(0.0, 1.0) * length(line));
    Some(Point(coord))
}

/// Portion of `line` between two length fractions.
///
/// Always holds at least two coordinates when `line` does, so a slice of
/// zero length repeats its single point.
pub fn substring(line: &LineString, from: f64, to: f64) -> LineString {
    let coords = &line.0;
    if coords.len() < 2 {
        return line.clone();
    }

    let from = from.clamp(0.0, 1.0);
    let to = to.clamp(from, 1.0);
    let total = length(line);

    let (first_index, first) = match from <= 0.0 {
        true => (0, coords[0]),
        false => position(line, from * total),
    };

    let (last_index, last) = match to >= 1.0 {
        true => (coords.len() - 2, coords[coords.len() - 1]),
        false => position(line, to * total),
    };

    let mut sliced = Vec::with_capacity(last_index.saturating_sub(first_index) + 2);
    sliced.push(first);
    if last_index > first_index {
        sliced.extend_from_slice(&coords[first_index + 1..=last_index]);
    }
    sliced.push(last);
    sliced.dedup();

    if sliced.len() == 1 {
        sliced.push(sliced[0]);
    }

    LineString::new(sliced)
}

/// Splits `line` at a length fraction into the part before and the part after.
pub fn split(line: &LineString, fraction: f64) -> (LineString, LineString) {
    (substring(line, 0.0, fraction), substring(line, fraction, 1.0))
}

/// Joins consecutive lines, dropping the repeated coordinate at each seam.
///
/// Lines that all collapse onto one point join into a zero-length line
/// of two coordinates, as [`substring`] would give.
pub fn concat<'a>(lines: impl IntoIterator<Item = &'a LineString>) -> LineString {
    let mut joined: Vec<Coord> = Vec::new();

    for line in lines {
        for coord in line.coords() {
            if joined.last() != Some(coord) {
                joined.push(*coord);
            }
        }
    }

    if let [single] = joined[..] {
        joined.push(single);
    }

    LineString::new(joined)
}

/// A copy of `line` with its coordinate order reversed.
pub fn reversed(line: &LineString) -> LineString {
    LineString::new(line.0.iter().rev().copied().collect())
}
