use crate::error::NetworkError;
use crate::graph::Edge;

use geo::Point;

/// Locates edges around a position.
pub trait Scan {
    /// Returns every [`Edge`] whose envelope intersects the square of
    /// half-width `distance` metres centred on `point`.
    ///
    /// ### Note
    /// This function implements a square-scan.
    ///
    /// It may therefore return edges further away than `distance`. Callers
    /// are expected to measure each edge and filter for themselves.
    fn nearest_edges(&self, point: &Point, distance: f64) -> Result<Vec<&Edge>, NetworkError>;
}
