use crate::error::NetworkError;
use crate::graph::{Edge, Graph, Scan};

use geo::{Destination, Geodesic, Point};
use rstar::AABB;
use std::f64::consts::SQRT_2;

#[cfg(feature = "tracing")]
use tracing::Level;

impl Scan for Graph {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    #[inline]
    fn nearest_edges(&self, point: &Point, distance: f64) -> Result<Vec<&Edge>, NetworkError> {
        // Corners sit on the diagonal, so they are √2 further than the sides.
        let bottom_right = Geodesic.destination(*point, 135.0, distance * SQRT_2);
        let top_left = Geodesic.destination(*point, 315.0, distance * SQRT_2);

        let bbox = AABB::from_corners(
            [top_left.x(), top_left.y()],
            [bottom_right.x(), bottom_right.y()],
        );

        self.index
            .locate_in_envelope_intersecting(&bbox)
            .map(|entry| {
                self.edges
                    .get(&entry.id)
                    .ok_or(NetworkError::UnknownEdge(entry.id))
            })
            .collect()
    }
}
