//! A concrete routing network the matcher can run against.
//!
//! The matcher itself only depends on the [`Scan`], [`Route`] and
//! [`Topology`] traits. [`Graph`] is an in-memory implementation of them,
//! built through a [`GraphBuilder`].

pub type NodeId = u64;
pub type EdgeId = u64;

#[doc(hidden)]
pub mod builder;
#[doc(hidden)]
pub mod edge;
#[doc(hidden)]
pub mod item;
pub mod traits;
pub mod weighting;

#[cfg(test)]
mod test;

#[cfg(test)]
pub(crate) mod util {
    use crate::graph::{Access, Graph, GraphBuilder};

    use geo::LineString;
    use roadmatch_fixtures::{BEND, FixtureEdge, GRID, ISLAND, RING};
    use std::error::Error;
    use wkt::TryFromWkt;

    /// Horizontal grid edges are 0.001° of longitude at 52.37°N.
    pub(crate) const HORIZONTAL: f64 = 67.8911657535879;
    /// Vertical grid edges are 0.001° of latitude.
    pub(crate) const VERTICAL: f64 = 111.19492664455875;

    pub(crate) fn init_graph(fixtures: &[&[FixtureEdge]]) -> Result<Graph, Box<dyn Error>> {
        let mut builder = GraphBuilder::default();

        for edge in fixtures.iter().flat_map(|set| set.iter()) {
            let geometry = LineString::<f64>::try_from_wkt_str(edge.wkt)?;
            let access = match edge.oneway {
                true => Access::FORWARD,
                false => Access::BOTH,
            };

            builder.insert(edge.id, edge.source, edge.target, geometry, access);
        }

        Ok(builder.build()?)
    }

    pub(crate) fn grid() -> Graph {
        init_graph(&[GRID, ISLAND]).expect("fixture network is valid")
    }

    /// The one-way ring and the bent edge, away from the grid.
    pub(crate) fn loops() -> Graph {
        init_graph(&[RING, BEND]).expect("fixture network is valid")
    }
}

#[doc(inline)]
pub use builder::GraphBuilder;
#[doc(inline)]
pub use edge::*;
#[doc(inline)]
pub use item::Graph;
#[doc(inline)]
pub use traits::*;
#[doc(inline)]
pub use weighting::*;
