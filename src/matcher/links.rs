use crate::error::MatchError;
use crate::geo::substring;
use crate::graph::{Topology, Traversal};
use crate::matcher::{LinkSlice, MatchedLink};

/// Slices a dense run of traversals into matched links.
///
/// The first link starts at `start` and the last ends at `end`, both in the
/// travel frame. Every link in between is covered whole. A single link
/// never ends before it starts.
pub(crate) fn assemble<N>(
    network: &N,
    traversals: &[Traversal],
    start: f64,
    end: f64,
) -> Result<Vec<MatchedLink>, MatchError>
where
    N: Topology + ?Sized,
{
    let last = traversals.len().saturating_sub(1);

    traversals
        .iter()
        .enumerate()
        .map(|(index, traversal)| {
            let edge = network.resolve(traversal.edge)?;

            let start_fraction = if index == 0 { start.clamp(0.0, 1.0) } else { 0.0 };
            let end_fraction = if index == last { end.clamp(0.0, 1.0) } else { 1.0 };
            let end_fraction = end_fraction.max(start_fraction);

            let geometry = substring(
                &edge.directed_geometry(traversal.reversed),
                start_fraction,
                end_fraction,
            );

            Ok(MatchedLink {
                slice: LinkSlice {
                    traversal: *traversal,
                    start_fraction,
                    end_fraction,
                    geometry,
                },
            })
        })
        .collect()
}
