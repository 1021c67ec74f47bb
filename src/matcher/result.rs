use crate::error::MatchError;
use crate::geo::concat;
use crate::graph::Traversal;
use crate::transition::{Direction, Origin};

use geo::LineString;
use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, serde::Deserialize, Display, AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Match,
    NoMatch,
    Exception,
}

/// A directed slice of one edge.
///
/// Fractions are measured in the direction of travel, so
/// `0 <= start_fraction <= end_fraction <= 1` always holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkSlice {
    pub traversal: Traversal,
    pub start_fraction: f64,
    pub end_fraction: f64,
    /// The slice's geometry, in travel order.
    pub geometry: LineString,
}

/// One edge of a matched path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchedLink {
    #[serde(flatten)]
    pub slice: LinkSlice,
}

/// One edge slice reached while expanding outward from a matched point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IsochroneMatch {
    #[serde(flatten)]
    pub slice: LinkSlice,

    /// Metres from the origin to the far end of the slice.
    pub distance: f64,
}

/// The outcome of matching one input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Match {
    pub id: Option<String>,
    pub status: MatchStatus,
    pub links: Vec<MatchedLink>,

    /// Start fraction of the first link, `0` without links.
    pub start_fraction: f64,

    /// End fraction of the last link, `0` without links.
    pub end_fraction: f64,

    /// Confidence percentage in `[0, 100]`.
    pub reliability: f64,
    pub geometry: LineString,

    pub upstream: Option<Vec<IsochroneMatch>>,
    pub downstream: Option<Vec<IsochroneMatch>>,

    /// Description of the failure behind an [`MatchStatus::Exception`].
    pub error: Option<String>,
}

impl Match {
    pub fn matched(links: Vec<MatchedLink>, reliability: f64) -> Self {
        let start_fraction = links.first().map_or(0.0, |link| link.slice.start_fraction);
        let end_fraction = links.last().map_or(0.0, |link| link.slice.end_fraction);
        let geometry = concat(links.iter().map(|link| &link.slice.geometry));

        Match {
            id: None,
            status: MatchStatus::Match,
            links,
            start_fraction,
            end_fraction,
            reliability: reliability.clamp(0.0, 100.0),
            geometry,
            upstream: None,
            downstream: None,
            error: None,
        }
    }

    pub fn no_match() -> Self {
        Match {
            id: None,
            status: MatchStatus::NoMatch,
            links: Vec::new(),
            start_fraction: 0.0,
            end_fraction: 0.0,
            reliability: 0.0,
            geometry: LineString::new(Vec::new()),
            upstream: None,
            downstream: None,
            error: None,
        }
    }

    pub fn exception(error: &MatchError) -> Self {
        Match {
            status: MatchStatus::Exception,
            error: Some(error.to_string()),
            ..Match::no_match()
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        Match {
            id: Some(id.into()),
            ..self
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == MatchStatus::Match
    }

    /// Where an expansion in the given direction starts: the start of the
    /// first link going upstream, the end of the last link going downstream.
    pub fn origin(&self, direction: Direction) -> Option<Origin> {
        let (link, offset) = match direction {
            Direction::Upstream => self
                .links
                .first()
                .map(|link| (link, link.slice.start_fraction))?,
            Direction::Downstream => self
                .links
                .last()
                .map(|link| (link, link.slice.end_fraction))?,
        };

        Some(Origin {
            traversal: link.slice.traversal,
            offset,
        })
    }
}
