use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Raised by the geometric projector when the geometry cannot be projected onto.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("geometry requires at least two coordinates, {0} given")]
    TooFewCoordinates(usize),
}

/// Failures of the routing network collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("edge {0} does not exist in the network")]
    UnknownEdge(EdgeId),

    #[error("node {0} does not exist in the network")]
    UnknownNode(NodeId),

    #[error("edge {id} is invalid: {reason}")]
    InvalidEdge { id: EdgeId, reason: String },

    #[error("edge {0} was inserted more than once")]
    DuplicateEdge(EdgeId),

    #[error("network returned an inconsistent result: {0}")]
    Inconsistent(String),

    #[error("network unavailable: {0}")]
    Unavailable(String),
}

/// The reason a sequence could not be matched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    #[error("observation {index} has no candidates within the cutoff")]
    NoCandidates { index: usize },

    #[error("no transition survives into observation {index}")]
    BrokenChain { index: usize },

    #[error("no start and end candidate pair is connected")]
    NoConnectingPath,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no match: {0}")]
    NoMatch(NoMatchReason),

    #[error("network failure: {0}")]
    Network(#[from] NetworkError),

    #[error("projection failure: {0}")]
    Projection(#[from] ProjectionError),
}

impl MatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MatchError::InvalidInput(reason.into())
    }
}

impl From<NoMatchReason> for MatchError {
    fn from(value: NoMatchReason) -> Self {
        MatchError::NoMatch(value)
    }
}
