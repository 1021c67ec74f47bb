#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod error;
pub mod geo;
pub mod graph;
pub mod matcher;
pub mod transition;

pub use error::{MatchError, NetworkError, NoMatchReason, ProjectionError};
pub use graph::{Graph, GraphBuilder, Network};
pub use matcher::{Match, MatchConfig, MatchStatus, Matcher};
