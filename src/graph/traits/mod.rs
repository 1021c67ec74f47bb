mod proximity;
mod route;
mod topology;

pub use proximity::Scan;
pub use route::{Path, Route};
pub use topology::Topology;

/// Everything the matcher needs from a routing network.
pub trait Network: Scan + Route + Topology + Sync {}

impl<T> Network for T where T: Scan + Route + Topology + Sync {}
