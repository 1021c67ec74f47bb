//! Planar geometry used by the matcher.
//!
//! All positions are [`geo::Point`]s holding `x = longitude`, `y = latitude`
//! in degrees. Distances are measured in a local equirectangular plane, which
//! is accurate for the short spans a matcher deals with.

/// Mean earth radius in metres used by the local plane.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[doc(hidden)]
pub mod project;
#[doc(hidden)]
pub mod slice;


#[doc(inline)]
pub use project::*;
#[doc(inline)]
pub use slice::*;
