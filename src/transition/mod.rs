//! A Hidden-Markov-Model (HMM) matching
//! transition module which aligns observed
//! positions onto the directed edges of an
//! underlying network.

pub mod candidate;
pub mod costing;
pub mod hop;
pub mod isochrone;
pub mod layer;
pub mod observation;
pub mod reliability;
pub mod solver;


// Re-Exports
#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use solver::*;

pub use hop::*;
pub use isochrone::*;
pub use layer::*;
pub use observation::*;
pub use reliability::*;
