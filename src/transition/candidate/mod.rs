pub mod entity;
mod generator;

#[doc(inline)]
pub use entity::*;
#[doc(inline)]
pub use generator::*;
