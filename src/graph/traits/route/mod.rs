mod definition;
mod implementation;


pub use definition::{Path, Route};
