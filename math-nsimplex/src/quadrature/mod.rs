//! Quadrature rules on simplices of arbitrary dimension
//!
//! Provides the symmetric orbit generators, the flattening of weighted
//! orbits into point/weight arrays, and the Walkington rules built on them.

mod orbits;
mod untangle;
mod walkington;

pub use orbits::*;
pub use untangle::*;
pub use walkington::*;
