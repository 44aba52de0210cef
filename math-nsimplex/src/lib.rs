//! Quadrature rules on n-dimensional simplices
//!
//! This crate builds the Walkington family of symmetric quadrature rules on
//! the reference simplex of any dimension, either in `f64` or in exact
//! arithmetic (rationals plus one quadratic surd).
//!
//! # Features
//!
//! - **Schemes 1, 2, 3, 5, 7**: degrees 1, 1, 3, 5, 7
//! - **Any dimension** for schemes 1 to 3; schemes 5 and 7 are tabulated for
//!   triangles/tetrahedra and tetrahedra respectively
//! - **Exact mode**: weights and points as exact rationals / surds
//! - **Normalized weights**: every rule averages over the simplex
//!
//! # Example
//!
//! ```
//! use math_audio_nsimplex::{FloatArithmetic, SimplexRule};
//!
//! let rule = SimplexRule::walkington(3, 5, &FloatArithmetic);
//! assert_eq!(rule.degree, 5);
//! assert_eq!(rule.num_points(), 15);
//!
//! let total: f64 = rule.weights.sum();
//! assert!((total - 1.0).abs() < 1e-12);
//! ```

pub mod arithmetic;
pub mod error;
pub mod quadrature;

pub use arithmetic::{
    Arithmetic, ArithmeticMode, ExactArithmetic, FloatArithmetic, QuadraticSurd, Scalar,
};
pub use error::{QuadratureError, Result};
pub use quadrature::{AnyRule, Scheme, SimplexRule, try_walkington, walkington};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
