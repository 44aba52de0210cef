//! Error types for simplex quadrature rule construction.
//!
//! The panicking constructors treat every variant as a fatal contract
//! violation. The `try_*` entry points report them through this type so
//! callers can validate a `(dimension, scheme)` pair up front.

use thiserror::Error;

/// Errors that can occur while building a simplex quadrature rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuadratureError {
    /// The scheme index is not one of the published Walkington formulas.
    #[error("unsupported Walkington scheme index {index} (expected one of 1, 2, 3, 5, 7)")]
    UnsupportedScheme {
        /// The rejected index
        index: usize,
    },

    /// The scheme uses an orbit that is only defined in dimension 2 or 3.
    #[error("Walkington({scheme}) is not defined in dimension {dim}")]
    UnsupportedDimension {
        /// Scheme index
        scheme: usize,
        /// Requested dimension
        dim: usize,
    },

    /// A simplex needs at least one spatial dimension.
    #[error("simplex dimension must be at least 1")]
    ZeroDimension,

    /// Nothing to flatten.
    #[error("rule has no orbits")]
    EmptyRule,

    /// Two orbit blocks disagree on the number of barycentric coordinates.
    #[error("orbit column mismatch: expected {expected} coordinates, got {got}")]
    ColumnMismatch {
        /// Column count of the first block
        expected: usize,
        /// Column count of the offending block
        got: usize,
    },

    /// A per-point weight vector does not match its orbit's point count.
    #[error("weight length mismatch: orbit has {expected} points, got {got} weights")]
    WeightLengthMismatch {
        /// Number of rows in the orbit
        expected: usize,
        /// Number of weights supplied
        got: usize,
    },

    /// Stacking the orbit blocks failed.
    #[error("cannot stack orbit points: {0}")]
    Shape(String),
}

/// A specialized `Result` type for quadrature construction.
pub type Result<T> = std::result::Result<T, QuadratureError>;

impl QuadratureError {
    /// Returns `true` if the scheme index itself was rejected.
    pub fn is_scheme_error(&self) -> bool {
        matches!(self, QuadratureError::UnsupportedScheme { .. })
    }

    /// Returns `true` if the dimension is incompatible with the scheme.
    ///
    /// This includes `UnsupportedDimension` and `ZeroDimension`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            QuadratureError::UnsupportedDimension { .. } | QuadratureError::ZeroDimension
        )
    }

    /// Returns `true` if flattening the orbits failed.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            QuadratureError::EmptyRule
                | QuadratureError::ColumnMismatch { .. }
                | QuadratureError::WeightLengthMismatch { .. }
                | QuadratureError::Shape(_)
        )
    }
}
