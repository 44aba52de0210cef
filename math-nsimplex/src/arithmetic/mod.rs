//! Arithmetic strategies for rule construction
//!
//! This module defines the two abstractions every rule is generic over:
//! - [`Scalar`]: value type stored in the barycentric points and weights
//! - [`Arithmetic`]: strategy supplying fractions and square roots
//!
//! [`FloatArithmetic`] evaluates everything in `f64`; [`ExactArithmetic`]
//! keeps rationals exact and represents square roots as [`QuadraticSurd`].

mod surd;

pub use surd::QuadraticSurd;

use ndarray::{Array, Dimension};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Div, Mul, Neg, Sub};

/// Value type for barycentric coordinates and weights.
pub trait Scalar:
    Clone
    + Debug
    + PartialEq
    + Zero
    + One
    + Neg<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Create from a non-negative integer
    fn from_usize(n: usize) -> Self;

    /// Lossy conversion to `f64`
    fn as_f64(&self) -> f64;
}

impl Scalar for f64 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f64
    }

    #[inline]
    fn as_f64(&self) -> f64 {
        *self
    }
}

impl Scalar for QuadraticSurd {
    fn from_usize(n: usize) -> Self {
        QuadraticSurd::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    fn as_f64(&self) -> f64 {
        self.to_f64()
    }
}

/// Runtime choice between exact and floating-point evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticMode {
    #[default]
    Float,
    Exact,
}

impl ArithmeticMode {
    /// `true` selects exact arithmetic.
    pub fn from_exact_flag(exact: bool) -> Self {
        if exact {
            ArithmeticMode::Exact
        } else {
            ArithmeticMode::Float
        }
    }
}

/// Numeric strategy threaded through every orbit generator.
///
/// Division by zero is not guarded: float strategies produce `inf`/`NaN`,
/// exact strategies panic, as the underlying arithmetic does.
pub trait Arithmetic {
    type Scalar: Scalar;

    /// `numer / denom`
    fn fraction(&self, numer: &BigInt, denom: &BigInt) -> Self::Scalar;

    /// `numer / denom` for machine integers
    fn ratio(&self, numer: i64, denom: i64) -> Self::Scalar {
        self.fraction(&BigInt::from(numer), &BigInt::from(denom))
    }

    /// Square root of a single value
    fn sqrt(&self, x: &Self::Scalar) -> Self::Scalar;

    /// Element-wise square root over an array of values.
    ///
    /// Rule construction only needs the scalar [`Arithmetic::sqrt`].
    fn sqrt_array<D: Dimension>(&self, x: &Array<Self::Scalar, D>) -> Array<Self::Scalar, D> {
        x.map(|v| self.sqrt(v))
    }

    fn mode(&self) -> ArithmeticMode;
}

/// `f64` quotients and `f64::sqrt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatArithmetic;

impl Arithmetic for FloatArithmetic {
    type Scalar = f64;

    fn fraction(&self, numer: &BigInt, denom: &BigInt) -> f64 {
        if denom.is_zero() {
            return numer.to_f64().unwrap_or(f64::NAN) / 0.0;
        }
        // Going through the exact ratio keeps huge factorials finite.
        BigRational::new(numer.clone(), denom.clone())
            .to_f64()
            .unwrap_or(f64::NAN)
    }

    #[inline]
    fn sqrt(&self, x: &f64) -> f64 {
        x.sqrt()
    }

    fn mode(&self) -> ArithmeticMode {
        ArithmeticMode::Float
    }
}

/// Exact rationals, with square roots kept symbolic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactArithmetic;

impl Arithmetic for ExactArithmetic {
    type Scalar = QuadraticSurd;

    fn fraction(&self, numer: &BigInt, denom: &BigInt) -> QuadraticSurd {
        QuadraticSurd::from_ratio(numer.clone(), denom.clone())
    }

    fn sqrt(&self, x: &QuadraticSurd) -> QuadraticSurd {
        match x.as_rational() {
            Some(value) => QuadraticSurd::sqrt_of(value),
            None => panic!("exact square root of irrational value {x} is not supported"),
        }
    }

    fn mode(&self) -> ArithmeticMode {
        ArithmeticMode::Exact
    }
}

/// `1 / √n`, the only irrational quantity the rules need.
pub(crate) fn inverse_sqrt<A: Arithmetic>(arith: &A, n: usize) -> A::Scalar {
    A::Scalar::one() / arith.sqrt(&A::Scalar::from_usize(n))
}
