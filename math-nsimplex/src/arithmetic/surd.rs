//! Exact quadratic surds `p + q·√r`
//!
//! The Walkington rules only ever take the square root of a single integer
//! per rule (`√(d+1)` for scheme 2), so every value that appears in an exact
//! rule lives in the quadratic field Q(√r). Arithmetic between two values
//! with different irrational radicands is outside that field and panics.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Exact value `rational + coefficient·√radicand`.
///
/// Invariants: `radicand` is square-free and positive, and it is `1` whenever
/// `coefficient` is zero. Two equal values therefore compare equal field by
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuadraticSurd {
    rational: BigRational,
    coefficient: BigRational,
    radicand: BigInt,
}

impl QuadraticSurd {
    /// Build `rational + coefficient·√radicand`, normalizing the radicand.
    pub fn new(rational: BigRational, coefficient: BigRational, radicand: BigInt) -> Self {
        assert!(radicand.is_positive(), "radicand must be positive, got {radicand}");

        let (square, free) = split_square_factor(&radicand);
        let coefficient = coefficient * BigRational::from_integer(square);

        if coefficient.is_zero() {
            Self::from_rational(rational)
        } else if free.is_one() {
            Self::from_rational(rational + coefficient)
        } else {
            Self {
                rational,
                coefficient,
                radicand: free,
            }
        }
    }

    /// A purely rational value.
    pub fn from_rational(rational: BigRational) -> Self {
        Self {
            rational,
            coefficient: BigRational::zero(),
            radicand: BigInt::one(),
        }
    }

    /// A rational value `numer / denom`.
    ///
    /// Panics when `denom` is zero.
    pub fn from_ratio(numer: BigInt, denom: BigInt) -> Self {
        Self::from_rational(BigRational::new(numer, denom))
    }

    /// An integer value.
    pub fn from_integer(n: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// Exact square root of a non-negative rational.
    ///
    /// `√(p/q) = √(p·q) / q`; perfect squares collapse back to rationals.
    pub fn sqrt_of(value: &BigRational) -> Self {
        assert!(
            !value.is_negative(),
            "square root of negative value {value}"
        );
        if value.is_zero() {
            return Self::zero();
        }

        let numer = value.numer();
        let denom = value.denom();
        Self::new(
            BigRational::zero(),
            BigRational::new(BigInt::one(), denom.clone()),
            numer * denom,
        )
    }

    /// Rational part `p`.
    pub fn rational_part(&self) -> &BigRational {
        &self.rational
    }

    /// Coefficient `q` of the square root.
    pub fn coefficient(&self) -> &BigRational {
        &self.coefficient
    }

    /// Square-free radicand `r` (`1` for rational values).
    pub fn radicand(&self) -> &BigInt {
        &self.radicand
    }

    pub fn is_rational(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// The value as a rational, if it has no irrational part.
    pub fn as_rational(&self) -> Option<&BigRational> {
        if self.is_rational() {
            Some(&self.rational)
        } else {
            None
        }
    }

    /// `p - q·√r`
    pub fn conjugate(&self) -> Self {
        Self {
            rational: self.rational.clone(),
            coefficient: -self.coefficient.clone(),
            radicand: self.radicand.clone(),
        }
    }

    /// Field norm `p² - q²·r`, always rational.
    pub fn norm(&self) -> BigRational {
        let r = BigRational::from_integer(self.radicand.clone());
        &self.rational * &self.rational - &self.coefficient * &self.coefficient * r
    }

    /// Nearest `f64` (NaN if a part does not fit).
    pub fn to_f64(&self) -> f64 {
        let p = self.rational.to_f64().unwrap_or(f64::NAN);
        if self.is_rational() {
            return p;
        }
        let q = self.coefficient.to_f64().unwrap_or(f64::NAN);
        let r = self.radicand.to_f64().unwrap_or(f64::NAN);
        p + q * r.sqrt()
    }

    fn shared_radicand(&self, other: &Self) -> BigInt {
        if self.is_rational() {
            other.radicand.clone()
        } else if other.is_rational() || self.radicand == other.radicand {
            self.radicand.clone()
        } else {
            panic!(
                "cannot combine sqrt({}) with sqrt({})",
                self.radicand, other.radicand
            );
        }
    }

    fn scale(self, factor: &BigRational) -> Self {
        Self::new(
            self.rational * factor,
            self.coefficient * factor,
            self.radicand,
        )
    }
}

/// Split `n` into `(s, f)` with `n = s²·f` and `f` square-free.
fn split_square_factor(n: &BigInt) -> (BigInt, BigInt) {
    let mut free = n.clone();
    let mut square = BigInt::one();
    let mut k = BigInt::from(2);

    while &k * &k <= free {
        let k2 = &k * &k;
        while free.is_multiple_of(&k2) {
            free /= &k2;
            square *= &k;
        }
        k += BigInt::one();
    }

    (square, free)
}

impl Zero for QuadraticSurd {
    fn zero() -> Self {
        Self::from_rational(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.rational.is_zero() && self.coefficient.is_zero()
    }
}

impl One for QuadraticSurd {
    fn one() -> Self {
        Self::from_rational(BigRational::one())
    }
}

impl Neg for QuadraticSurd {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            rational: -self.rational,
            coefficient: -self.coefficient,
            radicand: self.radicand,
        }
    }
}

impl Add for QuadraticSurd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let radicand = self.shared_radicand(&rhs);
        Self::new(
            self.rational + rhs.rational,
            self.coefficient + rhs.coefficient,
            radicand,
        )
    }
}

impl Sub for QuadraticSurd {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for QuadraticSurd {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        // (a + b√r)(c + e√r) = (ac + be·r) + (ae + bc)√r
        let radicand = self.shared_radicand(&rhs);
        let r = BigRational::from_integer(radicand.clone());
        let rational = &self.rational * &rhs.rational + &self.coefficient * &rhs.coefficient * r;
        let coefficient = &self.rational * &rhs.coefficient + &self.coefficient * &rhs.rational;
        Self::new(rational, coefficient, radicand)
    }
}

impl Div for QuadraticSurd {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        assert!(!rhs.is_zero(), "division by zero");
        // x / y = x·ȳ / N(y)
        let norm = rhs.norm();
        let numerator = self * rhs.conjugate();
        numerator.scale(&norm.recip())
    }
}

impl fmt::Display for QuadraticSurd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rational() {
            return write!(f, "{}", self.rational);
        }

        let root = if self.coefficient.is_one() {
            format!("sqrt({})", self.radicand)
        } else if (-self.coefficient.clone()).is_one() {
            format!("-sqrt({})", self.radicand)
        } else {
            format!("{}*sqrt({})", self.coefficient, self.radicand)
        };

        if self.rational.is_zero() {
            write!(f, "{root}")
        } else if self.coefficient.is_negative() {
            write!(f, "{} - {}", self.rational, root.trim_start_matches('-'))
        } else {
            write!(f, "{} + {}", self.rational, root)
        }
    }
}
