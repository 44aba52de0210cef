//! Walkington rules on the reference simplex
//!
//! Noel J. Walkington, *Quadrature on simplices of arbitrary dimension*,
//! Technical Report 00-CNA-023, Carnegie Mellon University, 2000.
//!
//! Each rule is a signed combination of symmetric orbits. Orbit weights are
//! closed-form rational functions of `d`; the assembled weights are divided by
//! their sum so that every rule averages (rather than integrates) over the
//! simplex.

use super::orbits::{OrbitKind, centroid, xi1, xi11, xi21, xi111};
use super::untangle::{Weight, untangle};
use crate::arithmetic::{
    Arithmetic, ArithmeticMode, ExactArithmetic, FloatArithmetic, QuadraticSurd, Scalar,
    inverse_sqrt,
};
use crate::error::{QuadratureError, Result};
use ndarray::{Array1, Array2, ArrayView1, s};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for the outside-the-simplex check.
const INSIDE_TOL: f64 = 1e-14;

/// The published Walkington schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// Centroid rule
    W1,
    /// One `xi1` orbit at `a = 1/√(d+1)`
    W2,
    W3,
    W5,
    W7,
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [Scheme::W1, Scheme::W2, Scheme::W3, Scheme::W5, Scheme::W7];

    /// Scheme from its index in the report
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            1 => Some(Scheme::W1),
            2 => Some(Scheme::W2),
            3 => Some(Scheme::W3),
            5 => Some(Scheme::W5),
            7 => Some(Scheme::W7),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Scheme::W1 => 1,
            Scheme::W2 => 2,
            Scheme::W3 => 3,
            Scheme::W5 => 5,
            Scheme::W7 => 7,
        }
    }

    /// Polynomial degree integrated exactly, independent of `d`.
    ///
    /// The report claims degree 2 for scheme 2, but only degree 1 holds.
    pub fn degree(&self) -> usize {
        match self {
            Scheme::W1 | Scheme::W2 => 1,
            Scheme::W3 => 3,
            Scheme::W5 => 5,
            Scheme::W7 => 7,
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Orbits the scheme is assembled from, in assembly order
    pub fn orbit_kinds(&self) -> &'static [OrbitKind] {
        use OrbitKind::*;
        match self {
            Scheme::W1 => &[Centroid],
            Scheme::W2 => &[Xi1],
            Scheme::W3 => &[Centroid, Xi1],
            Scheme::W5 => &[Centroid, Xi1, Xi1, Xi11],
            Scheme::W7 => &[Centroid, Xi1, Xi1, Xi11, Xi1, Xi21, Xi111],
        }
    }

    /// Whether every orbit of the scheme is defined in dimension `d`
    pub fn supports_dimension(&self, d: usize) -> bool {
        self.orbit_kinds().iter().all(|k| k.supports_dimension(d))
    }

    /// Number of points of the rule in dimension `d`
    pub fn num_points(&self, d: usize) -> Option<usize> {
        self.orbit_kinds().iter().map(|k| k.size(d)).sum()
    }

    /// Check a `(dimension, scheme)` pair without building the rule
    pub fn validate(index: usize, d: usize) -> Result<Self> {
        let scheme = Scheme::try_from(index)?;
        if d == 0 {
            return Err(QuadratureError::ZeroDimension);
        }
        if !scheme.supports_dimension(d) {
            return Err(QuadratureError::UnsupportedDimension {
                scheme: index,
                dim: d,
            });
        }
        Ok(scheme)
    }
}

impl TryFrom<usize> for Scheme {
    type Error = QuadratureError;

    fn try_from(index: usize) -> Result<Self> {
        Scheme::from_index(index).ok_or(QuadratureError::UnsupportedScheme { index })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Walkington({})", self.index())
    }
}

fn factorial(n: usize) -> BigInt {
    (1..=n).map(BigInt::from).product()
}

fn power(base: usize, exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(base), exp)
}

/// `sign · (d + shift)^exp / (scale · (d + fact)!)`
fn weight(sign: i64, d: usize, shift: usize, exp: usize, scale: i64, fact: usize) -> BigRational {
    BigRational::new(
        BigInt::from(sign) * power(d + shift, exp),
        BigInt::from(scale) * factorial(d + fact),
    )
}

fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Weighted orbits of a scheme, with exact weights before normalization.
fn weighted_orbits<A: Arithmetic>(
    scheme: Scheme,
    d: usize,
    arith: &A,
) -> Vec<(BigRational, Array2<A::Scalar>)> {
    let frac = |n: usize| arith.fraction(&BigInt::from(1), &BigInt::from(n));

    match scheme {
        Scheme::W1 => vec![(weight(1, d, 0, 0, 1, 0), centroid(d, arith))],
        Scheme::W2 => {
            let a = inverse_sqrt(arith, d + 1);
            vec![(weight(1, d, 0, 0, 1, 1), xi1(d, a))]
        }
        Scheme::W3 => vec![
            (weight(-1, d, 1, 3, 4, 2), centroid(d, arith)),
            (weight(1, d, 3, 3, 4, 3), xi1(d, frac(d + 3))),
        ],
        Scheme::W5 => {
            let w0 = weight(1, d, 1, 5, 32, 3);
            let w1 = weight(-1, d, 3, 5, 16, 4);
            let w2 = weight(1, d, 5, 5, 16, 5);
            vec![
                (w0, centroid(d, arith)),
                (w1, xi1(d, frac(d + 3))),
                (w2.clone(), xi1(d, frac(d + 5))),
                (w2, xi11(d, frac(d + 5), arith)),
            ]
        }
        Scheme::W7 => {
            let w0 = -ratio(1, 384) * weight(1, d, 1, 7, 1, 4);
            let w1 = ratio(1, 128) * weight(1, d, 3, 7, 1, 5);
            let w2 = -ratio(1, 64) * weight(1, d, 5, 7, 1, 6);
            let w3 = ratio(1, 64) * weight(1, d, 7, 7, 1, 7);
            vec![
                (w0, centroid(d, arith)),
                (w1, xi1(d, frac(d + 3))),
                (w2.clone(), xi1(d, frac(d + 5))),
                (w2, xi11(d, frac(d + 5), arith)),
                (w3.clone(), xi1(d, frac(d + 7))),
                (w3.clone(), xi21(d, frac(d + 7), arith)),
                (w3, xi111(d, frac(d + 7), arith)),
            ]
        }
    }
}

/// Divide the exact orbit weights by the point-weighted total, then convert.
///
/// Raw weights carry `1/(d+k)!` and underflow `f64` for large `d`; the
/// normalized ones stay of order one.
fn normalized_orbits<A: Arithmetic>(
    scheme: Scheme,
    d: usize,
    arith: &A,
) -> Vec<(Weight<A::Scalar>, Array2<A::Scalar>)> {
    let data = weighted_orbits(scheme, d, arith);
    let total: BigRational = data
        .iter()
        .map(|(w, pts)| w * BigRational::from_integer(BigInt::from(pts.nrows())))
        .sum();

    data.into_iter()
        .map(|(w, pts)| {
            let w = w / &total;
            (arith.fraction(w.numer(), w.denom()).into(), pts)
        })
        .collect()
}

/// Quadrature rule on the `d`-simplex
///
/// `bary` holds one row of `d + 1` barycentric coordinates per point;
/// `points` drops the first (redundant) coordinate. Weights sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexRule<T> {
    /// Scheme label, e.g. `Walkington(5)`
    pub name: String,
    /// Spatial dimension
    pub dim: usize,
    /// Polynomial degree integrated exactly
    pub degree: usize,
    /// Barycentric points, shape `(n, d + 1)`
    pub bary: Array2<T>,
    /// Barycentric points without the first coordinate, shape `(n, d)`
    pub points: Array2<T>,
    /// Normalized weights, one per point
    pub weights: Array1<T>,
}

impl<T: Scalar> SimplexRule<T> {
    /// Build a Walkington rule.
    ///
    /// # Panics
    /// If `index` is not one of 1, 2, 3, 5, 7, or if the scheme uses an
    /// orbit that is undefined in dimension `d` (schemes 5 and 7 need
    /// `d ∈ {2, 3}` and `d = 3` respectively).
    pub fn walkington<A>(d: usize, index: usize, arith: &A) -> Self
    where
        A: Arithmetic<Scalar = T>,
    {
        match Self::try_walkington(d, index, arith) {
            Ok(rule) => rule,
            Err(err) => panic!("{err}"),
        }
    }

    /// Build a Walkington rule, reporting unsupported input as an error.
    pub fn try_walkington<A>(d: usize, index: usize, arith: &A) -> Result<Self>
    where
        A: Arithmetic<Scalar = T>,
    {
        let scheme = Scheme::validate(index, d)?;

        let data = normalized_orbits(scheme, d, arith);
        let (bary, mut weights) = untangle(&data)?;

        // Already one in exact arithmetic; removes float rounding otherwise.
        let total = weights.iter().cloned().fold(T::zero(), |acc, w| acc + w);
        weights.mapv_inplace(|w| w / total.clone());

        let points = bary.slice(s![.., 1..]).to_owned();

        let rule = Self {
            name: scheme.name(),
            dim: d,
            degree: scheme.degree(),
            bary,
            points,
            weights,
        };

        log::debug!(
            "{}: d={}, {} points, degree {}, {:?} arithmetic",
            rule.name,
            d,
            rule.num_points(),
            rule.degree,
            arith.mode()
        );
        if !rule.points_inside_simplex() {
            log::warn!(
                "{} in dimension {} has points outside the simplex",
                rule.name,
                d
            );
        }

        Ok(rule)
    }

    /// Number of quadrature points
    pub fn num_points(&self) -> usize {
        self.weights.len()
    }

    /// Iterator over `(barycentric point, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (ArrayView1<'_, T>, &T)> {
        self.bary.rows().into_iter().zip(self.weights.iter())
    }

    /// Whether every barycentric coordinate is non-negative
    pub fn points_inside_simplex(&self) -> bool {
        self.bary.iter().all(|x| x.as_f64() >= -INSIDE_TOL)
    }

    /// Whether some weight is negative
    pub fn has_negative_weights(&self) -> bool {
        self.weights.iter().any(|w| w.as_f64() < 0.0)
    }

    /// Evaluate into `f64`
    pub fn to_f64(&self) -> SimplexRule<f64> {
        SimplexRule {
            name: self.name.clone(),
            dim: self.dim,
            degree: self.degree,
            bary: self.bary.mapv(|x| x.as_f64()),
            points: self.points.mapv(|x| x.as_f64()),
            weights: self.weights.mapv(|x| x.as_f64()),
        }
    }
}

/// A rule in whichever arithmetic was requested at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRule {
    Float(SimplexRule<f64>),
    Exact(SimplexRule<QuadraticSurd>),
}

impl AnyRule {
    pub fn name(&self) -> &str {
        match self {
            AnyRule::Float(r) => &r.name,
            AnyRule::Exact(r) => &r.name,
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            AnyRule::Float(r) => r.dim,
            AnyRule::Exact(r) => r.dim,
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            AnyRule::Float(r) => r.degree,
            AnyRule::Exact(r) => r.degree,
        }
    }

    pub fn num_points(&self) -> usize {
        match self {
            AnyRule::Float(r) => r.num_points(),
            AnyRule::Exact(r) => r.num_points(),
        }
    }

    pub fn mode(&self) -> ArithmeticMode {
        match self {
            AnyRule::Float(_) => ArithmeticMode::Float,
            AnyRule::Exact(_) => ArithmeticMode::Exact,
        }
    }

    /// Evaluate into `f64`
    pub fn to_f64(&self) -> SimplexRule<f64> {
        match self {
            AnyRule::Float(r) => r.clone(),
            AnyRule::Exact(r) => r.to_f64(),
        }
    }
}

/// Build Walkington rule `index` in dimension `d`.
///
/// # Panics
/// Same conditions as [`SimplexRule::walkington`].
pub fn walkington(d: usize, index: usize, mode: ArithmeticMode) -> AnyRule {
    match try_walkington(d, index, mode) {
        Ok(rule) => rule,
        Err(err) => panic!("{err}"),
    }
}

/// Build Walkington rule `index` in dimension `d`, without panicking on
/// unsupported input.
pub fn try_walkington(d: usize, index: usize, mode: ArithmeticMode) -> Result<AnyRule> {
    match mode {
        ArithmeticMode::Float => {
            SimplexRule::try_walkington(d, index, &FloatArithmetic).map(AnyRule::Float)
        }
        ArithmeticMode::Exact => {
            SimplexRule::try_walkington(d, index, &ExactArithmetic).map(AnyRule::Exact)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::One;

    fn exact_sum<'a>(values: impl Iterator<Item = &'a QuadraticSurd>) -> QuadraticSurd {
        values.cloned().fold(QuadraticSurd::zero(), |acc, x| acc + x)
    }

    #[test]
    fn test_scheme_table() {
        let degrees: Vec<_> = Scheme::ALL.iter().map(|s| (s.index(), s.degree())).collect();
        assert_eq!(degrees, vec![(1, 1), (2, 1), (3, 3), (5, 5), (7, 7)]);
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_index(scheme.index()), Some(scheme));
        }
        assert_eq!(Scheme::from_index(4), None);
        assert_eq!(Scheme::W5.to_string(), "Walkington(5)");
    }

    #[test]
    fn test_scheme_dimensions() {
        assert!(Scheme::W3.supports_dimension(1));
        assert!(Scheme::W3.supports_dimension(10));
        assert!(Scheme::W5.supports_dimension(2));
        assert!(Scheme::W5.supports_dimension(3));
        assert!(!Scheme::W5.supports_dimension(4));
        assert!(!Scheme::W7.supports_dimension(2));
        assert!(Scheme::W7.supports_dimension(3));
    }

    #[test]
    fn test_validate() {
        assert_eq!(Scheme::validate(3, 4), Ok(Scheme::W3));
        assert_eq!(
            Scheme::validate(6, 2),
            Err(QuadratureError::UnsupportedScheme { index: 6 })
        );
        assert_eq!(Scheme::validate(1, 0), Err(QuadratureError::ZeroDimension));
        assert_eq!(
            Scheme::validate(5, 1),
            Err(QuadratureError::UnsupportedDimension { scheme: 5, dim: 1 })
        );
        assert_eq!(Scheme::try_from(7usize), Ok(Scheme::W7));
    }

    #[test]
    fn test_centroid_rule_in_2d() {
        let rule = SimplexRule::walkington(2, 1, &ExactArithmetic);
        assert_eq!(rule.name, "Walkington(1)");
        assert_eq!(rule.degree, 1);
        assert_eq!(rule.num_points(), 1);
        let third = ExactArithmetic.ratio(1, 3);
        assert!(rule.bary.iter().all(|x| *x == third));
        assert_eq!(rule.weights[0], QuadraticSurd::one());
        assert_eq!(rule.points.dim(), (1, 2));
    }

    #[test]
    fn test_scheme_two_in_2d() {
        let rule = SimplexRule::walkington(2, 2, &FloatArithmetic);
        assert_eq!(rule.degree, 1);
        assert_eq!(rule.num_points(), 3);
        for &w in rule.weights.iter() {
            assert_relative_eq!(w, 1.0 / 3.0, epsilon = 1e-15);
        }
        let a = 1.0 / 3.0_f64.sqrt();
        assert_relative_eq!(rule.bary[[0, 1]], a, epsilon = 1e-15);
        assert_relative_eq!(rule.bary[[0, 0]], 1.0 - 2.0 * a, epsilon = 1e-15);
        // 1 - 2/√3 < 0
        assert!(!rule.points_inside_simplex());
    }

    #[test]
    fn test_scheme_two_exact_keeps_root() {
        let rule = SimplexRule::walkington(2, 2, &ExactArithmetic);
        let a = &rule.bary[[0, 1]];
        assert!(!a.is_rational());
        assert_eq!(a.radicand(), &BigInt::from(3));
        assert_eq!(rule.weights[0], ExactArithmetic.ratio(1, 3));
    }

    #[test]
    fn test_scheme_three_point_count() {
        let rule = SimplexRule::walkington(2, 3, &FloatArithmetic);
        assert_eq!(rule.num_points(), 4);
        assert!(rule.has_negative_weights());
        assert!(rule.points_inside_simplex());
    }

    #[test]
    fn test_point_counts_match_orbit_sizes() {
        for scheme in Scheme::ALL {
            for d in 1..=4 {
                if !scheme.supports_dimension(d) {
                    continue;
                }
                let rule = SimplexRule::walkington(d, scheme.index(), &FloatArithmetic);
                assert_eq!(Some(rule.num_points()), scheme.num_points(d));
            }
        }
        assert_eq!(Scheme::W7.num_points(3), Some(35));
        assert_eq!(Scheme::W5.num_points(2), Some(10));
        assert_eq!(Scheme::W5.num_points(3), Some(15));
    }

    #[test]
    fn test_exact_weights_and_points_sum_to_one() {
        for (d, index) in [(1, 1), (3, 1), (2, 2), (4, 2), (1, 3), (5, 3), (2, 5), (3, 5), (3, 7)] {
            let rule = SimplexRule::walkington(d, index, &ExactArithmetic);
            assert_eq!(exact_sum(rule.weights.iter()), QuadraticSurd::one());
            for row in rule.bary.rows() {
                assert_eq!(exact_sum(row.iter()), QuadraticSurd::one());
            }
        }
    }

    #[test]
    fn test_float_matches_exact() {
        for (d, index) in [(2, 1), (2, 2), (3, 2), (4, 2), (4, 3), (2, 5), (3, 5), (3, 7)] {
            let float = SimplexRule::walkington(d, index, &FloatArithmetic);
            let exact = SimplexRule::walkington(d, index, &ExactArithmetic).to_f64();
            assert_eq!(float.bary.dim(), exact.bary.dim());
            for (f, e) in float.bary.iter().zip(exact.bary.iter()) {
                assert_relative_eq!(*f, *e, epsilon = 1e-13);
            }
            for (f, e) in float.weights.iter().zip(exact.weights.iter()) {
                assert_relative_eq!(*f, *e, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_large_dimension_float_matches_exact() {
        // (d + 3)! is far below f64::MIN_POSITIVE here
        for index in [1, 2, 3] {
            let float = SimplexRule::walkington(200, index, &FloatArithmetic);
            let exact = SimplexRule::walkington(200, index, &ExactArithmetic).to_f64();
            assert!(float.weights.iter().all(|w| w.is_finite()));
            assert_relative_eq!(float.weights.sum(), 1.0, epsilon = 1e-10);
            for (f, e) in float.weights.iter().zip(exact.weights.iter()) {
                assert_relative_eq!(*f, *e, epsilon = 1e-10);
            }
            for (f, e) in float.bary.iter().zip(exact.bary.iter()) {
                assert_relative_eq!(*f, *e, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_points_drop_first_coordinate() {
        let rule = SimplexRule::walkington(3, 5, &FloatArithmetic);
        assert_eq!(rule.points.dim(), (rule.num_points(), 3));
        for (bary, point) in rule.bary.rows().into_iter().zip(rule.points.rows()) {
            assert_eq!(bary.slice(s![1..]), point);
        }
    }

    #[test]
    fn test_iter_pairs_points_and_weights() {
        let rule = SimplexRule::walkington(2, 3, &FloatArithmetic);
        let total: f64 = rule.iter().map(|(_, w)| *w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-14);
        assert_eq!(rule.iter().count(), 4);
    }

    #[test]
    fn test_any_rule_dispatch() {
        let rule = walkington(3, 3, ArithmeticMode::Exact);
        assert_eq!(rule.mode(), ArithmeticMode::Exact);
        assert_eq!(rule.name(), "Walkington(3)");
        assert_eq!(rule.dim(), 3);
        assert_eq!(rule.degree(), 3);
        assert_eq!(rule.num_points(), 5);

        let float = walkington(3, 3, ArithmeticMode::Float).to_f64();
        let exact = rule.to_f64();
        for (f, e) in float.weights.iter().zip(exact.weights.iter()) {
            assert_relative_eq!(*f, *e, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_try_walkington_errors() {
        assert!(
            try_walkington(2, 4, ArithmeticMode::Float)
                .unwrap_err()
                .is_scheme_error()
        );
        assert!(
            try_walkington(4, 5, ArithmeticMode::Exact)
                .unwrap_err()
                .is_dimension_error()
        );
        assert!(
            try_walkington(2, 7, ArithmeticMode::Float)
                .unwrap_err()
                .is_dimension_error()
        );
    }

    #[test]
    #[should_panic(expected = "unsupported Walkington scheme index 4")]
    fn test_unsupported_scheme_panics() {
        let _ = SimplexRule::walkington(2, 4, &FloatArithmetic);
    }

    #[test]
    #[should_panic(expected = "Walkington(5) is not defined in dimension 4")]
    fn test_scheme_five_in_4d_panics() {
        let _ = SimplexRule::walkington(4, 5, &FloatArithmetic);
    }

    #[test]
    #[should_panic(expected = "Walkington(7) is not defined in dimension 1")]
    fn test_scheme_seven_in_1d_panics() {
        let _ = walkington(1, 7, ArithmeticMode::Exact);
    }
}
