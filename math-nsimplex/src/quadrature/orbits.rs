//! Symmetric orbits of barycentric points
//!
//! Each generator returns one row per point of the orbit, with `d + 1`
//! barycentric coordinates per row. Row order is fixed so that rules are
//! reproducible point by point.

use crate::arithmetic::{Arithmetic, Scalar};
use ndarray::Array2;
use num_bigint::BigInt;
use num_traits::One;

/// The orbit shapes used by the Walkington rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitKind {
    /// All coordinates equal
    Centroid,
    /// One coordinate different
    Xi1,
    /// Two groups of equal coordinates
    Xi11,
    /// Three distinct values
    Xi21,
    /// Three equal coordinates and one different, tetrahedra only
    Xi111,
}

impl OrbitKind {
    /// Whether the generator is defined in dimension `d`
    pub fn supports_dimension(&self, d: usize) -> bool {
        match self {
            OrbitKind::Centroid | OrbitKind::Xi1 => d >= 1,
            OrbitKind::Xi11 | OrbitKind::Xi21 => d == 2 || d == 3,
            OrbitKind::Xi111 => d == 3,
        }
    }

    /// Number of points in the orbit, `None` where it is undefined
    pub fn size(&self, d: usize) -> Option<usize> {
        if !self.supports_dimension(d) {
            return None;
        }
        let n = match (self, d) {
            (OrbitKind::Centroid, _) => 1,
            (OrbitKind::Xi1, _) => d + 1,
            (OrbitKind::Xi11, 2) => XI11_2D.len(),
            (OrbitKind::Xi11, _) => XI11_3D.len(),
            (OrbitKind::Xi21, 2) => XI21_2D.len(),
            (OrbitKind::Xi21, _) => XI21_3D.len(),
            (OrbitKind::Xi111, _) => XI111_3D.len(),
        };
        Some(n)
    }
}

// Index 0 is `a`, 1 is `b`, 2 is `c`.
const XI11_2D: [[usize; 3]; 3] = [[1, 1, 0], [1, 0, 1], [0, 1, 1]];

const XI11_3D: [[usize; 4]; 6] = [
    [1, 1, 0, 0],
    [1, 0, 1, 0],
    [1, 0, 0, 1],
    [0, 1, 0, 1],
    [0, 0, 1, 1],
    [0, 1, 1, 0],
];

const XI21_2D: [[usize; 3]; 6] = [
    [1, 2, 0],
    [2, 1, 0],
    [2, 0, 1],
    [1, 0, 2],
    [0, 1, 2],
    [0, 2, 1],
];

const XI21_3D: [[usize; 4]; 12] = [
    [1, 2, 0, 0],
    [1, 0, 2, 0],
    [1, 0, 0, 2],
    [0, 1, 0, 2],
    [0, 0, 1, 2],
    [0, 1, 2, 0],
    [2, 1, 0, 0],
    [2, 0, 1, 0],
    [2, 0, 0, 1],
    [0, 2, 0, 1],
    [0, 0, 2, 1],
    [0, 2, 1, 0],
];

const XI111_3D: [[usize; 4]; 4] = [[1, 1, 1, 0], [1, 1, 0, 1], [1, 0, 1, 1], [0, 1, 1, 1]];

fn from_pattern<T: Clone, const N: usize>(pattern: &[[usize; N]], values: &[T]) -> Array2<T> {
    Array2::from_shape_fn((pattern.len(), N), |(i, j)| values[pattern[i][j]].clone())
}

/// Centroid `(1/(d+1), ..., 1/(d+1))`, a single row.
pub fn centroid<A: Arithmetic>(d: usize, arith: &A) -> Array2<A::Scalar> {
    let value = arith.fraction(&BigInt::one(), &BigInt::from(d + 1));
    Array2::from_elem((1, d + 1), value)
}

/// All `d + 1` points with one coordinate `1 - d·a` and the others `a`.
pub fn xi1<T: Scalar>(d: usize, a: T) -> Array2<T> {
    let b = T::one() - T::from_usize(d) * a.clone();
    let mut out = Array2::from_elem((d + 1, d + 1), a);
    out.diag_mut().fill(b);
    out
}

/// Points with two coordinate groups, `a` and `b = (1 - (d-1)·a) / 2`.
///
/// Three points in 2D (one `a`), six in 3D (two `a`).
pub fn xi11<A: Arithmetic>(d: usize, a: A::Scalar, arith: &A) -> Array2<A::Scalar> {
    assert!(
        d == 2 || d == 3,
        "xi11 orbit is only defined for d = 2 or 3, got {d}"
    );
    let b = (A::Scalar::one() - A::Scalar::from_usize(d - 1) * a.clone()) * arith.ratio(1, 2);
    let values = [a, b];
    if d == 2 {
        from_pattern(&XI11_2D, &values)
    } else {
        from_pattern(&XI11_3D, &values)
    }
}

/// Points built from `a`, `b = (1 - (d-2)·a) / 3` and `c = 1 - (d-1)·a - b`,
/// padded with `a` up to `d + 1` coordinates.
///
/// Walkington's report writes `(d-2)` in the expression for `c`; with that
/// factor the coordinates do not sum to one, so `(d-1)` is used here.
pub fn xi21<A: Arithmetic>(d: usize, a: A::Scalar, arith: &A) -> Array2<A::Scalar> {
    assert!(
        d == 2 || d == 3,
        "xi21 orbit is only defined for d = 2 or 3, got {d}"
    );
    let one = A::Scalar::one();
    let b = (one.clone() - A::Scalar::from_usize(d - 2) * a.clone()) * arith.ratio(1, 3);
    let c = one - A::Scalar::from_usize(d - 1) * a.clone() - b.clone();
    let values = [a, b, c];
    if d == 2 {
        from_pattern(&XI21_2D, &values)
    } else {
        from_pattern(&XI21_3D, &values)
    }
}

/// The four points with three coordinates `b = (1 - a) / 3` and one `a`.
pub fn xi111<A: Arithmetic>(d: usize, a: A::Scalar, arith: &A) -> Array2<A::Scalar> {
    assert!(d == 3, "xi111 orbit is only defined for d = 3, got {d}");
    let b = (A::Scalar::one() - A::Scalar::from_usize(d - 2) * a.clone()) * arith.ratio(1, 3);
    from_pattern(&XI111_3D, &[a, b])
}
