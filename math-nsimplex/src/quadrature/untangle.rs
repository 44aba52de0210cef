//! Flatten weighted orbits into parallel point and weight arrays

use crate::error::{QuadratureError, Result};
use ndarray::{Array1, Array2, Axis, concatenate};

/// Weight attached to an orbit block.
#[derive(Debug, Clone, PartialEq)]
pub enum Weight<T> {
    /// One weight shared by every point of the block
    Uniform(T),
    /// One weight per row of the block
    PerPoint(Array1<T>),
}

impl<T> From<T> for Weight<T> {
    fn from(w: T) -> Self {
        Weight::Uniform(w)
    }
}

/// Stack all point blocks and broadcast their weights.
///
/// Returns `(points, weights)` with `weights.len() == points.nrows()`, in
/// the order the blocks were given.
pub fn untangle<T: Clone>(data: &[(Weight<T>, Array2<T>)]) -> Result<(Array2<T>, Array1<T>)> {
    let Some((_, first)) = data.first() else {
        return Err(QuadratureError::EmptyRule);
    };
    let ncols = first.ncols();

    let mut weights = Vec::with_capacity(data.iter().map(|(_, p)| p.nrows()).sum());
    for (weight, points) in data {
        if points.ncols() != ncols {
            return Err(QuadratureError::ColumnMismatch {
                expected: ncols,
                got: points.ncols(),
            });
        }
        match weight {
            Weight::Uniform(w) => {
                weights.extend(std::iter::repeat_n(w.clone(), points.nrows()));
            }
            Weight::PerPoint(ws) => {
                if ws.len() != points.nrows() {
                    return Err(QuadratureError::WeightLengthMismatch {
                        expected: points.nrows(),
                        got: ws.len(),
                    });
                }
                weights.extend(ws.iter().cloned());
            }
        }
    }

    let views: Vec<_> = data.iter().map(|(_, p)| p.view()).collect();
    let points =
        concatenate(Axis(0), &views).map_err(|e| QuadratureError::Shape(e.to_string()))?;

    Ok((points, Array1::from_vec(weights)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_broadcasts_uniform_weights() {
        let data = vec![
            (Weight::Uniform(0.5), array![[1.0, 0.0], [0.0, 1.0]]),
            (Weight::Uniform(2.0), array![[0.5, 0.5]]),
        ];
        let (points, weights) = untangle(&data).unwrap();
        assert_eq!(points.dim(), (3, 2));
        assert_eq!(weights, array![0.5, 0.5, 2.0]);
        assert_eq!(points.row(2), array![0.5, 0.5]);
    }

    #[test]
    fn test_per_point_weights() {
        let data = vec![
            (Weight::from(1.0), array![[0.25, 0.75]]),
            (
                Weight::PerPoint(array![3.0, 4.0]),
                array![[1.0, 0.0], [0.0, 1.0]],
            ),
        ];
        let (_, weights) = untangle(&data).unwrap();
        assert_eq!(weights, array![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rejects_empty_input() {
        let data: Vec<(Weight<f64>, Array2<f64>)> = Vec::new();
        assert_eq!(untangle(&data).unwrap_err(), QuadratureError::EmptyRule);
    }

    #[test]
    fn test_rejects_column_mismatch() {
        let data = vec![
            (Weight::Uniform(1.0), array![[1.0, 0.0]]),
            (Weight::Uniform(1.0), array![[1.0, 0.0, 0.0]]),
        ];
        assert_eq!(
            untangle(&data).unwrap_err(),
            QuadratureError::ColumnMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_rejects_weight_length_mismatch() {
        let data = vec![(
            Weight::PerPoint(array![1.0]),
            array![[1.0, 0.0], [0.0, 1.0]],
        )];
        let err = untangle(&data).unwrap_err();
        assert!(err.is_shape_error());
    }
}
