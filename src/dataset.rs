use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{ClusteringError, Result};

/// Immutable collection of `n` points sharing dimension `d`, stored row-major
/// (one row per point).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Array2<f64>,
}

impl Dataset {
    pub fn from_points(points: Vec<Vec<f64>>) -> Result<Self> {
        let n = points.len();
        let d = points.first().map(Vec::len).unwrap_or(0);
        if n == 0 || d == 0 {
            return Err(ClusteringError::EmptyDataset);
        }

        let mut flat = Vec::with_capacity(n * d);
        for (index, point) in points.into_iter().enumerate() {
            if point.len() != d {
                return Err(ClusteringError::DimensionMismatch {
                    index,
                    expected: d,
                    found: point.len(),
                });
            }
            flat.extend(point);
        }

        Self::from_flat(n, d, flat)
    }

    /// Builds a dataset from `n * d` row-major values.
    fn from_flat(n: usize, d: usize, values: Vec<f64>) -> Result<Self> {
        if n == 0 || d == 0 {
            return Err(ClusteringError::EmptyDataset);
        }
        if values.len() != n * d {
            return Err(ClusteringError::Truncated {
                expected: n * d,
                found: values.len(),
            });
        }
        let points = Array2::from_shape_vec((n, d), values)
            .map_err(|err| ClusteringError::Configuration(err.to_string()))?;
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.points.row(index)
    }

    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Coordinate-wise mean of every point.
    #[cfg(test)]
    pub fn mean(&self) -> ndarray::Array1<f64> {
        self.points.sum_axis(Axis(0)) / self.len() as f64
    }

    /// Rescales every dimension to `[0, 1]` with its own min/max.
    ///
    /// A constant column maps to 0 everywhere. The receiver is left untouched.
    pub fn normalized(&self) -> Dataset {
        let mins = self
            .points
            .fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));
        let maxs = self
            .points
            .fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));

        let mut points = self.points.clone();
        for (dim, mut column) in points.axis_iter_mut(Axis(1)).enumerate() {
            let (min, max) = (mins[dim], maxs[dim]);
            let range = max - min;
            if range == 0.0 {
                log::warn!("dimension {} is constant ({}), normalizing to 0", dim, min);
                column.fill(0.0);
            } else if range.is_finite() {
                column.mapv_inplace(|x| (x - min) / range);
            } else {
                // spread exceeds f64::MAX, halve the operands first
                let half_min = min / 2.0;
                let half_range = max / 2.0 - half_min;
                column.mapv_inplace(|x| (x / 2.0 - half_min) / half_range);
            }
        }

        Dataset { points }
    }
}
