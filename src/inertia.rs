use ndarray::ArrayView2;

use crate::distance::squared_euclidean_distance;

/// Sum of squared distances from every point to the centroid it is assigned to.
pub fn calculate_sse(data: ArrayView2<f64>, centroids: ArrayView2<f64>, labels: &[usize]) -> f64 {
    data.outer_iter()
        .zip(labels.iter())
        .map(|(point, &label)| squared_euclidean_distance(point, centroids.row(label)))
        .sum()
}
