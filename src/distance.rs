use ndarray::ArrayView1;
use num_traits::Float;

/// Squared Euclidean distance between two equally sized vectors.
pub fn squared_euclidean_distance<F: Float>(us: ArrayView1<F>, them: ArrayView1<F>) -> F {
    us.iter()
        .zip(them.iter())
        .fold(F::zero(), |acc, (&a, &b)| {
            let diff = a - b;
            acc + diff * diff
        })
}
