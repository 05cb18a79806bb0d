use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1};

pub trait Centroid {
    fn update_centroid(&mut self, data_point: ArrayView1<f64>);
    fn finalize_centroid(&mut self, count: usize);
}

impl Centroid for ArrayViewMut1<'_, f64> {
    fn update_centroid(&mut self, data_point: ArrayView1<f64>) {
        *self += &data_point;
    }

    fn finalize_centroid(&mut self, count: usize) {
        *self /= count as f64;
    }
}

/// Mean of the points assigned to each cluster, plus per-cluster counts.
///
/// A cluster without points keeps its row from `previous` unchanged.
/// Reseeding it from the point farthest from its centroid is the usual
/// alternative and is not done here.
pub fn recompute_centroids(
    data: ArrayView2<f64>,
    labels: &[usize],
    previous: ArrayView2<f64>,
) -> (Array2<f64>, Vec<usize>) {
    let k = previous.nrows();
    let mut sums = Array2::<f64>::zeros(previous.raw_dim());
    let mut counts = vec![0usize; k];

    for (point, &label) in data.outer_iter().zip(labels.iter()) {
        sums.row_mut(label).update_centroid(point);
        counts[label] += 1;
    }

    for (cluster, &count) in counts.iter().enumerate() {
        if count > 0 {
            sums.row_mut(cluster).finalize_centroid(count);
        } else {
            log::debug!("cluster {} is empty, keeping its previous centroid", cluster);
            sums.row_mut(cluster).assign(&previous.row(cluster));
        }
    }

    (sums, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn centroids_are_means_of_members() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let previous = array![[1.0, 1.0], [9.0, 9.0]];
        let (centroids, counts) = recompute_centroids(data.view(), &[0, 0, 1, 1], previous.view());

        assert_eq!(centroids, array![[0.0, 0.5], [10.0, 0.5]]);
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn empty_cluster_keeps_previous_centroid() {
        let data = array![[1.0], [3.0]];
        let previous = array![[0.0], [42.0], [-1.0]];
        let (centroids, counts) = recompute_centroids(data.view(), &[0, 0], previous.view());

        assert_eq!(centroids, array![[2.0], [42.0], [-1.0]]);
        assert_eq!(counts, vec![2, 0, 0]);
    }
}
