use clap::ValueEnum;
use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::centroid::recompute_centroids;
use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};

/// How the starting centroids of a run are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InitMethod {
    /// `k` distinct points picked uniformly at random.
    #[default]
    Random,
    /// Every point dropped into a random cluster, centroids are the cluster means.
    Partition,
}

pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &Dataset,
    k: usize,
    method: InitMethod,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if k == 0 || k > data.len() {
        return Err(ClusteringError::Configuration(format!(
            "k must be between 1 and the number of points ({}), got {}",
            data.len(),
            k
        )));
    }

    let centroids = match method {
        InitMethod::Random => random_selection(data, k, rng),
        InitMethod::Partition => random_partition(data, k, rng),
    };
    Ok(centroids)
}

/// Copies `k` distinct points chosen by a partial Fisher-Yates shuffle, so the
/// draw finishes in O(n) even when `k == n`.
pub fn random_selection<R: Rng + ?Sized>(data: &Dataset, k: usize, rng: &mut R) -> Array2<f64> {
    let mut indices: Vec<usize> = (0..data.len()).collect();
    let (chosen, _) = indices.partial_shuffle(rng, k);

    let mut centroids = Array2::zeros((k, data.dimension()));
    for (mut centroid, &idx) in centroids.outer_iter_mut().zip(chosen.iter()) {
        centroid.assign(&data.point(idx));
    }
    centroids
}

/// Assigns every point to a uniformly random cluster and returns the means.
///
/// A cluster that receives no points keeps an all-zero centroid.
pub fn random_partition<R: Rng + ?Sized>(data: &Dataset, k: usize, rng: &mut R) -> Array2<f64> {
    let labels = Array1::random_using(data.len(), Uniform::new(0, k), rng).to_vec();
    let zeros = Array2::zeros((k, data.dimension()));
    let (centroids, counts) = recompute_centroids(data.points(), &labels, zeros.view());

    let empty = counts.iter().filter(|&&count| count == 0).count();
    if empty > 0 {
        log::warn!(
            "random partition left {} of {} clusters empty, their centroids start at the origin",
            empty,
            k
        );
    }
    centroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(n: usize) -> Dataset {
        Dataset::from_points((0..n).map(|i| vec![i as f64, (i * i) as f64]).collect()).unwrap()
    }

    #[test]
    fn random_selection_picks_distinct_points() {
        let data = grid(20);
        let mut rng = StdRng::seed_from_u64(7);
        let centroids = initialize_centroids(&data, 8, InitMethod::Random, &mut rng).unwrap();

        assert_eq!(centroids.dim(), (8, 2));
        let picked = centroids.outer_iter().map(|c| c[0] as usize).collect_vec();
        assert!(picked.iter().all_unique());
        for (row, &idx) in centroids.outer_iter().zip(picked.iter()) {
            assert_eq!(row, data.point(idx));
        }
    }

    #[test]
    fn random_selection_with_k_equal_n_takes_every_point() {
        let data = grid(50);
        let mut rng = StdRng::seed_from_u64(1);
        let centroids = initialize_centroids(&data, 50, InitMethod::Random, &mut rng).unwrap();

        let picked = centroids.outer_iter().map(|c| c[0] as usize).sorted().collect_vec();
        assert_eq!(picked, (0..50).collect_vec());
    }

    #[test]
    fn k_larger_than_n_fails_fast() {
        let data = grid(3);
        let mut rng = StdRng::seed_from_u64(0);
        for method in [InitMethod::Random, InitMethod::Partition] {
            let err = initialize_centroids(&data, 4, method, &mut rng).unwrap_err();
            assert!(matches!(err, ClusteringError::Configuration(_)));
        }
        assert!(initialize_centroids(&data, 0, InitMethod::Random, &mut rng).is_err());
    }

    #[test]
    fn same_seed_gives_identical_centroids() {
        let data = grid(30);
        for method in [InitMethod::Random, InitMethod::Partition] {
            let a = initialize_centroids(&data, 4, method, &mut StdRng::seed_from_u64(99)).unwrap();
            let b = initialize_centroids(&data, 4, method, &mut StdRng::seed_from_u64(99)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn partition_with_single_cluster_is_global_mean() {
        let data = grid(5);
        let mut rng = StdRng::seed_from_u64(3);
        let centroids = initialize_centroids(&data, 1, InitMethod::Partition, &mut rng).unwrap();
        assert_eq!(centroids.row(0), data.mean());
    }

    #[test]
    fn partition_empty_cluster_stays_at_origin() {
        // 20 points over 20 clusters: some cluster is left empty
        let n = 20;
        let data = Dataset::from_points((1..=n).map(|i| vec![i as f64, 2.0 * i as f64]).collect()).unwrap();
        let centroids = random_partition(&data, n, &mut StdRng::seed_from_u64(11));

        let labels = Array1::random_using(n, Uniform::new(0, n), &mut StdRng::seed_from_u64(11)).to_vec();
        let mut empty = 0;
        for (cluster, row) in centroids.outer_iter().enumerate() {
            let members = (0..n).filter(|&idx| labels[idx] == cluster).collect_vec();
            if members.is_empty() {
                empty += 1;
                assert!(row.iter().all(|&x| x == 0.0));
                continue;
            }
            for dim in 0..2 {
                let mean = members.iter().map(|&idx| data.point(idx)[dim]).sum::<f64>() / members.len() as f64;
                assert_abs_diff_eq!(row[dim], mean, epsilon = 1e-12);
            }
        }
        assert!(empty > 0);
    }
}
