use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rayon::prelude::*;

use crate::centroid::recompute_centroids;
use crate::convergence::ConvergencePolicy;
use crate::dataset::Dataset;
use crate::distance::squared_euclidean_distance;
use crate::error::Result;
use crate::inertia::calculate_sse;
use crate::initialization::{initialize_centroids, InitMethod};

/// Parameters shared by every run of one clustering job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParams {
    pub k: usize,
    pub max_iterations: usize,
    pub convergence: ConvergencePolicy,
    pub init_method: InitMethod,
}

/// Index of the closest centroid; on ties the lowest index wins.
pub fn nearest_centroid(point: ArrayView1<f64>, centroids: ArrayView2<f64>) -> usize {
    let mut min_distance = f64::INFINITY;
    let mut nearest = 0;
    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let distance = squared_euclidean_distance(point, centroid);
        if distance < min_distance {
            min_distance = distance;
            nearest = idx;
        }
    }
    nearest
}

pub fn assign_points(data: ArrayView2<f64>, centroids: ArrayView2<f64>) -> Vec<usize> {
    (0..data.nrows())
        .into_par_iter()
        .map(|idx| nearest_centroid(data.row(idx), centroids))
        .collect()
}

/// Snapshot of one iteration: centroids, the assignment they induce and the
/// resulting cluster sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterState {
    pub centroids: Array2<f64>,
    pub labels: Vec<usize>,
    pub counts: Vec<usize>,
}

impl ClusterState {
    pub fn assign(data: &Dataset, centroids: Array2<f64>) -> Self {
        let labels = assign_points(data.points(), centroids.view());
        let mut counts = vec![0; centroids.nrows()];
        for &label in &labels {
            counts[label] += 1;
        }
        ClusterState { centroids, labels, counts }
    }

    pub fn sse(&self, data: &Dataset) -> f64 {
        calculate_sse(data.points(), self.centroids.view(), &self.labels)
    }

    /// Centroids for the next iteration; the current snapshot is not touched.
    pub fn updated_centroids(&self, data: &Dataset) -> Array2<f64> {
        let (centroids, _) = recompute_centroids(data.points(), &self.labels, self.centroids.view());
        centroids
    }

    pub fn has_empty_cluster(&self) -> bool {
        self.counts.contains(&0)
    }
}

/// Outcome of one initialize/iterate/converge run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub seed: u64,
    pub initial_sse: f64,
    pub final_sse: f64,
    pub iterations: usize,
    pub converged: bool,
    /// SSE of every iteration, in order.
    pub sse_history: Vec<f64>,
    pub centroids: Array2<f64>,
    pub labels: Vec<usize>,
    pub counts: Vec<usize>,
}

/// Runs Lloyd's algorithm once from centroids drawn with `rng`.
pub fn run_kmeans<R: Rng + ?Sized>(
    data: &Dataset,
    params: &RunParams,
    seed: u64,
    rng: &mut R,
) -> Result<RunResult> {
    let centroids = initialize_centroids(data, params.k, params.init_method, rng)?;
    Ok(run_from_centroids(data, centroids, params, seed))
}

/// Iterates from the given starting centroids until convergence or the
/// iteration limit.
///
/// Each iteration assigns points to the current centroids, records the SSE of
/// that assignment, computes the next centroids and then checks convergence
/// against the previous iteration's SSE. The returned centroids and labels are
/// those of the last evaluated state, so they always match `final_sse`.
pub fn run_from_centroids(
    data: &Dataset,
    mut centroids: Array2<f64>,
    params: &RunParams,
    seed: u64,
) -> RunResult {
    let mut state = ClusterState::assign(data, centroids.clone());
    let initial_sse = state.sse(data);
    log::debug!("seed {}: initial SSE {}", seed, initial_sse);

    let mut final_sse = initial_sse;
    let mut previous_sse = f64::INFINITY;
    let mut sse_history = Vec::new();
    let mut iterations = 0;
    let mut converged = false;

    for iter in 1..=params.max_iterations {
        state = ClusterState::assign(data, centroids);
        let sse = state.sse(data);
        centroids = state.updated_centroids(data);

        sse_history.push(sse);
        final_sse = sse;
        iterations = iter;

        if iter % 10 == 0 {
            log::debug!("seed {}: finished iteration {} (SSE {})", seed, iter, sse);
        }

        if params.convergence.has_converged(previous_sse, sse) {
            log::info!("seed {}: converged after {} iterations", seed, iter);
            converged = true;
            break;
        }
        previous_sse = sse;
    }

    if !converged {
        log::info!(
            "seed {}: stopped at the iteration limit ({}) without converging",
            seed,
            params.max_iterations
        );
    }
    if state.has_empty_cluster() {
        log::warn!("seed {}: finished with at least one empty cluster", seed);
    }

    RunResult {
        seed,
        initial_sse,
        final_sse,
        iterations,
        converged,
        sse_history,
        centroids: state.centroids,
        labels: state.labels,
        counts: state.counts,
    }
}
