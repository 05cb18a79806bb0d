use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::algorithm::{run_kmeans, RunParams, RunResult};
use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};

/// Lowest values seen across all runs.
///
/// `best_initial_sse` and `best_iterations` are minima of their own column
/// and may come from different runs than `best_run`.
#[derive(Debug, Clone, PartialEq)]
pub struct BestResult {
    /// 1-based index of the run with the lowest final SSE.
    pub best_run: usize,
    pub result: RunResult,
    pub best_initial_sse: f64,
    pub best_final_sse: f64,
    pub best_iterations: usize,
}

/// Seed of run `run_index` (0-based) for a job started with `base_seed`.
pub fn run_seed(base_seed: u64, run_index: usize) -> u64 {
    base_seed.wrapping_add(run_index as u64)
}

/// Executes `num_runs` independent runs, each with its own seeded generator.
///
/// Results come back in run order whether or not they were computed in parallel,
/// and a given `base_seed` always yields the same results.
pub fn run_all(
    data: &Dataset,
    params: &RunParams,
    num_runs: usize,
    base_seed: u64,
    parallel: bool,
) -> Result<Vec<RunResult>> {
    let single_run = |run_index: usize| -> Result<RunResult> {
        let seed = run_seed(base_seed, run_index);
        log::info!("Starting run #{} (seed {})", run_index + 1, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let result = run_kmeans(data, params, seed, &mut rng)?;
        log::info!(
            "Finished run #{} - SSE: {} after {} iterations",
            run_index + 1,
            result.final_sse,
            result.iterations
        );
        Ok(result)
    };

    if parallel {
        (0..num_runs).into_par_iter().map(single_run).collect()
    } else {
        (0..num_runs).map(single_run).collect()
    }
}

/// Picks the run with the lowest final SSE (earliest run on ties) and the
/// per-column minima.
pub fn select_best(results: Vec<RunResult>) -> Result<BestResult> {
    if results.is_empty() {
        return Err(ClusteringError::Configuration(
            "at least one run is required".to_string(),
        ));
    }

    let best_initial_sse = results
        .iter()
        .map(|result| result.initial_sse)
        .fold(f64::INFINITY, f64::min);
    let best_iterations = results
        .iter()
        .map(|result| result.iterations)
        .min()
        .unwrap_or(0);

    let mut best_index = 0;
    for (run_index, result) in results.iter().enumerate() {
        if result.final_sse < results[best_index].final_sse {
            best_index = run_index;
        }
    }

    let result = results.into_iter().nth(best_index).ok_or_else(|| {
        ClusteringError::Configuration(format!("run #{} is missing", best_index + 1))
    })?;
    Ok(BestResult {
        best_run: best_index + 1,
        best_final_sse: result.final_sse,
        result,
        best_initial_sse,
        best_iterations,
    })
}
