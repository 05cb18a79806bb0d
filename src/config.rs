use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::algorithm::RunParams;
use crate::convergence::ConvergencePolicy;
use crate::error::{ClusteringError, Result};
use crate::initialization::InitMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConvergenceMode {
    /// Stop when the SSE changes by less than the threshold.
    #[default]
    Absolute,
    /// Stop when the SSE improves by less than the threshold as a fraction of the previous SSE.
    Relative,
}

/// Batch k-means with random restarts.
#[derive(Parser, Debug)]
#[command(author, version, about, allow_negative_numbers = true)]
pub struct Args {
    /// Input file: `n d` followed by `n * d` whitespace-separated values.
    pub filename: PathBuf,
    /// Number of clusters.
    pub k: usize,
    /// Iteration limit per run.
    pub max_iterations: usize,
    /// Convergence threshold on successive SSE values.
    pub threshold: f64,
    /// Number of independent runs.
    pub num_runs: usize,
    #[arg(value_enum, default_value_t = InitMethod::Random)]
    pub init_method: InitMethod,

    #[arg(long, value_enum, default_value_t = ConvergenceMode::Absolute)]
    pub convergence: ConvergenceMode,
    /// Base seed; run r uses seed + r. Drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Cluster the raw coordinates instead of min/max normalized ones.
    #[arg(long)]
    pub no_normalize: bool,
    /// Execute the runs one after another.
    #[arg(long)]
    pub sequential: bool,
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringConfig {
    pub filename: PathBuf,
    pub params: RunParams,
    pub num_runs: usize,
    pub seed: Option<u64>,
    pub normalize: bool,
    pub parallel: bool,
}

impl From<Args> for ClusteringConfig {
    fn from(args: Args) -> Self {
        let convergence = match args.convergence {
            ConvergenceMode::Absolute => ConvergencePolicy::Absolute(args.threshold),
            ConvergenceMode::Relative => ConvergencePolicy::Relative(args.threshold),
        };

        ClusteringConfig {
            filename: args.filename,
            params: RunParams {
                k: args.k,
                max_iterations: args.max_iterations,
                convergence,
                init_method: args.init_method,
            },
            num_runs: args.num_runs,
            seed: args.seed,
            normalize: !args.no_normalize,
            parallel: !args.sequential,
        }
    }
}

impl ClusteringConfig {
    /// Checks the settings against a dataset of `num_points` points.
    pub fn validate(&self, num_points: usize) -> Result<()> {
        if self.params.k == 0 {
            return Err(ClusteringError::Configuration("k must be at least 1".to_string()));
        }
        if self.params.k > num_points {
            return Err(ClusteringError::Configuration(format!(
                "k ({}) exceeds the number of points ({})",
                self.params.k, num_points
            )));
        }
        if self.num_runs == 0 {
            return Err(ClusteringError::Configuration(
                "at least one run is required".to_string(),
            ));
        }
        if self.params.convergence.threshold() <= 0.0 {
            log::warn!(
                "threshold {} is not positive, runs will stop only at the iteration limit",
                self.params.convergence.threshold()
            );
        }
        Ok(())
    }
}
