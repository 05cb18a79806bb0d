mod algorithm;
mod centroid;
mod config;
mod convergence;
mod dataset;
mod distance;
mod error;
mod inertia;
mod initialization;
mod load;
mod logger;
mod report;
mod runs;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rand::Rng;

use crate::config::{Args, ClusteringConfig};
use crate::error::{ClusteringError, Result};
use crate::load::load_dataset;
use crate::logger::init_logger;
use crate::runs::{run_all, select_best};

fn kmeans(config: &ClusteringConfig) -> Result<()> {
    let raw = load_dataset(&config.filename)?;
    config.validate(raw.len())?;

    let data = if config.normalize {
        log::info!("Normalizing {} dimensions to [0, 1]", raw.dimension());
        raw.normalized()
    } else {
        raw
    };

    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!(
        "Starting {} runs of k-means with k = {}, {:?} initialization, {:?} convergence (base seed {})",
        config.num_runs,
        config.params.k,
        config.params.init_method,
        config.params.convergence,
        base_seed
    );

    let results = run_all(&data, &config.params, config.num_runs, base_seed, config.parallel)?;
    log::info!("Finished all runs!");
    log::info!(
        "SSE per run: {:?}",
        results.iter().map(|result| result.final_sse).collect::<Vec<_>>()
    );

    let best = select_best(results.clone())?;
    log::info!("Best run is #{} with SSE {}", best.best_run, best.best_final_sse);

    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), &results, &best).map_err(|source| ClusteringError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{}", Args::command().render_usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => err.exit(),
    };

    if let Err(err) = init_logger(args.log_level) {
        eprintln!("Failed to initialize logger: {}", err);
    }

    let config = ClusteringConfig::from(args);
    match kmeans(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
