use std::io::{self, Write};

use itertools::Itertools;

use crate::algorithm::RunResult;
use crate::runs::BestResult;

pub fn write_run<W: Write>(out: &mut W, run_number: usize, result: &RunResult) -> io::Result<()> {
    writeln!(out, "Run {}", run_number)?;
    writeln!(out, "-----")?;
    for (iteration, sse) in result.sse_history.iter().enumerate() {
        writeln!(out, "Iteration {}: SSE = {:.6}", iteration + 1, sse)?;
    }
    writeln!(out, "Initial SSE = {:.6}", result.initial_sse)?;
    writeln!(out, "Final SSE = {:.6}", result.final_sse)?;
    writeln!(
        out,
        "Iterations = {} ({})",
        result.iterations,
        if result.converged { "converged" } else { "iteration limit" }
    )?;
    writeln!(out)
}

pub fn write_best<W: Write>(out: &mut W, best: &BestResult) -> io::Result<()> {
    writeln!(
        out,
        "Best Run: {}: SSE = {:.6} ({} iterations)",
        best.best_run, best.best_final_sse, best.result.iterations
    )?;
    writeln!(out, "Centroids:")?;
    for (cluster, centroid) in best.result.centroids.outer_iter().enumerate() {
        writeln!(
            out,
            "  {} ({} points): {}",
            cluster,
            best.result.counts[cluster],
            centroid.iter().map(|value| format!("{:.6}", value)).join(" ")
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "-------")?;
    writeln!(out, "Best initial SSE: {:.6}", best.best_initial_sse)?;
    writeln!(out, "Best final SSE: {:.6}", best.best_final_sse)?;
    writeln!(out, "Best iteration count: {}", best.best_iterations)
}

pub fn write_report<W: Write>(out: &mut W, results: &[RunResult], best: &BestResult) -> io::Result<()> {
    for (run_index, result) in results.iter().enumerate() {
        write_run(out, run_index + 1, result)?;
    }
    write_best(out, best)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn result() -> RunResult {
        RunResult {
            seed: 3,
            initial_sse: 2.0,
            final_sse: 1.0,
            iterations: 3,
            converged: true,
            sse_history: vec![2.0, 1.0, 1.0],
            centroids: array![[0.0, 0.5], [10.0, 0.5]],
            labels: vec![0, 0, 1, 1],
            counts: vec![2, 2],
        }
    }

    #[test]
    fn run_block_lists_every_iteration() {
        let mut out = Vec::new();
        write_run(&mut out, 1, &result()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Run 1\n-----\n"));
        assert!(text.contains("Iteration 1: SSE = 2.000000\n"));
        assert!(text.contains("Iteration 3: SSE = 1.000000\n"));
        assert!(text.contains("Final SSE = 1.000000\n"));
        assert!(text.contains("Iterations = 3 (converged)\n"));
    }

    #[test]
    fn summary_reports_best_run_and_column_minima() {
        let best = BestResult {
            best_run: 2,
            result: result(),
            best_initial_sse: 0.5,
            best_final_sse: 1.0,
            best_iterations: 2,
        };
        let mut out = Vec::new();
        write_report(&mut out, &[result(), result()], &best).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Run 2\n"));
        assert!(text.contains("Best Run: 2: SSE = 1.000000 (3 iterations)\n"));
        assert!(text.contains("  1 (2 points): 10.000000 0.500000\n"));
        assert!(text.contains("Best initial SSE: 0.500000\n"));
        assert!(text.contains("Best final SSE: 1.000000\n"));
        assert!(text.contains("Best iteration count: 2"));
    }
}
