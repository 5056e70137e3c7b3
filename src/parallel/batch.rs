//! Batch distribution for parallel simulation.
//!
//! The comparison runner takes one candidate per parallel task; these helpers
//! cut a candidate list into ranges so long runs can report progress between
//! batches.

use crate::combat::damage::SimulatorError;
use crate::compare::{run_comparison_parallel, ComparisonResult};
use crate::data::build::BuildEntry;
use crate::parallel::pool::WorkerPool;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run a comparison in `num_batches` chunks under `pool`, invoking
/// `on_progress(done, total)` after each chunk. Result order matches input.
pub fn run_comparison_batches<F>(
    entries: &[BuildEntry],
    rounds: u32,
    seed: u64,
    num_batches: usize,
    pool: &WorkerPool,
    mut on_progress: F,
) -> Result<Vec<ComparisonResult>, SimulatorError>
where
    F: FnMut(usize, usize),
{
    let total = entries.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    on_progress(0, total);

    let mut results = Vec::with_capacity(total);
    for (start, end) in batch_ranges(total, num_batches) {
        let batch = &entries[start..end];
        let batch_results = pool.install(|| run_comparison_parallel(batch, rounds, seed))?;
        results.extend(batch_results);
        on_progress(end, total);
    }
    Ok(results)
}
