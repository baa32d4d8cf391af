//! Data-parallel execution of a chunk computation over a point batch.
//!
//! The batch is cut into one contiguous chunk per worker (see
//! [`partition`]); each chunk owns a disjoint region of the output buffers, so
//! workers never synchronise. `run_parallel` returns only after every chunk
//! has finished.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::chunk::batch::PointBatch;
use crate::chunk::partition::partition;
use crate::config::TransformConfig;
use crate::error::TransformError;

/// Runs chunk computations on up to `workers` threads.
///
/// With one worker nothing is spawned and every chunk runs on the calling
/// thread.
#[derive(Debug)]
pub struct Scheduler {
    workers: usize,
    pool: Option<ThreadPool>,
}

impl Scheduler {
    /// Build a scheduler for a concurrency cap: 0 means every hardware
    /// thread, 1 means synchronous, N means at most N workers.
    pub fn new(concurrency_cap: usize) -> Result<Self, TransformError> {
        let workers = resolve_workers(concurrency_cap);
        let pool = if workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("geotransform-{i}"))
                .build()
                .map_err(|e| TransformError::Initialization(e.to_string()))?;
            Some(pool)
        } else {
            None
        };

        log::debug!("scheduler ready: cap={concurrency_cap}, workers={workers}");
        Ok(Self { workers, pool })
    }

    pub fn from_config(config: &TransformConfig) -> Result<Self, TransformError> {
        Self::new(config.concurrency_cap)
    }

    /// Single worker on the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            pool: None,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split `batch` into one chunk per worker and run `compute_chunk` on each.
    ///
    /// Every chunk runs to completion even if another fails; the first error
    /// in chunk order is then returned. Output already written by other chunks
    /// is left in place.
    pub fn run_parallel<'a, F, E>(&self, batch: PointBatch<'a>, compute_chunk: F) -> Result<(), E>
    where
        F: Fn(PointBatch<'a>) -> Result<(), E> + Sync,
        E: Send,
    {
        let pool = match &self.pool {
            Some(pool) if !batch.is_empty() => pool,
            _ => return compute_chunk(batch),
        };

        let ranges: Vec<_> = partition(batch.len(), self.workers)
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();
        let chunks = batch.split(&ranges);
        for chunk in &chunks {
            log::trace!("dispatching chunk {:?}", chunk.range());
        }

        let results: Vec<Result<(), E>> =
            pool.install(|| chunks.into_par_iter().map(&compute_chunk).collect());

        results.into_iter().collect()
    }
}

/// Number of workers for a concurrency cap, bounded by the hardware.
fn resolve_workers(concurrency_cap: usize) -> usize {
    let hardware = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    match concurrency_cap {
        0 => hardware,
        cap => cap.min(hardware),
    }
}
