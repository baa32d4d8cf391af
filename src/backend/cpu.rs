//! Native CPU backend: applies a [`Transform`] over the batch on the
//! scheduler's worker pool.

use crate::backend::Backend;
use crate::chunk::batch::PointBatch;
use crate::chunk::scheduler::Scheduler;
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::transform::Transform;

#[derive(Debug)]
pub struct CpuBackend {
    scheduler: Scheduler,
}

impl CpuBackend {
    pub fn new(config: &TransformConfig) -> Result<Self, TransformError> {
        Ok(Self {
            scheduler: Scheduler::from_config(config)?,
        })
    }

    /// Backend that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            scheduler: Scheduler::sequential(),
        }
    }

    pub fn with_concurrency(concurrency_cap: usize) -> Result<Self, TransformError> {
        Self::new(&TransformConfig::default().with_concurrency_cap(concurrency_cap))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl<T: Transform + ?Sized> Backend<T> for CpuBackend {
    fn run(&self, op: &T, batch: PointBatch<'_>) -> Result<(), TransformError> {
        log::debug!(
            "cpu run: {} points, {} workers, op={}",
            batch.len(),
            self.scheduler.workers(),
            op.name()
        );
        self.scheduler.run_parallel(batch, |mut chunk| {
            chunk.apply(op);
            Ok::<(), TransformError>(())
        })
    }
}
