//! Backend dispatch: the `run` entry point over a point batch.

pub mod cpu;
pub mod reference;

use crate::chunk::batch::PointBatch;
use crate::error::TransformError;

pub use cpu::CpuBackend;
pub use reference::ReferenceBackend;

/// Something that can apply an operation of type `T` to a point batch.
///
/// Backends share one call signature so their results can be compared
/// point for point.
pub trait Backend<T: ?Sized> {
    fn run(&self, op: &T, batch: PointBatch<'_>) -> Result<(), TransformError>;
}

/// Public entry point binding a backend to caller-owned coordinate arrays.
#[derive(Debug)]
pub struct Transformer<B> {
    backend: B,
}

impl<B> Transformer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Transform `(x, y)` into freshly allocated output arrays.
    pub fn run<T>(&self, op: &T, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>), TransformError>
    where
        T: ?Sized,
        B: Backend<T>,
    {
        let mut x_out = vec![0.0; x.len()];
        let mut y_out = vec![0.0; x.len()];
        self.run_into(op, x, y, &mut x_out, &mut y_out)?;
        Ok((x_out, y_out))
    }

    /// Transform `(x, y)` into caller-provided output buffers.
    ///
    /// All four slices must have the same length. On success every output
    /// index has been written; the buffers may be reused immediately.
    pub fn run_into<T>(
        &self,
        op: &T,
        x: &[f64],
        y: &[f64],
        x_out: &mut [f64],
        y_out: &mut [f64],
    ) -> Result<(), TransformError>
    where
        T: ?Sized,
        B: Backend<T>,
    {
        let batch = PointBatch::new(x, y, x_out, y_out)?;
        self.backend.run(op, batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Scale;

    #[test]
    fn test_run_allocates_outputs() {
        let t = Transformer::new(CpuBackend::sequential());
        let (xo, yo) = t.run(&Scale::new(2.0), &[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(xo, vec![2.0, 4.0]);
        assert_eq!(yo, vec![6.0, 8.0]);
    }

    #[test]
    fn test_run_rejects_uneven_inputs() {
        let t = Transformer::new(CpuBackend::sequential());
        let err = t.run(&Scale::new(2.0), &[1.0, 2.0], &[3.0]).unwrap_err();
        assert!(matches!(err, TransformError::LengthMismatch { x: 2, y: 1, .. }));
    }

    #[test]
    fn test_run_into_rejects_short_output() {
        let t = Transformer::new(CpuBackend::sequential());
        let mut xo = [0.0; 2];
        let mut yo = [0.0; 1];
        let err = t
            .run_into(&Scale::new(2.0), &[1.0, 2.0], &[3.0, 4.0], &mut xo, &mut yo)
            .unwrap_err();
        assert!(matches!(err, TransformError::LengthMismatch { y_out: 1, .. }));
        assert_eq!(xo, [0.0, 0.0]);
    }

    #[test]
    fn test_empty_batch() {
        let t = Transformer::new(CpuBackend::sequential());
        let (xo, yo) = t.run(&Scale::new(2.0), &[], &[]).unwrap();
        assert!(xo.is_empty() && yo.is_empty());
    }
}
