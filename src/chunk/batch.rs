//! Point batches: parallel input arrays and the output arrays they map to.

use std::mem;
use std::ops::Range;

use crate::error::TransformError;
use crate::transform::Transform;

/// A view over `x`, `y` and the `x_out`, `y_out` buffers they map into.
///
/// All four slices have the same length; [`PointBatch::new`] is the only
/// place that checks it. `offset` is the index of the first point within the
/// batch this one was split from.
#[derive(Debug)]
pub struct PointBatch<'a> {
    offset: usize,
    x: &'a [f64],
    y: &'a [f64],
    x_out: &'a mut [f64],
    y_out: &'a mut [f64],
}

impl<'a> PointBatch<'a> {
    pub fn new(
        x: &'a [f64],
        y: &'a [f64],
        x_out: &'a mut [f64],
        y_out: &'a mut [f64],
    ) -> Result<Self, TransformError> {
        let n = x.len();
        if y.len() != n || x_out.len() != n || y_out.len() != n {
            return Err(TransformError::LengthMismatch {
                x: n,
                y: y.len(),
                x_out: x_out.len(),
                y_out: y_out.len(),
            });
        }
        Ok(Self {
            offset: 0,
            x,
            y,
            x_out,
            y_out,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Index range of this batch within the batch it was split from.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len()
    }

    pub fn inputs(&self) -> (&[f64], &[f64]) {
        (self.x, self.y)
    }

    pub fn outputs_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut *self.x_out, &mut *self.y_out)
    }

    /// Split into sub-batches at the given ranges.
    ///
    /// `ranges` must be contiguous and ascending, starting at 0; points past
    /// the last range are not part of any sub-batch.
    pub fn split(self, ranges: &[Range<usize>]) -> Vec<PointBatch<'a>> {
        let Self {
            offset,
            mut x,
            mut y,
            mut x_out,
            mut y_out,
        } = self;

        let mut parts = Vec::with_capacity(ranges.len());
        let mut consumed = 0;
        for range in ranges {
            debug_assert_eq!(range.start, consumed, "ranges must be contiguous");
            let len = range.len();

            let (x_head, x_tail) = x.split_at(len);
            let (y_head, y_tail) = y.split_at(len);
            let (xo_head, xo_tail) = mem::take(&mut x_out).split_at_mut(len);
            let (yo_head, yo_tail) = mem::take(&mut y_out).split_at_mut(len);

            parts.push(PointBatch {
                offset: offset + range.start,
                x: x_head,
                y: y_head,
                x_out: xo_head,
                y_out: yo_head,
            });

            x = x_tail;
            y = y_tail;
            x_out = xo_tail;
            y_out = yo_tail;
            consumed = range.end;
        }
        parts
    }

    /// Apply `op` to every point, writing into the output buffers.
    pub fn apply<T: Transform + ?Sized>(&mut self, op: &T) {
        let outputs = self.x_out.iter_mut().zip(self.y_out.iter_mut());
        for ((&x, &y), (xo, yo)) in self.x.iter().zip(self.y).zip(outputs) {
            (*xo, *yo) = op.op(x, y);
        }
    }
}
