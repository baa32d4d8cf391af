//! Partitioning of a point range into per-worker chunks.

use std::ops::Range;

/// Divide `[0, total)` into `workers` contiguous, disjoint, ordered chunks.
///
/// Every chunk holds `total / workers` points except the last, which also
/// takes the `total % workers` remainder, so the chunks always cover the
/// whole range. When `total < workers` the leading chunks are empty.
/// A `workers` of 0 is treated as 1.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let per_worker = total / workers;

    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let end = if i + 1 == workers {
            total
        } else {
            start + per_worker
        };
        chunks.push(start..end);
        start = end;
    }
    chunks
}
