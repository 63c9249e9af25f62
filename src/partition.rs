//! Splits the vectors into one contiguous range per worker.
//!
//! Boundaries follow `ini_j = floor(j * p / k)`, so the ranges tile `[0, p)`
//! without gaps or overlaps and their sizes differ by at most one element.

use std::ops::Range;

use crate::config::ThreadCount;

/// A half-open range `[ini, end)` of vector indices owned by a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub worker: usize,
    pub ini: usize,
    pub end: usize,
}

impl Partition {
    /// Returns the amount of indices in this partition.
    pub fn len(&self) -> usize {
        self.end - self.ini
    }

    pub fn is_empty(&self) -> bool {
        self.ini == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.ini..self.end
    }
}

/// Computes the partitions of `p` elements among `threads` workers.
///
/// # Arguments
/// * `p` - The total amount of elements.
/// * `threads` - The amount of workers.
///
/// # Returns
/// Exactly `threads` partitions, ordered by worker index. If `p` is smaller
/// than the amount of workers some of them are empty.
pub fn partition(p: usize, threads: ThreadCount) -> Vec<Partition> {
    let k = threads.get();

    (0..k)
        .map(|worker| Partition {
            worker,
            ini: boundary(worker, p, k),
            end: boundary(worker + 1, p, k),
        })
        .collect()
}

/// `floor(j * p / k)` computed in 128 bits so `j * p` can't overflow.
fn boundary(j: usize, p: usize, k: usize) -> usize {
    (j as u128 * p as u128 / k as u128) as usize
}
