use log::debug;

use crate::{accumulation::Accumulator, partition::Partition};

/// The unit of work of a single thread.
///
/// It owns a mutable view of `Y` restricted to its partition, so the element
/// updates never race with other workers. Only the contribution of its partial
/// sum goes through the shared `Accumulator`.
pub struct ReductionWorker<'a> {
    partition: Partition,
    x: &'a [f64],
    y: &'a mut [f64],
    a: f64,
    p: usize,
    max_iters: usize,
}

impl<'a> ReductionWorker<'a> {
    /// Creates a new `ReductionWorker`.
    ///
    /// # Arguments
    /// * `partition` - The range of indices this worker owns.
    /// * `x` - The slice of `X` covered by `partition`.
    /// * `y` - The slice of `Y` covered by `partition`.
    /// * `a` - The scalar.
    /// * `p` - The global size of the vectors, the divisor of every partial sum.
    /// * `max_iters` - The amount of iterations to run.
    ///
    /// # Panics
    /// If `x` or `y` don't have the partition's length.
    pub fn new(
        partition: Partition,
        x: &'a [f64],
        y: &'a mut [f64],
        a: f64,
        p: usize,
        max_iters: usize,
    ) -> Self {
        assert_eq!(x.len(), partition.len());
        assert_eq!(y.len(), partition.len());

        Self {
            partition,
            x,
            y,
            a,
            p,
            max_iters,
        }
    }

    /// Runs every iteration, contributing one fragment per iteration to `acc`.
    ///
    /// There is no barrier between iterations, a worker may be several
    /// iterations ahead of the others.
    pub fn run<A>(self, acc: &A)
    where
        A: Accumulator + ?Sized,
    {
        let Self {
            partition,
            x,
            y,
            a,
            p,
            max_iters,
        } = self;

        debug!(worker = partition.worker, ini = partition.ini, end = partition.end; "worker started");

        let p = p as f64;
        for iteration in 0..max_iters {
            let partial = sweep(x, y, a);
            acc.contribute(iteration, partial / p);
        }

        debug!(worker = partition.worker; "worker finished");
    }
}

/// Applies `y = y + a * x` element-wise, returning the sum of the updated `y`.
fn sweep(x: &[f64], y: &mut [f64], a: f64) -> f64 {
    let mut acc = 0.;

    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += a * xi;
        acc += *yi;
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulation::BlockingAccumulator;

    fn whole(len: usize) -> Partition {
        Partition {
            worker: 0,
            ini: 0,
            end: len,
        }
    }

    #[test]
    fn test_sweep() {
        let mut y = [0., 1., 2.];
        let sum = sweep(&[1., 1., 1.], &mut y, 2.);

        assert_eq!(y, [2., 3., 4.]);
        assert_eq!(sum, 9.);
    }

    #[test]
    fn test_run_updates_and_contributes() {
        let x = [1.; 5];
        let mut y = [0.; 5];
        let acc = BlockingAccumulator::new(vec![0.; 3].into_boxed_slice());

        ReductionWorker::new(whole(5), &x, &mut y, 2., 5, 3).run(&acc);

        assert_eq!(y, [6.; 5]);
        assert_eq!(*Box::new(acc).into_averages(), [2., 4., 6.]);
    }

    #[test]
    fn test_divides_by_global_size() {
        let x = [1.; 2];
        let mut y = [0.; 2];
        let acc = BlockingAccumulator::new(vec![0.; 1].into_boxed_slice());
        let partition = Partition {
            worker: 1,
            ini: 2,
            end: 4,
        };

        ReductionWorker::new(partition, &x, &mut y, 1., 4, 1).run(&acc);

        assert_eq!(*Box::new(acc).into_averages(), [0.5]);
    }

    #[test]
    #[should_panic]
    fn test_mismatched_slice() {
        let x = [1.; 2];
        let mut y = [0.; 3];
        ReductionWorker::new(whole(2), &x, &mut y, 1., 2, 1);
    }
}
