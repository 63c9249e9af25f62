use parking_lot::Mutex;

use super::Accumulator;

/// Accumulates the averages behind a single lock shared by all workers.
///
/// The lock is only held for the add of one slot, so no contribution is ever
/// lost. The order in which workers reach a slot still varies between runs, so
/// every slot is exact up to floating-point summation order.
#[derive(Debug)]
pub struct BlockingAccumulator {
    slots: usize,
    y_avgs: Mutex<Box<[f64]>>,
}

impl BlockingAccumulator {
    /// Creates a new `BlockingAccumulator`.
    ///
    /// # Arguments
    /// * `y_avgs` - The zeroed buffer of averages, one slot per iteration.
    ///
    /// # Returns
    /// A new `BlockingAccumulator` instance.
    pub fn new(y_avgs: Box<[f64]>) -> Self {
        Self {
            slots: y_avgs.len(),
            y_avgs: Mutex::new(y_avgs),
        }
    }
}

impl Accumulator for BlockingAccumulator {
    fn contribute(&self, iteration: usize, fragment: f64) {
        self.y_avgs.lock()[iteration] += fragment;
    }

    fn len(&self) -> usize {
        self.slots
    }

    fn into_averages(self: Box<Self>) -> Box<[f64]> {
        self.y_avgs.into_inner()
    }
}
