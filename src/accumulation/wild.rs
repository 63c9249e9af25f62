use std::sync::atomic::{AtomicU64, Ordering};

use super::Accumulator;

/// Accumulates the averages without any synchronization between workers.
///
/// It embraces race conditions: a contribution reads the slot, adds the fragment
/// and writes it back as separate steps, so two workers adding to the same slot
/// at once can lose one of the updates. The value of a contended slot is
/// therefore undefined and this accumulator doesn't preserve correctness, it
/// only serves as a baseline to compare the cost of `BlockingAccumulator`.
///
/// Slots are kept as the bit patterns of `f64` values in relaxed atomics, which
/// keeps individual loads and stores whole while leaving the read-modify-write
/// unprotected.
#[derive(Debug)]
pub struct WildAccumulator {
    y_avgs: Box<[AtomicU64]>,
}

impl WildAccumulator {
    /// Creates a new `WildAccumulator`.
    ///
    /// # Arguments
    /// * `y_avgs` - The zeroed buffer of averages, one slot per iteration.
    ///
    /// # Returns
    /// A new `WildAccumulator` instance.
    pub fn new(y_avgs: Box<[f64]>) -> Self {
        let y_avgs = y_avgs
            .iter()
            .map(|avg| AtomicU64::new(avg.to_bits()))
            .collect();

        Self { y_avgs }
    }
}

impl Accumulator for WildAccumulator {
    fn contribute(&self, iteration: usize, fragment: f64) {
        let slot = &self.y_avgs[iteration];
        let current = f64::from_bits(slot.load(Ordering::Relaxed));
        slot.store((current + fragment).to_bits(), Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.y_avgs.len()
    }

    fn into_averages(self: Box<Self>) -> Box<[f64]> {
        self.y_avgs
            .into_iter()
            .map(|slot| f64::from_bits(slot.into_inner()))
            .collect()
    }
}
