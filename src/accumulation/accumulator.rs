/// Combines the workers' partial averages into the per iteration averages `Y_avgs`.
///
/// Every slot starts at `0.0` and contributions are added to it, never overwritten.
pub trait Accumulator: Send + Sync {
    /// Adds `fragment` into the slot of `iteration`.
    ///
    /// Each worker calls this exactly once per iteration.
    ///
    /// # Arguments
    /// * `iteration` - The index of the iteration the fragment belongs to.
    /// * `fragment` - The worker's partial sum already divided by the global vector size.
    ///
    /// # Panics
    /// If `iteration` is out of bounds.
    fn contribute(&self, iteration: usize, fragment: f64);

    /// Returns the amount of iteration slots.
    fn len(&self) -> usize;

    /// Consumes the accumulator returning the accumulated averages.
    fn into_averages(self: Box<Self>) -> Box<[f64]>;
}
