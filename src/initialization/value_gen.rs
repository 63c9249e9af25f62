/// A `ValueGen` generates the initial values of the kernel's vectors and scalar.
pub trait ValueGen {
    /// Should sample the next value of the sequence.
    ///
    /// # Returns
    /// The next initial value.
    fn sample(&mut self) -> f64;
}
