use super::ValueGen;

/// A value generator that always generates the same value.
pub struct ConstValueGen {
    value: f64,
}

impl ConstValueGen {
    /// Creates a new `ConstValueGen` value generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    ///
    /// # Returns
    /// A new `ConstValueGen` instance.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl ValueGen for ConstValueGen {
    fn sample(&mut self) -> f64 {
        self.value
    }
}
