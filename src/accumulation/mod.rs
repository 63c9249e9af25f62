mod accumulator;
mod blocking;
mod wild;

pub use accumulator::Accumulator;
pub use blocking::BlockingAccumulator;
pub use wild::WildAccumulator;
