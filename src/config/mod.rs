mod cli;
mod kernel;

pub use cli::Args;
pub use kernel::{AccumulatorKind, KernelConfig, ThreadCount};
