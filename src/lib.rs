//! An iterative SAXPY kernel (`Y = Y + a * X`, repeated `max_iters` times) that
//! tracks the mean of `Y` after every sweep.
//!
//! The vectors are split into one contiguous partition per worker. Element
//! updates never cross partitions and need no synchronization, while the per
//! iteration mean is combined across workers by an `Accumulator`: either the
//! exact `BlockingAccumulator` or the racy `WildAccumulator` baseline.

pub mod accumulation;
pub mod config;
pub mod error;
pub mod initialization;
pub mod partition;
pub mod report;
pub mod runner;
pub mod storage;
pub mod worker;

#[cfg(test)]
mod tests;

pub use accumulation::{Accumulator, BlockingAccumulator, WildAccumulator};
pub use config::{AccumulatorKind, Args, KernelConfig, ThreadCount};
pub use error::{KernelErr, Result};
pub use partition::{Partition, partition};
pub use report::Report;
pub use runner::{KernelOutcome, KernelRunner};
pub use storage::VectorStore;
pub use worker::ReductionWorker;
