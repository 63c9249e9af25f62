use clap::Parser;

use super::{AccumulatorKind, KernelConfig};
use crate::error::Result;

/// Iterative SAXPY kernel, `Y = Y + a * X` repeated `max_iters` times while
/// tracking the mean of `Y` after every sweep.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Vector size
    #[arg(short = 'p', long, env = "SAXPY_VECTOR_SIZE", default_value_t = KernelConfig::DEFAULT_P)]
    pub vector_size: usize,

    /// Seed of the vector initialization
    #[arg(short, long, env = "SAXPY_SEED", default_value_t = KernelConfig::DEFAULT_SEED)]
    pub seed: u64,

    /// Number of worker threads: 1, 2, 4 or 8
    #[arg(short = 'n', long, env = "SAXPY_THREADS", default_value_t = KernelConfig::DEFAULT_THREADS)]
    pub threads: usize,

    /// Maximum iterations
    #[arg(short = 'i', long, env = "SAXPY_MAX_ITERS", default_value_t = KernelConfig::DEFAULT_MAX_ITERS)]
    pub max_iters: usize,

    /// How partial sums are combined across workers
    #[arg(long, env = "SAXPY_POLICY", value_enum, default_value_t = AccumulatorKind::Blocking)]
    pub policy: AccumulatorKind,

    /// Print the vectors before and after the run
    #[arg(long)]
    pub dump: bool,

    /// Print the report as json
    #[arg(long)]
    pub json: bool,

    /// Run every supported thread count with the same seed
    #[arg(long)]
    pub sweep: bool,
}

impl Args {
    /// Validates the raw arguments into a `KernelConfig`.
    pub fn config(&self) -> Result<KernelConfig> {
        KernelConfig::new(
            self.vector_size,
            self.seed,
            self.threads,
            self.max_iters,
            self.policy,
        )
    }
}
