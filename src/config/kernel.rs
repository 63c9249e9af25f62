use std::{fmt, num::NonZeroUsize};

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{KernelErr, Result};

/// The amount of workers a run is partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "usize")]
pub enum ThreadCount {
    One,
    Two,
    Four,
    Eight,
}

impl ThreadCount {
    /// Every supported thread count, in ascending order.
    pub const ALL: [ThreadCount; 4] = [
        ThreadCount::One,
        ThreadCount::Two,
        ThreadCount::Four,
        ThreadCount::Eight,
    ];

    /// Returns the amount of workers.
    pub fn get(self) -> usize {
        match self {
            ThreadCount::One => 1,
            ThreadCount::Two => 2,
            ThreadCount::Four => 4,
            ThreadCount::Eight => 8,
        }
    }
}

impl TryFrom<usize> for ThreadCount {
    type Error = KernelErr;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            1 => Ok(ThreadCount::One),
            2 => Ok(ThreadCount::Two),
            4 => Ok(ThreadCount::Four),
            8 => Ok(ThreadCount::Eight),
            n => Err(KernelErr::UnsupportedThreadCount(n)),
        }
    }
}

impl From<ThreadCount> for usize {
    fn from(value: ThreadCount) -> Self {
        value.get()
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// How the workers' partial sums are combined into the per iteration averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccumulatorKind {
    /// Every contribution is guarded by a single mutex.
    #[default]
    Blocking,
    /// Contributions race each other, updates may be lost.
    Wild,
}

impl fmt::Display for AccumulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulatorKind::Blocking => f.write_str("blocking"),
            AccumulatorKind::Wild => f.write_str("wild"),
        }
    }
}

/// A validated configuration for a single kernel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    pub p: NonZeroUsize,
    pub seed: u64,
    pub threads: ThreadCount,
    pub max_iters: NonZeroUsize,
    pub policy: AccumulatorKind,
}

impl KernelConfig {
    pub const DEFAULT_P: usize = 10_000_000;
    pub const DEFAULT_SEED: u64 = 1;
    pub const DEFAULT_THREADS: usize = 8;
    pub const DEFAULT_MAX_ITERS: usize = 1000;

    /// Creates a new `KernelConfig` from raw values.
    ///
    /// # Arguments
    /// * `p` - The size of the vectors.
    /// * `seed` - The seed used to initialize the vectors.
    /// * `n_threads` - The amount of workers, must be 1, 2, 4 or 8.
    /// * `max_iters` - The amount of update sweeps.
    /// * `policy` - The accumulation policy.
    ///
    /// # Returns
    /// The configuration or a `KernelErr` if any of the values is out of range.
    pub fn new(
        p: usize,
        seed: u64,
        n_threads: usize,
        max_iters: usize,
        policy: AccumulatorKind,
    ) -> Result<Self> {
        let p = NonZeroUsize::new(p).ok_or(KernelErr::EmptyVector)?;
        let max_iters = NonZeroUsize::new(max_iters).ok_or(KernelErr::NoIterations)?;
        let threads = ThreadCount::try_from(n_threads)?;

        Ok(Self {
            p,
            seed,
            threads,
            max_iters,
            policy,
        })
    }

    /// Returns a copy of this configuration using a different amount of workers.
    pub fn with_threads(self, threads: ThreadCount) -> Self {
        Self { threads, ..self }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        // SAFETY: The defaults are non zero constants.
        Self {
            p: NonZeroUsize::new(Self::DEFAULT_P).unwrap(),
            seed: Self::DEFAULT_SEED,
            threads: ThreadCount::Eight,
            max_iters: NonZeroUsize::new(Self::DEFAULT_MAX_ITERS).unwrap(),
            policy: AccumulatorKind::Blocking,
        }
    }
}
