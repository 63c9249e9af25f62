use std::fmt;

use serde::Serialize;

use crate::{
    config::{AccumulatorKind, KernelConfig, ThreadCount},
    runner::KernelOutcome,
};

/// How many trailing values of `Y` and `Y_avgs` a report holds.
const TAIL: usize = 3;

/// The observable result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub p: usize,
    pub max_iters: usize,
    pub threads: ThreadCount,
    pub policy: AccumulatorKind,
    pub elapsed_ms: f64,
    pub y_tail: Vec<f64>,
    pub y_avgs_tail: Vec<f64>,
}

impl Report {
    /// Creates a new `Report` from the outcome of a run.
    ///
    /// Tails hold fewer than three values when the vectors are shorter.
    pub fn new(outcome: &KernelOutcome) -> Self {
        let store = &outcome.store;

        Self {
            p: store.len(),
            max_iters: store.max_iters(),
            threads: outcome.threads,
            policy: outcome.policy,
            elapsed_ms: outcome.elapsed.as_nanos() as f64 / 1e6,
            y_tail: tail(store.y()).to_vec(),
            y_avgs_tail: tail(store.y_avgs()).to_vec(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution time: {:.6} ms", self.elapsed_ms)?;
        writeln!(f, "Last {TAIL} values of Y: {}", join(&self.y_tail))?;
        write!(f, "Last {TAIL} values of Y_avgs: {}", join(&self.y_avgs_tail))
    }
}

fn tail(values: &[f64]) -> &[f64] {
    &values[values.len().saturating_sub(TAIL)..]
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats the parameters of a run the way they're echoed before it starts.
pub fn params_line(config: &KernelConfig) -> String {
    format!(
        "p = {}, seed = {}, n_threads = {}, max_iters = {}, policy = {}",
        config.p, config.seed, config.threads, config.max_iters, config.policy
    )
}

/// Formats a whole vector for the debug dump, e.g. `vector X= [ 1.000000, 2.000000 ]`.
pub fn dump_vector(label: &str, values: &[f64]) -> String {
    format!("{label}= [ {} ]", join(values))
}
