use std::{
    mem, thread,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{
    accumulation::{Accumulator, BlockingAccumulator, WildAccumulator},
    config::{AccumulatorKind, KernelConfig, ThreadCount},
    error::{KernelErr, Result},
    initialization::RandValueGen,
    partition::{Partition, partition},
    report::Report,
    storage::VectorStore,
    worker::ReductionWorker,
};

/// Drives a single run of the kernel.
///
/// A `KernelRunner` is the configured state: the store is allocated and the
/// partitions are computed. `run` spawns one worker per partition, waits for
/// all of them and yields a `KernelOutcome`.
#[derive(Debug)]
pub struct KernelRunner {
    config: KernelConfig,
    store: VectorStore,
    partitions: Vec<Partition>,
}

impl KernelRunner {
    /// Creates a new `KernelRunner` over an already initialized store.
    ///
    /// # Arguments
    /// * `config` - The validated configuration of the run.
    /// * `store` - The vectors to operate on.
    ///
    /// # Returns
    /// A `KernelErr::LengthMismatch` if the store's sizes differ from the configuration.
    pub fn new(config: KernelConfig, store: VectorStore) -> Result<Self> {
        if store.len() != config.p.get() {
            return Err(KernelErr::LengthMismatch {
                what: "X",
                got: store.len(),
                expected: config.p.get(),
            });
        }

        if store.max_iters() != config.max_iters.get() {
            return Err(KernelErr::LengthMismatch {
                what: "Y_avgs",
                got: store.max_iters(),
                expected: config.max_iters.get(),
            });
        }

        let partitions = partition(store.len(), config.threads);

        Ok(Self {
            config,
            store,
            partitions,
        })
    }

    /// Creates a new `KernelRunner` initializing the store from the configuration's seed.
    ///
    /// # Arguments
    /// * `config` - The validated configuration of the run.
    pub fn seeded(config: KernelConfig) -> Result<Self> {
        let mut value_gen = RandValueGen::unit(config.seed)?;
        let store = VectorStore::generate(config.p, config.max_iters, &mut value_gen)?;
        Self::new(config, store)
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Runs the kernel until every worker has completed all of its iterations.
    ///
    /// Only the spawn to join span is timed.
    ///
    /// # Returns
    /// The final state of the store or a `KernelErr::WorkerPanicked` if any
    /// worker failed, in which case no partial result is returned.
    pub fn run(self) -> Result<KernelOutcome> {
        let Self {
            config,
            mut store,
            partitions,
        } = self;

        let p = store.len();
        let max_iters = store.max_iters();
        let (x, a, y, y_avgs) = store.split_for_run();
        let acc = accumulator(config.policy, y_avgs);

        if config.policy == AccumulatorKind::Wild {
            warn!("running with the wild accumulator, Y_avgs may lose updates");
        }

        info!(
            p = p, threads = config.threads.get(), max_iters = acc.len();
            "running kernel with the {} accumulator", config.policy
        );

        let start = Instant::now();
        let joined = spawn_and_join(&partitions, x, y, a, max_iters, &*acc);
        let elapsed = start.elapsed();

        joined?;
        info!(elapsed_ms = elapsed.as_nanos() as f64 / 1e6; "all workers joined");

        store.restore_averages(acc.into_averages(), max_iters)?;

        Ok(KernelOutcome {
            store,
            threads: config.threads,
            policy: config.policy,
            elapsed,
        })
    }
}

fn accumulator(policy: AccumulatorKind, y_avgs: Box<[f64]>) -> Box<dyn Accumulator> {
    match policy {
        AccumulatorKind::Blocking => Box::new(BlockingAccumulator::new(y_avgs)),
        AccumulatorKind::Wild => Box::new(WildAccumulator::new(y_avgs)),
    }
}

/// Spawns one scoped thread per partition and joins all of them.
///
/// `y` is split into disjoint mutable chunks following the partitions, so each
/// worker receives exclusive access to its own elements.
fn spawn_and_join(
    partitions: &[Partition],
    x: &[f64],
    y: &mut [f64],
    a: f64,
    max_iters: usize,
    acc: &dyn Accumulator,
) -> Result<()> {
    let p = x.len();

    thread::scope(|s| {
        let mut rest = y;
        let mut handles = Vec::with_capacity(partitions.len());

        for part in partitions {
            let (chunk, tail) = mem::take(&mut rest).split_at_mut(part.len());
            rest = tail;

            let worker = ReductionWorker::new(*part, &x[part.range()], chunk, a, p, max_iters);
            let handle = s.spawn(move || worker.run(acc));
            handles.push((part.worker, handle));
        }

        debug!(workers = handles.len(); "workers spawned");

        // Every handle is joined, even after a failure, so the scope itself never panics.
        let mut result = Ok(());
        for (worker, handle) in handles {
            if handle.join().is_err() && result.is_ok() {
                result = Err(KernelErr::WorkerPanicked { worker });
            }
        }

        result
    })
}

/// The joined state of a run, holding the final vectors and the elapsed time.
#[derive(Debug)]
pub struct KernelOutcome {
    pub store: VectorStore,
    pub threads: ThreadCount,
    pub policy: AccumulatorKind,
    pub elapsed: Duration,
}

impl KernelOutcome {
    /// Reads the outcome into a `Report`.
    pub fn report(&self) -> Report {
        Report::new(self)
    }
}
