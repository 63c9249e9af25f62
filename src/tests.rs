#![cfg(test)]

use std::{num::NonZeroUsize, thread};

use crate::{
    config::{AccumulatorKind, KernelConfig, ThreadCount},
    error::KernelErr,
    runner::{KernelOutcome, KernelRunner},
    storage::VectorStore,
};

fn run_with(
    x: Vec<f64>,
    y: Vec<f64>,
    a: f64,
    max_iters: usize,
    threads: ThreadCount,
    policy: AccumulatorKind,
) -> KernelOutcome {
    let p = x.len();
    let store = VectorStore::from_parts(x, y, a, NonZeroUsize::new(max_iters).unwrap()).unwrap();
    let config = KernelConfig::new(p, 0, threads.get(), max_iters, policy).unwrap();

    KernelRunner::new(config, store).unwrap().run().unwrap()
}

fn run_seeded(p: usize, seed: u64, threads: ThreadCount, policy: AccumulatorKind) -> KernelOutcome {
    let config = KernelConfig::new(p, seed, threads.get(), 20, policy).unwrap();
    KernelRunner::seeded(config).unwrap().run().unwrap()
}

/// The exact mean of `Y` after every iteration, computed sequentially.
fn reference_averages(x: &[f64], y: &[f64], a: f64, max_iters: usize) -> Vec<f64> {
    let mut y = y.to_vec();
    let p = y.len() as f64;

    (0..max_iters)
        .map(|_| {
            y.iter_mut().zip(x).for_each(|(yi, xi)| *yi += a * xi);
            y.iter().sum::<f64>() / p
        })
        .collect()
}

fn assert_close(got: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.);
    assert!(
        (got - expected).abs() <= tolerance,
        "got {got}, expected {expected}"
    );
}

#[test]
fn test_linearity_of_y() {
    for threads in ThreadCount::ALL {
        let outcome = run_with(
            vec![1.; 5],
            vec![0.; 5],
            2.,
            3,
            threads,
            AccumulatorKind::Blocking,
        );

        assert_eq!(outcome.store.y(), [6.; 5], "threads = {threads}");
    }
}

#[test]
fn test_linearity_with_seeded_vectors() {
    const MAX_ITERS: usize = 20;

    let config = KernelConfig::new(257, 5, 4, MAX_ITERS, AccumulatorKind::Blocking).unwrap();
    let runner = KernelRunner::seeded(config).unwrap();
    let initial = runner.store().clone();
    let outcome = runner.run().unwrap();

    let a = initial.a();
    for (i, y) in outcome.store.y().iter().enumerate() {
        let mut expected = initial.y()[i];
        for _ in 0..MAX_ITERS {
            expected += a * initial.x()[i];
        }
        assert_eq!(*y, expected, "index {i}");
    }
}

#[test]
fn test_exact_mean_under_blocking_policy() {
    for threads in [ThreadCount::One, ThreadCount::Two, ThreadCount::Four] {
        let outcome = run_with(
            vec![1.; 4],
            vec![0.; 4],
            1.,
            2,
            threads,
            AccumulatorKind::Blocking,
        );

        assert_eq!(outcome.store.y_avgs(), [1., 2.], "threads = {threads}");
    }

    let outcome = run_with(
        vec![1.; 8],
        vec![0.; 8],
        1.,
        2,
        ThreadCount::Eight,
        AccumulatorKind::Blocking,
    );
    assert_eq!(outcome.store.y_avgs(), [1., 2.]);
}

#[test]
fn test_blocking_policy_matches_reference_mean() {
    const MAX_ITERS: usize = 20;

    for threads in ThreadCount::ALL {
        let config =
            KernelConfig::new(1_003, 11, threads.get(), MAX_ITERS, AccumulatorKind::Blocking)
                .unwrap();
        let runner = KernelRunner::seeded(config).unwrap();
        let initial = runner.store().clone();
        let outcome = runner.run().unwrap();

        let expected = reference_averages(initial.x(), initial.y(), initial.a(), MAX_ITERS);
        for (got, expected) in outcome.store.y_avgs().iter().zip(expected) {
            assert_close(*got, expected);
        }
    }
}

#[test]
fn test_final_y_is_independent_of_thread_count() {
    let baseline = run_seeded(10_001, 3, ThreadCount::One, AccumulatorKind::Blocking);

    for threads in ThreadCount::ALL {
        for policy in [AccumulatorKind::Blocking, AccumulatorKind::Wild] {
            let outcome = run_seeded(10_001, 3, threads, policy);
            assert_eq!(outcome.store.y(), baseline.store.y(), "threads = {threads}");
        }
    }
}

#[test]
fn test_wild_policy_is_exact_with_a_single_worker() {
    let blocking = run_seeded(4_096, 8, ThreadCount::One, AccumulatorKind::Blocking);
    let wild = run_seeded(4_096, 8, ThreadCount::One, AccumulatorKind::Wild);

    assert_eq!(wild.store.y_avgs(), blocking.store.y_avgs());
}

#[test]
fn test_wild_policy_may_lose_updates_but_never_invents_them() {
    // Contributions are positive, so lost updates can only lower a slot.
    let exact = run_seeded(64, 2, ThreadCount::Eight, AccumulatorKind::Blocking);

    for _ in 0..50 {
        let wild = run_seeded(64, 2, ThreadCount::Eight, AccumulatorKind::Wild);

        for (got, expected) in wild.store.y_avgs().iter().zip(exact.store.y_avgs()) {
            assert!(*got > 0.);
            assert!(*got <= expected + 1e-9 * expected, "{got} > {expected}");
        }
    }
}

#[test]
fn test_wild_policy_is_not_reproducible_across_runs() {
    const RUNS: usize = 30;

    if thread::available_parallelism().map_or(1, NonZeroUsize::get) < 2 {
        return;
    }

    let bits = |outcome: &KernelOutcome| -> Vec<u64> {
        outcome.store.y_avgs().iter().map(|avg| avg.to_bits()).collect()
    };

    let first = bits(&run_seeded(100_000, 4, ThreadCount::Eight, AccumulatorKind::Wild));
    let diverged = (1..RUNS).any(|_| {
        bits(&run_seeded(100_000, 4, ThreadCount::Eight, AccumulatorKind::Wild)) != first
    });

    assert!(diverged, "{RUNS} wild runs produced identical averages");
}

#[test]
fn test_more_workers_than_elements() {
    let outcome = run_with(
        vec![1.; 4],
        vec![1.; 4],
        1.,
        2,
        ThreadCount::Eight,
        AccumulatorKind::Blocking,
    );

    assert_eq!(outcome.store.y(), [3.; 4]);
    assert_eq!(outcome.store.y_avgs(), [2., 3.]);
}

#[test]
fn test_unsupported_thread_count_does_no_work() {
    let result = KernelConfig::new(10, 1, 3, 10, AccumulatorKind::Blocking);
    assert!(matches!(result, Err(KernelErr::UnsupportedThreadCount(3))));
}

#[test]
fn test_report_of_a_run() {
    let outcome = run_with(
        vec![1.; 4],
        vec![0.; 4],
        2.,
        3,
        ThreadCount::Two,
        AccumulatorKind::Blocking,
    );
    let report = outcome.report();

    assert_eq!(report.p, 4);
    assert_eq!(report.max_iters, 3);
    assert_eq!(report.y_tail, [6.; 3]);
    assert_eq!(report.y_avgs_tail, [2., 4., 6.]);
    assert!(report.elapsed_ms >= 0.);
}
