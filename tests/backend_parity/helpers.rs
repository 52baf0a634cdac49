//! Shared helpers for backend parity tests: client creation and input generation.

use crate::common::{create_cpu_client, create_parallel_client, seeded_rng};
use rand::Rng;
use ragarray::runtime::cpu::{CpuClient, CpuDevice};
use ragarray::runtime::parallel::{ParallelClient, ParallelDevice};

/// CPU baseline plus a parallel client on device `id`
pub fn with_both_backends(
    id: usize,
) -> ((CpuClient, CpuDevice), (ParallelClient, ParallelDevice)) {
    (create_cpu_client(), create_parallel_client(id))
}

/// `n` integers in `[-100, 100)`, reproducible per seed
pub fn random_i64(seed: u64, n: usize) -> Vec<i64> {
    let mut rng = seeded_rng(seed);
    (0..n).map(|_| rng.random_range(-100..100)).collect()
}

/// Row lengths with a heavy tail: mostly short, a few far longer than the rest
pub fn skewed_lengths(seed: u64, rows: usize) -> Vec<usize> {
    let mut rng = seeded_rng(seed);
    (0..rows)
        .map(|_| {
            if rng.random_ratio(1, 20) {
                rng.random_range(2000..6000)
            } else {
                rng.random_range(0..40)
            }
        })
        .collect()
}

/// Assert element-wise equality of the two backends' outputs
pub fn assert_parity<T: PartialEq + std::fmt::Debug>(cpu: &[T], parallel: &[T], op: &str) {
    assert_eq!(
        cpu.len(),
        parallel.len(),
        "parity[{}]: length mismatch: {} vs {}",
        op,
        cpu.len(),
        parallel.len()
    );
    if let Some(i) = cpu.iter().zip(parallel).position(|(a, b)| a != b) {
        panic!(
            "parity[{}] at index {}: {:?} vs {:?}",
            op, i, cpu[i], parallel[i]
        );
    }
}
