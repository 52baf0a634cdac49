//! Common test utilities
#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use ragarray::runtime::Runtime;
use ragarray::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "parallel")]
use ragarray::runtime::parallel::{ParallelClient, ParallelDevice, ParallelRuntime};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Create a parallel client on device `id` with a small worker pool
///
/// Tests running concurrently in one binary should use distinct ids so their
/// streams do not interleave.
#[cfg(feature = "parallel")]
pub fn create_parallel_client(id: usize) -> (ParallelClient, ParallelDevice) {
    let device = ParallelDevice::with_workers(id, 4);
    let client = ParallelRuntime::default_client(&device);
    (client, device)
}

/// Deterministic generator for reproducible inputs
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Reference exclusive sum with an optional trailing total
pub fn reference_exclusive_sum(src: &[i64], with_total: bool) -> Vec<i64> {
    let mut out = Vec::with_capacity(src.len() + 1);
    let mut acc = 0i64;
    for &v in src {
        out.push(acc);
        acc += v;
    }
    if with_total {
        out.push(acc);
    }
    out
}

/// Row-major transpose of a packed `rows x cols` matrix
pub fn reference_transpose<T: Copy>(data: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for c in 0..cols {
        for r in 0..rows {
            out.push(data[r * cols + c]);
        }
    }
    out
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
