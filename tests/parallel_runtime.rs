//! Integration tests for the parallel runtime: stream ordering, failure
//! reporting and scratch accounting
#![cfg(feature = "parallel")]

mod common;

use common::create_parallel_client;
use ragarray::array::{Array1, Ragged};
use ragarray::error::Error;
use ragarray::ops::{CumulativeOps, ReduceOps};
use ragarray::runtime::parallel::{LaunchConfig, ParallelDevice, ParallelRuntime};
use ragarray::runtime::{Allocator, Device, DeviceType, Runtime, RuntimeClient};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Device Identity
// ============================================================================

#[test]
fn test_device_identity() {
    let a = ParallelDevice::with_workers(160, 3);
    let b = ParallelDevice::new(160);
    let c = ParallelDevice::new(161);

    assert!(a.is_same(&b));
    assert!(!a.is_same(&c));
    assert_eq!(a.name(), "parallel:160");
    // The first configuration of an id wins
    assert_eq!(b.num_workers(), 3);
    assert_eq!(ParallelRuntime::device_type(), DeviceType::Parallel);
}

// ============================================================================
// Stream Semantics
// ============================================================================

#[test]
fn test_launches_run_in_submission_order() {
    let (client, _device) = create_parallel_client(162);
    let counter = Arc::new(AtomicUsize::new(0));

    for step in 0..10 {
        let counter = Arc::clone(&counter);
        client
            .launch(
                "ordered_step",
                LaunchConfig::linear("ordered_step", 1, 1).unwrap(),
                move |_| {
                    // Each launch sees every earlier launch completed
                    assert_eq!(counter.load(Ordering::SeqCst), step);
                    counter.fetch_add(1, Ordering::SeqCst);
                },
            )
            .unwrap();
    }
    client.synchronize().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_eval_covers_every_index_once() {
    let (client, _device) = create_parallel_client(163);
    let n = 1000;
    let hits: Arc<Vec<AtomicUsize>> = Arc::new((0..n).map(|_| AtomicUsize::new(0)).collect());

    let seen = Arc::clone(&hits);
    client
        .eval("count_hits", n, move |i| {
            seen[i].fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
    client.synchronize().unwrap();

    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn test_kernel_failure_reported_on_synchronize() {
    let (client, _device) = create_parallel_client(164);
    client
        .launch(
            "always_fails",
            LaunchConfig::linear("always_fails", 2, 4).unwrap(),
            |_| panic!("bad kernel"),
        )
        .unwrap();

    let err = client.synchronize().unwrap_err();
    assert!(
        matches!(err, Error::KernelFailed { kernel: "always_fails", .. }),
        "got {err:?}"
    );
    // Reported once; the stream keeps accepting work
    client.synchronize().unwrap();
    let r = Array1::<ParallelRuntime, i32>::from_slice(&[1, 2], client.device()).unwrap();
    assert_eq!(r.to_vec().unwrap(), vec![1, 2]);
}

#[test]
fn test_oversized_block_rejected_at_launch() {
    let (client, _device) = create_parallel_client(165);
    let err = LaunchConfig::linear("too_wide", 1, 2048)
        .and_then(|config| client.launch("too_wide", config, |_| {}))
        .unwrap_err();
    assert!(matches!(err, Error::LaunchFailed { .. }), "got {err:?}");
}

// ============================================================================
// Scratch Accounting
// ============================================================================

#[test]
fn test_scratch_released_after_operations() {
    let (client, device) = create_parallel_client(166);

    let n = 20_000;
    let src = Array1::<ParallelRuntime, i64>::from_slice(&vec![1; n], &device).unwrap();
    let mut dest = Array1::<ParallelRuntime, i64>::new(n, &device).unwrap();
    client.exclusive_sum(&src, &mut dest).unwrap();
    assert_eq!(dest.to_vec().unwrap()[n - 1], (n - 1) as i64);

    let rows: Vec<Vec<i64>> = (0..64).map(|i| (0..i).collect()).collect();
    let ragged = Ragged::<ParallelRuntime, i64>::from_rows(&rows, &device).unwrap();
    let mut out = Array1::<ParallelRuntime, i64>::new(64, &device).unwrap();
    client.max_per_sublist(&ragged, -1, &mut out).unwrap();
    assert_eq!(out.to_vec().unwrap()[63], 62);

    client.synchronize().unwrap();
    assert_eq!(client.allocator().allocated_bytes(), 0);
}
