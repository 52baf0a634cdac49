// Backend parity tests for CumulativeOps trait

use ragarray::array::{Array1, Array2, PtrArray};
use ragarray::ops::CumulativeOps;
use ragarray::runtime::Runtime;
use ragarray::runtime::cpu::CpuRuntime;
use ragarray::runtime::parallel::ParallelRuntime;

use crate::helpers::{assert_parity, random_i64, with_both_backends};

// ============================================================================
// Test Utilities
// ============================================================================

/// Scan `data` on one backend; `with_total` appends the trailing total
fn scan_on<R: Runtime, C: CumulativeOps<R>>(
    client: &C,
    device: &R::Device,
    data: &[i64],
    with_total: bool,
) -> Vec<i64> {
    let mut padded = data.to_vec();
    padded.push(0);
    let backing = Array1::<R, i64>::from_slice(&padded, device).unwrap();
    let src = backing.range(0, data.len()).unwrap();
    let mut dest = Array1::<R, i64>::new(data.len() + usize::from(with_total), device).unwrap();
    client.exclusive_sum(&src, &mut dest).unwrap();
    dest.to_vec().unwrap()
}

fn scan_2d_on<R: Runtime, C: CumulativeOps<R>>(
    client: &C,
    device: &R::Device,
    data: &[i64],
    (rows, cols): (usize, usize),
    axis: usize,
    with_total: bool,
) -> Vec<i64> {
    let mut padded = data.to_vec();
    padded.push(0);
    let backing = Array1::<R, i64>::from_slice(&padded, device).unwrap();
    let src = Array2::from_array1(&backing.range(0, rows * cols).unwrap(), rows, cols).unwrap();
    let extra = usize::from(with_total);
    let (out_rows, out_cols) = if axis == 0 {
        (rows + extra, cols)
    } else {
        (rows, cols + extra)
    };
    let mut dest = Array2::<R, i64>::new(out_rows, out_cols, device).unwrap();
    client.exclusive_sum_2d(&src, &mut dest, axis).unwrap();
    dest.to_vec().unwrap()
}

// ============================================================================
// Parity Tests
// ============================================================================

#[test]
fn test_exclusive_sum_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(200);
    for (seed, n) in [(1, 0), (2, 1), (3, 100), (4, 2048), (5, 2049), (6, 7000)] {
        let data = random_i64(seed, n);
        for with_total in [false, true] {
            assert_parity(
                &scan_on::<CpuRuntime, _>(&cpu, &cpu_dev, &data, with_total),
                &scan_on::<ParallelRuntime, _>(&par, &par_dev, &data, with_total),
                &format!("exclusive_sum n={n} total={with_total}"),
            );
        }
    }
}

#[test]
fn test_exclusive_sum_2d_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(201);
    for shape in [(1, 1), (300, 17), (17, 300), (64, 64)] {
        let data = random_i64(shape.0 as u64 * 1000 + shape.1 as u64, shape.0 * shape.1);
        for axis in [0, 1] {
            for with_total in [false, true] {
                let expected =
                    scan_2d_on::<CpuRuntime, _>(&cpu, &cpu_dev, &data, shape, axis, with_total);
                let got =
                    scan_2d_on::<ParallelRuntime, _>(&par, &par_dev, &data, shape, axis, with_total);
                assert_parity(
                    &expected,
                    &got,
                    &format!("exclusive_sum_2d {shape:?} axis={axis} total={with_total}"),
                );
            }
        }
    }
}

#[test]
fn test_exclusive_sum_deref_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(202);
    let data = random_i64(9, 500);
    // Every third element, in reverse
    let picks: Vec<usize> = (0..data.len()).rev().step_by(3).collect();

    let cpu_values = Array1::<CpuRuntime, i64>::from_slice(&data, &cpu_dev).unwrap();
    let entries: Vec<_> = picks.iter().map(|&i| (&cpu_values, i)).collect();
    let cpu_table = PtrArray::from_elements(&entries, &cpu_dev).unwrap();
    let mut cpu_out = Array1::<CpuRuntime, i64>::new(picks.len() + 1, &cpu_dev).unwrap();
    cpu.exclusive_sum_deref(&cpu_table, &mut cpu_out).unwrap();

    let par_values = Array1::<ParallelRuntime, i64>::from_slice(&data, &par_dev).unwrap();
    let entries: Vec<_> = picks.iter().map(|&i| (&par_values, i)).collect();
    let par_table = PtrArray::from_elements(&entries, &par_dev).unwrap();
    let mut par_out = Array1::<ParallelRuntime, i64>::new(picks.len() + 1, &par_dev).unwrap();
    par.exclusive_sum_deref(&par_table, &mut par_out).unwrap();

    assert_parity(
        &cpu_out.to_vec().unwrap(),
        &par_out.to_vec().unwrap(),
        "exclusive_sum_deref",
    );
}
