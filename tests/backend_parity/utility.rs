// Backend parity tests for UtilityOps trait

use ragarray::array::Array2;
use ragarray::ops::UtilityOps;
use ragarray::runtime::cpu::CpuRuntime;
use ragarray::runtime::parallel::ParallelRuntime;

use crate::common::seeded_rng;
use crate::helpers::{assert_parity, with_both_backends};

#[test]
fn test_range_parity() {
    let ((cpu, _), (par, _)) = with_both_backends(240);
    for (dim, first, inc) in [(0usize, 0i32, 1i32), (1, 5, 2), (3000, -7, 3)] {
        assert_parity(
            &cpu.range(dim, first, inc).unwrap().to_vec().unwrap(),
            &par.range(dim, first, inc).unwrap().to_vec().unwrap(),
            &format!("range dim={dim}"),
        );
    }
}

#[test]
fn test_rand_uniform_parity() {
    let ((cpu, _), (par, _)) = with_both_backends(241);
    let cpu_out = cpu
        .rand_uniform_with_rng(&mut seeded_rng(13), 1000, -5i32, 5)
        .unwrap();
    let par_out = par
        .rand_uniform_with_rng(&mut seeded_rng(13), 1000, -5i32, 5)
        .unwrap();
    assert_parity(
        &cpu_out.to_vec().unwrap(),
        &par_out.to_vec().unwrap(),
        "rand_uniform",
    );
}

#[test]
fn test_to_contiguous_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(242);
    let (rows, cols) = (33, 65);
    let data: Vec<f64> = (0..rows * cols).map(|i| i as f64 * 0.25).collect();

    let wide = Array2::<CpuRuntime, f64>::from_slice(&data, rows, cols, &cpu_dev).unwrap();
    let cpu_out = cpu.to_contiguous(&wide.col_range(3, 50).unwrap()).unwrap();

    let wide = Array2::<ParallelRuntime, f64>::from_slice(&data, rows, cols, &par_dev).unwrap();
    let par_out = par.to_contiguous(&wide.col_range(3, 50).unwrap()).unwrap();

    assert!(cpu_out.is_contiguous() && par_out.is_contiguous());
    assert_parity(
        &cpu_out.to_vec().unwrap(),
        &par_out.to_vec().unwrap(),
        "to_contiguous",
    );
}
