// Backend parity tests for TransposeOps trait

use ragarray::array::Array2;
use ragarray::ops::TransposeOps;
use ragarray::runtime::cpu::CpuRuntime;
use ragarray::runtime::parallel::ParallelRuntime;

use crate::helpers::{assert_parity, with_both_backends};

#[test]
fn test_transpose_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(210);
    for (rows, cols) in [(1, 1), (1, 100), (31, 33), (32, 32), (100, 7), (257, 129)] {
        let data: Vec<f32> = (0..rows * cols).map(|i| i as f32 - 0.5).collect();

        let src = Array2::<CpuRuntime, f32>::from_slice(&data, rows, cols, &cpu_dev).unwrap();
        let mut cpu_out = Array2::<CpuRuntime, f32>::new(cols, rows, &cpu_dev).unwrap();
        cpu.transpose(&src, &mut cpu_out).unwrap();

        let src = Array2::<ParallelRuntime, f32>::from_slice(&data, rows, cols, &par_dev).unwrap();
        let mut par_out = Array2::<ParallelRuntime, f32>::new(cols, rows, &par_dev).unwrap();
        par.transpose(&src, &mut par_out).unwrap();

        assert_parity(
            &cpu_out.to_vec().unwrap(),
            &par_out.to_vec().unwrap(),
            &format!("transpose {rows}x{cols}"),
        );
    }
}

#[test]
fn test_transpose_strided_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(211);
    let (rows, cols) = (70, 90);
    let data: Vec<i32> = (0..(rows * cols) as i32).collect();

    let wide = Array2::<CpuRuntime, i32>::from_slice(&data, rows, cols, &cpu_dev).unwrap();
    let src = wide.col_range(5, 40).unwrap();
    let mut cpu_out = Array2::<CpuRuntime, i32>::new(40, rows, &cpu_dev).unwrap();
    cpu.transpose(&src, &mut cpu_out).unwrap();

    let wide = Array2::<ParallelRuntime, i32>::from_slice(&data, rows, cols, &par_dev).unwrap();
    let src = wide.col_range(5, 40).unwrap();
    let mut par_out = Array2::<ParallelRuntime, i32>::new(40, rows, &par_dev).unwrap();
    par.transpose(&src, &mut par_out).unwrap();

    assert_parity(
        &cpu_out.to_vec().unwrap(),
        &par_out.to_vec().unwrap(),
        "transpose strided",
    );
}
