// Backend parity tests for AppendOps trait

use ragarray::array::Array1;
use ragarray::ops::AppendOps;
use ragarray::runtime::Runtime;
use ragarray::runtime::cpu::CpuRuntime;
use ragarray::runtime::parallel::ParallelRuntime;

use crate::helpers::{assert_parity, random_i64, skewed_lengths, with_both_backends};

fn append_on<R: Runtime, C: AppendOps<R>>(
    client: &C,
    device: &R::Device,
    parts: &[Vec<i64>],
) -> Vec<i64> {
    let arrays: Vec<Array1<R, i64>> = parts
        .iter()
        .map(|p| Array1::from_slice(p, device).unwrap())
        .collect();
    let refs: Vec<&Array1<R, i64>> = arrays.iter().collect();
    client.append(&refs).unwrap().to_vec().unwrap()
}

fn parts_with_lengths(seed: u64, lengths: &[usize]) -> Vec<Vec<i64>> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| random_i64(seed + i as u64, len))
        .collect()
}

#[test]
fn test_append_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(220);
    let cases: Vec<(&str, Vec<usize>)> = vec![
        ("single", vec![5]),
        ("balanced", vec![100; 30]),
        ("with empties", vec![0, 3, 0, 0, 9, 0]),
        ("skewed", skewed_lengths(21, 200)),
    ];

    for (name, lengths) in cases {
        let parts = parts_with_lengths(100, &lengths);
        assert_parity(
            &append_on::<CpuRuntime, _>(&cpu, &cpu_dev, &parts),
            &append_on::<ParallelRuntime, _>(&par, &par_dev, &parts),
            &format!("append {name}"),
        );
    }
}
