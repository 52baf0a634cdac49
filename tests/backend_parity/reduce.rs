// Backend parity tests for ReduceOps trait

use ragarray::array::{Array1, Ragged};
use ragarray::ops::ReduceOps;
use ragarray::runtime::Runtime;
use ragarray::runtime::cpu::CpuRuntime;
use ragarray::runtime::parallel::ParallelRuntime;

use crate::helpers::{assert_parity, random_i64, skewed_lengths, with_both_backends};

fn max_on<R: Runtime, C: ReduceOps<R>>(
    client: &C,
    device: &R::Device,
    rows: &[Vec<i64>],
    default_value: i64,
) -> Vec<i64> {
    let src = Ragged::<R, i64>::from_rows(rows, device).unwrap();
    let mut out = Array1::<R, i64>::new(rows.len(), device).unwrap();
    client.max_per_sublist(&src, default_value, &mut out).unwrap();
    out.to_vec().unwrap()
}

#[test]
fn test_max_per_sublist_parity() {
    let ((cpu, cpu_dev), (par, par_dev)) = with_both_backends(230);
    for seed in [1u64, 2, 3] {
        let rows: Vec<Vec<i64>> = skewed_lengths(seed, 150)
            .into_iter()
            .enumerate()
            .map(|(i, len)| random_i64(seed * 1000 + i as u64, len))
            .collect();
        for default_value in [i64::MIN, 0, 50] {
            assert_parity(
                &max_on::<CpuRuntime, _>(&cpu, &cpu_dev, &rows, default_value),
                &max_on::<ParallelRuntime, _>(&par, &par_dev, &rows, default_value),
                &format!("max_per_sublist seed={seed} default={default_value}"),
            );
        }
    }
}
