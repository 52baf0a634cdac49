//! Parallel implementation of append.

use crate::array::Array1;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::AppendOps;
use crate::ops::common::validate_append;
use crate::runtime::RuntimeClient;
use crate::runtime::parallel::kernels::{
    AppendStrategy, block_index_map, choose_append_strategy, launch_append,
};
use crate::runtime::parallel::{ParallelClient, ParallelRuntime};

/// AppendOps implementation for the parallel runtime.
impl AppendOps<ParallelRuntime> for ParallelClient {
    fn append<T: Element>(
        &self,
        srcs: &[&Array1<ParallelRuntime, T>],
    ) -> Result<Array1<ParallelRuntime, T>> {
        let lengths = validate_append(self, srcs)?;
        let device = self.device();

        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut total = 0usize;
        offsets.push(0u64);
        for &len in &lengths {
            total += len;
            offsets.push(total as u64);
        }

        let out = Array1::<ParallelRuntime, T>::new(total, device)?;
        if total == 0 {
            return Ok(out);
        }

        let offsets = Array1::<ParallelRuntime, u64>::from_slice(&offsets, device)?;
        let src_ptrs: Vec<u64> = srcs.iter().map(|src| src.data_ptr()).collect();
        let src_ptrs = Array1::<ParallelRuntime, u64>::from_slice(&src_ptrs, device)?;

        let strategy = choose_append_strategy(&lengths);
        log::debug!(
            "append: {} arrays, {} elements, {:?}",
            lengths.len(),
            total,
            strategy
        );
        let index_map = match strategy {
            AppendStrategy::Blocked { block_dim } => Some(Array1::<ParallelRuntime, u64>::from_slice(
                &block_index_map(&lengths, block_dim)?,
                device,
            )?),
            AppendStrategy::Rectangular { .. } => None,
        };

        unsafe {
            launch_append::<T>(
                self,
                lengths.len(),
                offsets.data_ptr(),
                src_ptrs.data_ptr(),
                out.data_ptr(),
                strategy,
                index_map.as_ref().map(|map| (map.data_ptr(), map.dim())),
            )?;
        }
        self.synchronize()?;
        Ok(out)
    }
}
