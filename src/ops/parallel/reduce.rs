//! Parallel implementation of segmented reductions.

use crate::array::{Array1, Ragged};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::ReduceOps;
use crate::ops::common::validate_max_per_sublist;
use crate::runtime::parallel::kernels::{DeviceSegmentedReduce, MaxOp};
use crate::runtime::parallel::{ParallelClient, ParallelRuntime};
use crate::runtime::{RuntimeClient, ScratchBuffer};

/// ReduceOps implementation for the parallel runtime.
impl ReduceOps<ParallelRuntime> for ParallelClient {
    fn max_per_sublist<T: Element>(
        &self,
        src: &Ragged<ParallelRuntime, T>,
        default_value: T,
        out: &mut Array1<ParallelRuntime, T>,
    ) -> Result<()> {
        validate_max_per_sublist(self, src, out)?;
        let num_rows = src.num_rows();
        if num_rows == 0 {
            return Ok(());
        }

        let reduce = unsafe {
            DeviceSegmentedReduce::new(
                src.values().data_ptr(),
                src.shape().row_splits().data_ptr(),
                num_rows,
                out.data_ptr(),
                MaxOp,
                default_value,
            )
        };
        let scratch_bytes = reduce.plan();
        log::debug!(
            "max_per_sublist: {} rows, {} scratch bytes",
            num_rows,
            scratch_bytes
        );
        let scratch = ScratchBuffer::new(self.allocator(), scratch_bytes)?;
        reduce.execute(self, &scratch)?;
        self.synchronize()
    }
}
