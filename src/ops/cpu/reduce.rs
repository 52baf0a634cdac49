//! CPU implementation of segmented reductions.

use crate::array::{Array1, Ragged};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::ReduceOps;
use crate::ops::common::validate_max_per_sublist;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};

/// ReduceOps implementation for CPU runtime.
impl ReduceOps<CpuRuntime> for CpuClient {
    fn max_per_sublist<T: Element>(
        &self,
        src: &Ragged<CpuRuntime, T>,
        default_value: T,
        out: &mut Array1<CpuRuntime, T>,
    ) -> Result<()> {
        validate_max_per_sublist(self, src, out)?;
        unsafe {
            kernels::max_per_sublist_kernel::<T>(
                src.shape().row_splits().data_ptr() as *const i32,
                src.num_rows(),
                src.values().data_ptr() as *const T,
                default_value,
                out.data_ptr() as *mut T,
            );
        }
        Ok(())
    }
}
