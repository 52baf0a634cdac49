//! Parallel implementation of cumulative operations.

use crate::array::{Array1, Array2, PtrArray};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::CumulativeOps;
use crate::ops::common::{validate_exclusive_sum, validate_exclusive_sum_deref};
use crate::ops::impl_generic::{ExclusiveSumRows, exclusive_sum_2d_impl};
use crate::runtime::RuntimeClient;
use crate::runtime::kernel::{DerefPtr, ValuePtr};
use crate::runtime::parallel::kernels::exclusive_sum;
use crate::runtime::parallel::{ParallelClient, ParallelRuntime};

/// CumulativeOps implementation for the parallel runtime.
impl CumulativeOps<ParallelRuntime> for ParallelClient {
    fn exclusive_sum<T: Element>(
        &self,
        src: &Array1<ParallelRuntime, T>,
        dest: &mut Array1<ParallelRuntime, T>,
    ) -> Result<()> {
        validate_exclusive_sum(self, src, dest)?;
        unsafe {
            exclusive_sum(
                self,
                ValuePtr::<T>::new(src.data_ptr()),
                dest.dim(),
                dest.data_ptr(),
            )?;
        }
        self.synchronize()
    }

    fn exclusive_sum_deref<T: Element>(
        &self,
        src: &PtrArray<ParallelRuntime, T>,
        dest: &mut Array1<ParallelRuntime, T>,
    ) -> Result<()> {
        validate_exclusive_sum_deref(self, src, dest)?;
        unsafe {
            exclusive_sum(
                self,
                DerefPtr::<T>::new(src.addrs().data_ptr()),
                dest.dim(),
                dest.data_ptr(),
            )?;
        }
        self.synchronize()
    }

    fn exclusive_sum_2d<T: Element>(
        &self,
        src: &Array2<ParallelRuntime, T>,
        dest: &mut Array2<ParallelRuntime, T>,
        axis: usize,
    ) -> Result<()> {
        exclusive_sum_2d_impl(self, src, dest, axis)
    }
}

impl ExclusiveSumRows<ParallelRuntime> for ParallelClient {
    // TODO: one launch per row; a segmented scan would cover all rows in one pass
    unsafe fn exclusive_sum_rows<T: Element>(
        &self,
        rows: usize,
        cols: usize,
        src: u64,
        src_stride0: usize,
        dest: u64,
        dest_stride0: usize,
    ) -> Result<()> {
        let elem = std::mem::size_of::<T>() as u64;
        for i in 0..rows as u64 {
            unsafe {
                exclusive_sum(
                    self,
                    ValuePtr::<T>::new(src + i * src_stride0 as u64 * elem),
                    cols,
                    dest + i * dest_stride0 as u64 * elem,
                )?;
            }
        }
        Ok(())
    }
}
