//! CPU implementation of cumulative operations.

use crate::array::{Array1, Array2, PtrArray};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::CumulativeOps;
use crate::ops::common::{validate_exclusive_sum, validate_exclusive_sum_deref};
use crate::ops::impl_generic::{ExclusiveSumRows, exclusive_sum_2d_impl};
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use crate::runtime::kernel::{DerefPtr, ValuePtr};

/// CumulativeOps implementation for CPU runtime.
impl CumulativeOps<CpuRuntime> for CpuClient {
    fn exclusive_sum<T: Element>(
        &self,
        src: &Array1<CpuRuntime, T>,
        dest: &mut Array1<CpuRuntime, T>,
    ) -> Result<()> {
        validate_exclusive_sum(self, src, dest)?;
        unsafe {
            kernels::exclusive_sum_kernel(
                ValuePtr::<T>::new(src.data_ptr()),
                dest.dim(),
                dest.data_ptr() as *mut T,
            );
        }
        Ok(())
    }

    fn exclusive_sum_deref<T: Element>(
        &self,
        src: &PtrArray<CpuRuntime, T>,
        dest: &mut Array1<CpuRuntime, T>,
    ) -> Result<()> {
        validate_exclusive_sum_deref(self, src, dest)?;
        unsafe {
            kernels::exclusive_sum_kernel(
                DerefPtr::<T>::new(src.addrs().data_ptr()),
                dest.dim(),
                dest.data_ptr() as *mut T,
            );
        }
        Ok(())
    }

    fn exclusive_sum_2d<T: Element>(
        &self,
        src: &Array2<CpuRuntime, T>,
        dest: &mut Array2<CpuRuntime, T>,
        axis: usize,
    ) -> Result<()> {
        exclusive_sum_2d_impl(self, src, dest, axis)
    }
}

impl ExclusiveSumRows<CpuRuntime> for CpuClient {
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
                kernels::exclusive_sum_kernel(
                    ValuePtr::<T>::new(src + i * src_stride0 as u64 * elem),
                    cols,
                    (dest + i * dest_stride0 as u64 * elem) as *mut T,
                );
            }
        }
        Ok(())
    }
}
