//! CPU implementation of transpose.

use crate::array::Array2;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::TransposeOps;
use crate::ops::common::validate_transpose;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};

/// TransposeOps implementation for CPU runtime.
impl TransposeOps<CpuRuntime> for CpuClient {
    fn transpose<T: Element>(
        &self,
        src: &Array2<CpuRuntime, T>,
        dest: &mut Array2<CpuRuntime, T>,
    ) -> Result<()> {
        validate_transpose(self, src, dest)?;
        unsafe {
            kernels::transpose_kernel::<T>(
                src.dim0(),
                src.dim1(),
                src.data_ptr() as *const T,
                src.elem_stride0(),
                dest.data_ptr() as *mut T,
                dest.elem_stride0(),
            );
        }
        Ok(())
    }
}
