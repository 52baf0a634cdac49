//! Parallel implementation of transpose.

use crate::array::Array2;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::TransposeOps;
use crate::ops::common::validate_transpose;
use crate::runtime::RuntimeClient;
use crate::runtime::parallel::kernels::launch_transpose;
use crate::runtime::parallel::{ParallelClient, ParallelRuntime};

/// TransposeOps implementation for the parallel runtime.
impl TransposeOps<ParallelRuntime> for ParallelClient {
    fn transpose<T: Element>(
        &self,
        src: &Array2<ParallelRuntime, T>,
        dest: &mut Array2<ParallelRuntime, T>,
    ) -> Result<()> {
        validate_transpose(self, src, dest)?;
        unsafe {
            launch_transpose::<T>(
                self,
                src.dim0(),
                src.dim1(),
                src.data_ptr(),
                src.elem_stride0(),
                dest.data_ptr(),
                dest.elem_stride0(),
            )?;
        }
        self.synchronize()
    }
}
