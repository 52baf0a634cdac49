//! CPU implementation of append.

use crate::array::Array1;
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::AppendOps;
use crate::ops::common::validate_append;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};

/// AppendOps implementation for CPU runtime.
impl AppendOps<CpuRuntime> for CpuClient {
    fn append<T: Element>(
        &self,
        srcs: &[&Array1<CpuRuntime, T>],
    ) -> Result<Array1<CpuRuntime, T>> {
        let lengths = validate_append(self, srcs)?;
        let total: usize = lengths.iter().sum();
        let out = Array1::<CpuRuntime, T>::new(total, &self.device)?;

        let sources: Vec<(u64, usize)> = srcs
            .iter()
            .zip(&lengths)
            .map(|(src, &len)| (src.data_ptr(), len))
            .collect();
        unsafe {
            kernels::append_kernel::<T>(&sources, out.data_ptr() as *mut T);
        }
        Ok(out)
    }
}
