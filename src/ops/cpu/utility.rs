//! CPU implementation of utility operations.

use crate::array::{Array1, Array2};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::UtilityOps;
use crate::ops::common::ensure_compatible;
use crate::ops::impl_generic::rand_uniform_impl;
use crate::runtime::cpu::{CpuClient, CpuRuntime, kernels};
use rand::Rng;

/// UtilityOps implementation for CPU runtime.
impl UtilityOps<CpuRuntime> for CpuClient {
    fn range<T: Element>(&self, dim: usize, first: T, inc: T) -> Result<Array1<CpuRuntime, T>> {
        let out = Array1::<CpuRuntime, T>::new(dim, &self.device)?;
        unsafe {
            kernels::range_kernel(out.data_ptr() as *mut T, dim, first, inc);
        }
        Ok(out)
    }

    fn rand_uniform_with_rng<T: Element, G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        dim: usize,
        min_value: T,
        max_value: T,
    ) -> Result<Array1<CpuRuntime, T>> {
        rand_uniform_impl(self, rng, dim, min_value, max_value)
    }

    fn to_contiguous<T: Element>(
        &self,
        src: &Array2<CpuRuntime, T>,
    ) -> Result<Array2<CpuRuntime, T>> {
        ensure_compatible::<CpuRuntime, _>(self, src.device(), "to_contiguous")?;
        if src.is_contiguous() {
            return Ok(src.clone());
        }

        let out = Array2::<CpuRuntime, T>::new(src.dim0(), src.dim1(), &self.device)?;
        unsafe {
            kernels::strided_copy_kernel(
                src.data_ptr() as *const T,
                src.dim0(),
                src.dim1(),
                src.elem_stride0(),
                out.data_ptr() as *mut T,
            );
        }
        Ok(out)
    }
}
