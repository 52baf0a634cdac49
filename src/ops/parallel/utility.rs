//! Parallel implementation of utility operations.

use crate::array::{Array1, Array2};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::UtilityOps;
use crate::ops::common::ensure_compatible;
use crate::ops::impl_generic::rand_uniform_impl;
use crate::runtime::RuntimeClient;
use crate::runtime::parallel::kernels::{launch_range, launch_strided_copy};
use crate::runtime::parallel::{ParallelClient, ParallelRuntime};
use rand::Rng;

/// UtilityOps implementation for the parallel runtime.
impl UtilityOps<ParallelRuntime> for ParallelClient {
    fn range<T: Element>(
        &self,
        dim: usize,
        first: T,
        inc: T,
    ) -> Result<Array1<ParallelRuntime, T>> {
        let out = Array1::<ParallelRuntime, T>::new(dim, self.device())?;
        unsafe {
            launch_range(self, out.data_ptr(), dim, first, inc)?;
        }
        self.synchronize()?;
        Ok(out)
    }

    fn rand_uniform_with_rng<T: Element, G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        dim: usize,
        min_value: T,
        max_value: T,
    ) -> Result<Array1<ParallelRuntime, T>> {
        rand_uniform_impl(self, rng, dim, min_value, max_value)
    }

    fn to_contiguous<T: Element>(
        &self,
        src: &Array2<ParallelRuntime, T>,
    ) -> Result<Array2<ParallelRuntime, T>> {
        ensure_compatible::<ParallelRuntime, _>(self, src.device(), "to_contiguous")?;
        if src.is_contiguous() {
            return Ok(src.clone());
        }

        let out = Array2::<ParallelRuntime, T>::new(src.dim0(), src.dim1(), self.device())?;
        unsafe {
            launch_strided_copy::<T>(
                self,
                src.data_ptr(),
                src.dim0(),
                src.dim1(),
                src.elem_stride0(),
                out.data_ptr(),
            )?;
        }
        self.synchronize()?;
        Ok(out)
    }
}
