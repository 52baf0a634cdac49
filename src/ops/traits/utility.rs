//! Utility operations trait.

use crate::array::{Array1, Array2};
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::Runtime;
use rand::Rng;

/// Generators and layout normalization
pub trait UtilityOps<R: Runtime> {
    /// Arithmetic progression `first, first + inc, ..., first + (dim - 1) * inc`
    ///
    /// # Example
    ///
    /// ```
    /// # use ragarray::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let r = client.range(4, 5i32, 2)?;
    /// assert_eq!(r.to_vec()?, vec![5, 7, 9, 11]);
    /// # Ok::<(), ragarray::error::Error>(())
    /// ```
    fn range<T: Element>(&self, dim: usize, first: T, inc: T) -> Result<Array1<R, T>>;

    /// `dim` values drawn uniformly from `[min_value, max_value]`
    ///
    /// Uses the thread-local generator; see
    /// [`rand_uniform_with_rng`](Self::rand_uniform_with_rng).
    fn rand_uniform<T: Element>(
        &self,
        dim: usize,
        min_value: T,
        max_value: T,
    ) -> Result<Array1<R, T>> {
        self.rand_uniform_with_rng(&mut rand::rng(), dim, min_value, max_value)
    }

    /// `dim` values drawn uniformly from `[min_value, max_value]` using `rng`
    ///
    /// Values are generated sequentially into a host staging buffer and then
    /// copied to the client's device, so a seeded generator reproduces the
    /// same array on every backend. Fails with `InvalidArgument` if
    /// `max_value < min_value`.
    fn rand_uniform_with_rng<T: Element, G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        dim: usize,
        min_value: T,
        max_value: T,
    ) -> Result<Array1<R, T>>;

    /// Packed copy of `src`, or `src` itself when it is already packed
    ///
    /// An already contiguous input is returned as a view of the same region.
    fn to_contiguous<T: Element>(&self, src: &Array2<R, T>) -> Result<Array2<R, T>>;
}
