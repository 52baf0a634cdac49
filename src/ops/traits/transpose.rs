//! Transpose operation trait.

use crate::array::Array2;
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::Runtime;

/// Matrix transpose
pub trait TransposeOps<R: Runtime> {
    /// Write `src^T` into `dest`
    ///
    /// Requires `dest.dim0() == src.dim1()` and `dest.dim1() == src.dim0()`.
    /// Either side may be strided. `dest` is fully overwritten and the call
    /// returns once the result is complete.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` if the shapes are not transposes of each other
    /// - `DeviceMismatch` if either array lives on another device
    /// - `Aliasing` if the footprints of `src` and `dest` overlap
    ///
    /// # Example
    ///
    /// ```
    /// # use ragarray::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let src = Array2::<CpuRuntime, i32>::from_slice(&[1, 2, 3, 4, 5, 6], 2, 3, &device)?;
    /// let mut dest = Array2::<CpuRuntime, i32>::new(3, 2, &device)?;
    /// client.transpose(&src, &mut dest)?;
    /// assert_eq!(dest.to_vec()?, vec![1, 4, 2, 5, 3, 6]);
    /// # Ok::<(), ragarray::error::Error>(())
    /// ```
    fn transpose<T: Element>(&self, src: &Array2<R, T>, dest: &mut Array2<R, T>) -> Result<()>;
}
