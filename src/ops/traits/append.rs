//! Concatenation operations trait.

use crate::array::Array1;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Concatenation of flat arrays
pub trait AppendOps<R: Runtime> {
    /// Concatenate `srcs` in order into a new array
    ///
    /// Each source contributes its full contents contiguously; the result
    /// length is the sum of the source lengths.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `srcs` is empty
    /// - `DeviceMismatch` if a source lives on another device
    ///
    /// # Example
    ///
    /// ```
    /// # use ragarray::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let a = Array1::<CpuRuntime, u32>::from_slice(&[1, 2], &device)?;
    /// let b = Array1::<CpuRuntime, u32>::from_slice(&[3], &device)?;
    /// let out = client.append(&[&a, &b])?;
    /// assert_eq!(out.to_vec()?, vec![1, 2, 3]);
    /// # Ok::<(), ragarray::error::Error>(())
    /// ```
    fn append<T: Element>(&self, srcs: &[&Array1<R, T>]) -> Result<Array1<R, T>>;

    /// Concatenate a slice of arrays held by value
    ///
    /// Not implemented on any backend. Always fails with `NotImplemented`
    /// (or `InvalidArgument` for an empty slice).
    fn append_contiguous<T: Element>(&self, srcs: &[Array1<R, T>]) -> Result<Array1<R, T>> {
        if srcs.is_empty() {
            return Err(Error::invalid_argument("srcs", "append needs at least one array"));
        }
        Err(Error::NotImplemented {
            feature: "AppendOps::append_contiguous",
        })
    }
}
