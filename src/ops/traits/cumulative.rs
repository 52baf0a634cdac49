//! Cumulative (prefix-sum) operations trait.

use crate::array::{Array1, Array2, PtrArray};
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::Runtime;

/// Exclusive prefix sums
///
/// Every entry point writes `dest[k] = src[0] + ... + src[k - 1]`. The
/// destination may be one element longer than the source; that trailing slot
/// receives the total. In that case the source region must also extend one
/// element past the source, from the source's byte offset.
pub trait CumulativeOps<R: Runtime> {
    /// Exclusive sum of a sequence
    ///
    /// `dest.dim()` must be `src.dim()` or `src.dim() + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ragarray::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let src = Array1::<CpuRuntime, i32>::from_slice(&[2, 4, 6], &device)?;
    /// let mut dest = Array1::<CpuRuntime, i32>::new(3, &device)?;
    /// client.exclusive_sum(&src, &mut dest)?;
    /// assert_eq!(dest.to_vec()?, vec![0, 2, 6]);
    /// # Ok::<(), ragarray::error::Error>(())
    /// ```
    fn exclusive_sum<T: Element>(
        &self,
        src: &Array1<R, T>,
        dest: &mut Array1<R, T>,
    ) -> Result<()>;

    /// Exclusive sum of the values a pointer table points at
    ///
    /// Same contract as [`exclusive_sum`](Self::exclusive_sum), with the
    /// table's spare slot covering the trailing-total capacity check.
    fn exclusive_sum_deref<T: Element>(
        &self,
        src: &PtrArray<R, T>,
        dest: &mut Array1<R, T>,
    ) -> Result<()>;

    /// Exclusive sum along one axis of a matrix
    ///
    /// - `axis == 1`: every row is scanned independently; `dest.dim1()` may
    ///   exceed `src.dim1()` by one.
    /// - `axis == 0`: every column is scanned independently; `dest.dim0()`
    ///   may exceed `src.dim0()` by one.
    ///
    /// The other dimension must match. Rows are scanned one after another,
    /// so a matrix with many short rows is dominated by per-row overhead.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `axis` is not 0 or 1
    /// - `ShapeMismatch`, `DeviceMismatch`, `Aliasing`, `InsufficientCapacity`
    ///   as for [`exclusive_sum`](Self::exclusive_sum)
    fn exclusive_sum_2d<T: Element>(
        &self,
        src: &Array2<R, T>,
        dest: &mut Array2<R, T>,
        axis: usize,
    ) -> Result<()>;
}
