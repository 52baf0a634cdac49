//! Segmented reduction operations trait.

use crate::array::{Array1, Ragged};
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::Runtime;

/// Per-row reductions of ragged arrays
pub trait ReduceOps<R: Runtime> {
    /// Maximum of every row of `src`, written to `out`
    ///
    /// Each row folds from `default_value`, replacing it only with strictly
    /// greater elements; empty rows produce `default_value`. Requires
    /// `out.dim() == src.num_rows()`; with zero rows the call does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// # use ragarray::prelude::*;
    /// # let device = CpuDevice::new();
    /// # let client = CpuRuntime::default_client(&device);
    /// let rows: [&[i32]; 2] = [&[3, 1, 4, 1, 5], &[]];
    /// let src = Ragged::<CpuRuntime, i32>::from_rows(&rows, &device)?;
    /// let mut out = Array1::<CpuRuntime, i32>::new(2, &device)?;
    /// client.max_per_sublist(&src, -1, &mut out)?;
    /// assert_eq!(out.to_vec()?, vec![5, -1]);
    /// # Ok::<(), ragarray::error::Error>(())
    /// ```
    fn max_per_sublist<T: Element>(
        &self,
        src: &Ragged<R, T>,
        default_value: T,
        out: &mut Array1<R, T>,
    ) -> Result<()>;
}
