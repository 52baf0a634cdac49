//! Fill and copy kernels

use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::parallel::ParallelClient;

/// Enqueue `out[i] = first + i * inc` for every `i < dim`
///
/// # Safety
/// `out` must be valid for `dim` writes of `T` until the stream drains.
pub unsafe fn launch_range<T: Element>(
    client: &ParallelClient,
    out: u64,
    dim: usize,
    first: T,
    inc: T,
) -> Result<()> {
    client.eval("range", dim, move |i| unsafe {
        *(out as *mut T).add(i) = first + T::from_index(i) * inc;
    })
}

/// Enqueue packing of a strided `dim0 x dim1` matrix into contiguous `out`
///
/// # Safety
/// `src` must cover its strided footprint and `out` must be valid for
/// `dim0 * dim1` writes; the two must not overlap.
pub unsafe fn launch_strided_copy<T: Element>(
    client: &ParallelClient,
    src: u64,
    dim0: usize,
    dim1: usize,
    src_stride0: usize,
    out: u64,
) -> Result<()> {
    client.eval2("to_contiguous", dim0, dim1, move |i, j| unsafe {
        *(out as *mut T).add(i * dim1 + j) = *(src as *const T).add(i * src_stride0 + j);
    })
}
