//! Fill and copy kernels

use crate::dtype::Element;

/// Write `first + i * inc` to `out[i]` for every `i < dim`
///
/// # Safety
/// `out` must be valid for `dim` writes.
pub unsafe fn range_kernel<T: Element>(out: *mut T, dim: usize, first: T, inc: T) {
    for i in 0..dim {
        unsafe { *out.add(i) = first + T::from_index(i) * inc };
    }
}

/// Pack a strided `dim0 x dim1` matrix into a contiguous row-major buffer
///
/// # Safety
/// - `src` must be valid for reads at `i * src_stride0 + j`
/// - `out` must be valid for `dim0 * dim1` writes and must not overlap `src`
pub unsafe fn strided_copy_kernel<T: Element>(
    src: *const T,
    dim0: usize,
    dim1: usize,
    src_stride0: usize,
    out: *mut T,
) {
    for i in 0..dim0 {
        for j in 0..dim1 {
            unsafe { *out.add(i * dim1 + j) = *src.add(i * src_stride0 + j) };
        }
    }
}
