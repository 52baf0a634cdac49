//! Matrix transpose kernel

use crate::dtype::Element;

/// Copy element `(i, j)` of `src` to `(j, i)` of `dest`
///
/// Arbitrary row strides are tolerated on both sides, so no tiling is needed.
///
/// # Arguments
/// * `rows`, `cols` - Shape of `src`
/// * `src_stride0` - Elements between consecutive rows of `src`
/// * `dest_stride0` - Elements between consecutive rows of `dest` (`cols` rows of `rows` columns)
///
/// # Safety
/// - `src` must be valid for reads at `i * src_stride0 + j` for all `i < rows`, `j < cols`
/// - `dest` must be valid for writes at `j * dest_stride0 + i` for the same range
/// - The two footprints must not overlap
pub unsafe fn transpose_kernel<T: Element>(
    rows: usize,
    cols: usize,
    src: *const T,
    src_stride0: usize,
    dest: *mut T,
    dest_stride0: usize,
) {
    for i in 0..cols {
        for j in 0..rows {
            unsafe {
                *dest.add(i * dest_stride0 + j) = *src.add(j * src_stride0 + i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_strided_source() {
        // 2x3 matrix stored with row stride 4 (last column is padding)
        let src = [1, 2, 3, -1, 4, 5, 6, -1];
        let mut dest = [0i32; 6];
        unsafe { transpose_kernel(2, 3, src.as_ptr(), 4, dest.as_mut_ptr(), 2) };
        assert_eq!(dest, [1, 4, 2, 5, 3, 6]);
    }
}
