//! Segmented reduction kernels

use crate::dtype::Element;

/// Maximum of every row of a ragged array
///
/// Single pass over the values with a running maximum that is re-seeded with
/// `default_value` at every row start. Empty rows produce `default_value`.
///
/// # Safety
/// - `row_splits` must be valid for `num_rows + 1` reads and non-decreasing
/// - `values` must be valid for reads in `row_splits[0]..row_splits[num_rows]`
/// - `out` must be valid for `num_rows` writes
pub unsafe fn max_per_sublist_kernel<T: Element>(
    row_splits: *const i32,
    num_rows: usize,
    values: *const T,
    default_value: T,
    out: *mut T,
) {
    if num_rows == 0 {
        return;
    }
    let mut j = unsafe { *row_splits } as usize;
    for i in 0..num_rows {
        let mut max_val = default_value;
        let row_end = unsafe { *row_splits.add(i + 1) } as usize;
        while j < row_end {
            let elem = unsafe { *values.add(j) };
            if elem > max_val {
                max_val = elem;
            }
            j += 1;
        }
        unsafe { *out.add(i) = max_val };
    }
}
